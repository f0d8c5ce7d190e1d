use serde::Serialize;
use std::fmt;

use crate::parser::add_one_hour;

/// Start of the slot used when a reminder carries no time.
pub const DEFAULT_START: &str = "13:00";
/// End of the default slot. Fixed rather than derived from `DEFAULT_START`.
pub const DEFAULT_END: &str = "14:00";

/// An unchecked reminder parsed from one line of a source note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderLine {
    pub description: String,
    pub date: String,
    pub time: Option<String>,
}

impl ReminderLine {
    /// Render the time-blocked checklist line for this reminder.
    pub fn to_task(&self) -> FormattedTask {
        let (start, end) = match &self.time {
            Some(t) => (t.clone(), add_one_hour(t)),
            None => (DEFAULT_START.to_string(), DEFAULT_END.to_string()),
        };
        FormattedTask {
            date: self.date.clone(),
            line: format!("- [ ] {start} - {end} {}", self.description),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FormattedTask {
    pub date: String,
    pub line: String,
}

impl fmt::Display for FormattedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Classification of a line found in an existing daily output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Checked,
    Unchecked,
    Other,
}

impl LineKind {
    /// Classify an already trimmed line.
    pub fn of(line: &str) -> Self {
        if line.starts_with("- [x]") {
            Self::Checked
        } else if line.starts_with("- [ ]") {
            Self::Unchecked
        } else {
            Self::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(desc: &str, time: Option<&str>) -> ReminderLine {
        ReminderLine {
            description: desc.to_string(),
            date: "2023-10-01".to_string(),
            time: time.map(|s| s.to_string()),
        }
    }

    #[test]
    fn task_with_time() {
        let task = reminder("Call mom", Some("09:15")).to_task();
        assert_eq!(task.date, "2023-10-01");
        assert_eq!(task.line, "- [ ] 09:15 - 10:15 Call mom");
    }

    #[test]
    fn task_without_time_uses_default_slot() {
        let task = reminder("Water plants", None).to_task();
        assert_eq!(task.line, "- [ ] 13:00 - 14:00 Water plants");
    }

    #[test]
    fn task_wraps_past_midnight() {
        let task = reminder("Night shift", Some("23:45")).to_task();
        assert_eq!(task.line, "- [ ] 23:45 - 00:45 Night shift");
    }

    #[test]
    fn line_kinds() {
        assert_eq!(LineKind::of("- [x] 09:00 - 10:00 Done"), LineKind::Checked);
        assert_eq!(LineKind::of("- [ ] 09:00 - 10:00 Open"), LineKind::Unchecked);
        assert_eq!(LineKind::of("# 2023-10-01"), LineKind::Other);
        assert_eq!(LineKind::of(""), LineKind::Other);
        assert_eq!(LineKind::of("- [X] upper"), LineKind::Other);
    }
}
