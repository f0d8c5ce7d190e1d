//! Reminder line grammar.
//!
//! A reminder is an unchecked checklist item carrying a date annotation and
//! an optional trailing tag:
//!
//! ```text
//! - [ ] Buy milk (@2023-10-01 09:00) #errands
//! ```
//!
//! Anything else, checked items included, is ordinary note text and yields
//! `None`.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::ReminderLine;

static REMINDER_RE: OnceLock<Regex> = OnceLock::new();
static TIME_RE: OnceLock<Regex> = OnceLock::new();

fn reminder_re() -> &'static Regex {
    REMINDER_RE.get_or_init(|| {
        Regex::new(
            r"^- \[ \] (.+?) \(@([0-9]{4}-[0-9]{2}-[0-9]{2})(?: ([0-9]{2}:[0-9]{2}))?\)(?: #[\w/-]+)?$",
        )
        .expect("reminder pattern is valid")
    })
}

fn time_re() -> &'static Regex {
    TIME_RE.get_or_init(|| Regex::new(r"^([0-9]{2}):([0-9]{2})$").expect("time pattern is valid"))
}

/// Parse one line of note text into a reminder.
pub fn parse_line(line: &str) -> Option<ReminderLine> {
    let caps = reminder_re().captures(line.trim())?;
    Some(ReminderLine {
        description: caps[1].to_string(),
        date: caps[2].to_string(),
        time: caps.get(3).map(|m| m.as_str().to_string()),
    })
}

/// Shift an `HH:MM` time forward by one hour, wrapping at midnight.
/// Minutes are carried through untouched. Input of any other shape is
/// returned as is.
pub fn add_one_hour(time: &str) -> String {
    let Some(caps) = time_re().captures(time) else {
        return time.to_string();
    };
    let Ok(hour) = caps[1].parse::<u32>() else {
        return time.to_string();
    };
    format!("{:02}:{}", (hour + 1) % 24, &caps[2])
}
