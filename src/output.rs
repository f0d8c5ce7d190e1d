use serde::Serialize;

use crate::error::SyncError;
use crate::model::FormattedTask;
use crate::ops::SyncReport;

#[derive(Serialize)]
pub struct ErrorReport<'a> {
    pub kind: &'a str,
    pub message: String,
}

impl<'a> From<&'a SyncError> for ErrorReport<'a> {
    fn from(err: &'a SyncError) -> Self {
        ErrorReport {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

pub fn format_report(report: &SyncReport) -> String {
    let mut out = String::new();
    let prefix = if report.dry_run { "(dry run) " } else { "" };
    out.push_str(&format!(
        "{prefix}Scanned {} notes, found {} reminders\n",
        report.files_scanned, report.reminders
    ));

    for (label, dates) in [
        ("Created", &report.created),
        ("Updated", &report.updated),
        ("Deleted", &report.deleted),
    ] {
        if !dates.is_empty() {
            out.push_str(&format!("{label:<10}{}\n", dates.join(", ")));
        }
    }

    if !report.changed() {
        out.push_str("Daily notes already up to date\n");
    }
    out
}

pub fn format_tasks(tasks: &[FormattedTask]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&format!("{}\t{task}\n", task.date));
    }
    out
}
