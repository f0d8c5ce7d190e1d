use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use serde::Serialize;

use crate::error::SyncError;
use crate::model::LineKind;
use crate::parser::parse_line;
use crate::paths::{self, NOTE_EXTENSION};
use crate::validate::{check_distinct, require_folder};
use crate::vault::{Node, Vault};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Compute the report without writing or deleting anything.
    pub dry_run: bool,
}

/// What a sync run did (or would do, for a dry run). Date lists are in
/// ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub source: String,
    pub output: String,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub reminders: usize,
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    pub unchanged: Vec<String>,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        !(self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty())
    }
}

/// Reminders found under the source folder, keyed by date. Each date maps
/// to the set of formatted task lines, so identical reminders collapse.
#[derive(Debug, Default)]
pub struct Scan {
    pub files_scanned: usize,
    pub reminders: usize,
    pub by_date: BTreeMap<String, BTreeSet<String>>,
}

/// Outcome for a single daily file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayPlan {
    Write(String),
    Delete,
    Keep,
    Nothing,
}

/// Sync reminders under `source` into daily notes under `output`.
pub fn process_tasks(
    vault: &impl Vault,
    source: &str,
    output: &str,
) -> Result<SyncReport, SyncError> {
    process_tasks_with(vault, source, output, &SyncOptions::default())
}

pub fn process_tasks_with(
    vault: &impl Vault,
    source: &str,
    output: &str,
    opts: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    let source = paths::normalize(source);
    let output = paths::normalize(output);

    check_distinct(&source, &output)?;
    let source_tree = require_folder(vault, &source)?;
    let output_tree = require_folder(vault, &output)?;

    let scan = scan_reminders(vault, &source_tree, &output)?;
    let existing = existing_daily_dates(&output_tree);
    info!(
        "scanned {} files under '{}': {} reminders across {} dates",
        scan.files_scanned,
        source,
        scan.reminders,
        scan.by_date.len()
    );

    let mut report = SyncReport {
        source: source.clone(),
        output: output.clone(),
        dry_run: opts.dry_run,
        files_scanned: scan.files_scanned,
        reminders: scan.reminders,
        ..SyncReport::default()
    };

    let empty = BTreeSet::new();
    let dates: BTreeSet<&String> = scan.by_date.keys().chain(existing.iter()).collect();
    for date in dates {
        let path = paths::join(&output, &paths::daily_file_name(date));
        let current = scan.by_date.get(date).unwrap_or(&empty);
        let before = if existing.contains(date) {
            Some(vault.read(&path).map_err(|e| SyncError::io(&path, e))?)
        } else {
            None
        };

        match plan_day(date, before.as_deref(), current) {
            DayPlan::Write(content) => {
                if !opts.dry_run {
                    vault
                        .write(&path, &content)
                        .map_err(|e| SyncError::io(&path, e))?;
                }
                if before.is_some() {
                    info!("updated {path}");
                    report.updated.push(date.clone());
                } else {
                    info!("created {path}");
                    report.created.push(date.clone());
                }
            }
            DayPlan::Delete => {
                if !opts.dry_run {
                    vault.delete(&path).map_err(|e| SyncError::io(&path, e))?;
                }
                info!("deleted {path}");
                report.deleted.push(date.clone());
            }
            DayPlan::Keep => {
                debug!("{path} already up to date");
                report.unchanged.push(date.clone());
            }
            DayPlan::Nothing => {}
        }
    }

    Ok(report)
}

/// Walk `tree` and parse every note in it. The folder at exactly `exclude`
/// is skipped along with everything beneath it.
pub fn scan_reminders(
    vault: &impl Vault,
    tree: &Node,
    exclude: &str,
) -> Result<Scan, SyncError> {
    let mut notes = Vec::new();
    collect_notes(tree, exclude, &mut notes);

    let mut scan = Scan::default();
    for path in notes {
        let content = vault.read(path).map_err(|e| SyncError::io(path, e))?;
        let mut found = 0;
        for task in content.lines().filter_map(parse_line).map(|r| r.to_task()) {
            found += 1;
            scan.by_date.entry(task.date).or_default().insert(task.line);
        }
        debug!("{path}: {found} reminders");
        scan.files_scanned += 1;
        scan.reminders += found;
    }
    Ok(scan)
}

fn collect_notes<'a>(node: &'a Node, exclude: &str, out: &mut Vec<&'a str>) {
    match node {
        Node::File {
            path, extension, ..
        } => {
            if extension == NOTE_EXTENSION {
                out.push(path);
            }
        }
        Node::Folder { path, children } => {
            if path == exclude {
                debug!("skipping output folder '{path}'");
                return;
            }
            for child in children {
                collect_notes(child, exclude, out);
            }
        }
    }
}

/// Dates that already have a daily file directly inside the output folder.
fn existing_daily_dates(output_tree: &Node) -> BTreeSet<String> {
    let Node::Folder { children, .. } = output_tree else {
        return BTreeSet::new();
    };
    children
        .iter()
        .filter_map(|child| match child {
            Node::File { name, .. } => paths::date_from_file_name(name).map(str::to_string),
            Node::Folder { .. } => None,
        })
        .collect()
}

/// Reconcile an existing daily file body with the current task lines.
///
/// Existing lines are kept as a list: checked lines always survive, unchecked
/// lines survive while they are still in `current`, both in file order and
/// repeats included. Members of `current` not already kept are appended
/// after them.
pub fn merge_day(existing: Option<&str>, current: &BTreeSet<String>) -> Vec<String> {
    let mut checked = Vec::new();
    let mut unchecked: Vec<String> = Vec::new();

    for line in existing.unwrap_or_default().lines().map(str::trim) {
        match LineKind::of(line) {
            LineKind::Checked => checked.push(line.to_string()),
            LineKind::Unchecked => {
                if current.contains(line) {
                    unchecked.push(line.to_string());
                }
            }
            LineKind::Other => {}
        }
    }

    let fresh: Vec<String> = current
        .iter()
        .filter(|line| !checked.contains(*line) && !unchecked.contains(*line))
        .cloned()
        .collect();

    checked.extend(unchecked);
    checked.extend(fresh);
    checked
}

pub fn render_day(date: &str, lines: &[String]) -> String {
    format!("# {date}\n\n{}", lines.join("\n"))
}

/// Decide what happens to the daily file for `date`.
pub fn plan_day(date: &str, existing: Option<&str>, current: &BTreeSet<String>) -> DayPlan {
    let lines = merge_day(existing, current);
    if lines.is_empty() {
        return match existing {
            Some(_) => DayPlan::Delete,
            None => DayPlan::Nothing,
        };
    }
    let content = render_day(date, &lines);
    match existing {
        Some(before) if before == content => DayPlan::Keep,
        _ => DayPlan::Write(content),
    }
}
