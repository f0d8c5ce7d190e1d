//! Vault path handling and daily note naming.
//!
//! Vault paths are `/`-separated and relative to the vault root. The empty
//! string is the root itself. Daily notes are named `<YYYY-MM-DD>.md`; the
//! helpers here are the single source of truth for that convention.

/// Extension of the note files that are scanned and written.
pub const NOTE_EXTENSION: &str = "md";

/// Canonical form of a vault path: no leading, trailing or repeated `/`,
/// no `.` segments. `""`, `"/"` and `"."` all mean the root.
pub fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a child name onto a normalized folder path.
pub fn join(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{folder}/{name}")
    }
}

/// Final path segment.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File name of the daily note for `date`.
/// `2023-10-01` → `2023-10-01.md`
pub fn daily_file_name(date: &str) -> String {
    format!("{date}.{NOTE_EXTENSION}")
}

/// Recover the date from a daily note file name. Only names of the exact
/// shape `DDDD-DD-DD.md` qualify.
/// `2023-10-01.md` → `Some("2023-10-01")`
pub fn date_from_file_name(name: &str) -> Option<&str> {
    let date = name.strip_suffix(".md")?;
    let b = date.as_bytes();
    let shaped = b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        });
    shaped.then_some(date)
}
