use std::fs;
use std::path::Path;

use timeblock::{process_tasks, FsVault, SyncError};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn setup() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("notes")).unwrap();
    fs::create_dir_all(dir.path().join("daily")).unwrap();
    dir
}

#[test]
fn buy_milk_scenario() {
    let dir = setup();
    write(
        dir.path(),
        "notes/inbox.md",
        "- [ ] Buy milk (@2023-10-01 09:00)\n- [x] Old task (@2023-10-01)\n",
    );

    let vault = FsVault::new(dir.path());
    process_tasks(&vault, "notes", "daily").unwrap();

    assert_eq!(
        read(dir.path(), "daily/2023-10-01.md"),
        "# 2023-10-01\n\n- [ ] 09:00 - 10:00 Buy milk"
    );
}

#[test]
fn rerun_leaves_files_byte_identical() {
    let dir = setup();
    write(
        dir.path(),
        "notes/projects/work.md",
        "# Work\n\n- [ ] Standup (@2023-10-02 09:30) #work\n- [ ] Review (@2023-10-02)\nSome prose.\n",
    );
    write(dir.path(), "notes/home.md", "- [ ] Laundry (@2023-10-03 18:00)\n");
    write(
        dir.path(),
        "daily/2023-10-02.md",
        "# 2023-10-02\n\n- [x] 08:00 - 09:00 Breakfast\n",
    );

    let vault = FsVault::new(dir.path());
    let first = process_tasks(&vault, "notes", "daily").unwrap();
    assert_eq!(first.updated, vec!["2023-10-02"]);
    assert_eq!(first.created, vec!["2023-10-03"]);

    let day2 = read(dir.path(), "daily/2023-10-02.md");
    let day3 = read(dir.path(), "daily/2023-10-03.md");
    assert_eq!(
        day2,
        "# 2023-10-02\n\n\
         - [x] 08:00 - 09:00 Breakfast\n\
         - [ ] 09:30 - 10:30 Standup\n\
         - [ ] 13:00 - 14:00 Review"
    );

    let second = process_tasks(&vault, "notes", "daily").unwrap();
    assert!(!second.changed());
    assert_eq!(read(dir.path(), "daily/2023-10-02.md"), day2);
    assert_eq!(read(dir.path(), "daily/2023-10-03.md"), day3);
}

#[test]
fn checked_lines_outlive_their_reminders() {
    let dir = setup();
    write(dir.path(), "notes/a.md", "- [ ] Call (@2023-10-01 10:00)\n");

    let vault = FsVault::new(dir.path());
    process_tasks(&vault, "notes", "daily").unwrap();

    // Tick the task off in the daily note and drop the reminder at source.
    write(
        dir.path(),
        "daily/2023-10-01.md",
        "# 2023-10-01\n\n- [x] 10:00 - 11:00 Call",
    );
    write(dir.path(), "notes/a.md", "nothing left\n");
    process_tasks(&vault, "notes", "daily").unwrap();

    assert_eq!(
        read(dir.path(), "daily/2023-10-01.md"),
        "# 2023-10-01\n\n- [x] 10:00 - 11:00 Call"
    );
}

#[test]
fn removed_reminder_prunes_and_deletes() {
    let dir = setup();
    write(
        dir.path(),
        "notes/a.md",
        "- [ ] Keep (@2023-10-01 08:00)\n- [ ] Drop (@2023-10-01 09:00)\n- [ ] Gone (@2023-10-02)\n",
    );

    let vault = FsVault::new(dir.path());
    process_tasks(&vault, "notes", "daily").unwrap();
    assert!(dir.path().join("daily/2023-10-02.md").exists());

    write(dir.path(), "notes/a.md", "- [ ] Keep (@2023-10-01 08:00)\n");
    let report = process_tasks(&vault, "notes", "daily").unwrap();

    assert_eq!(report.updated, vec!["2023-10-01"]);
    assert_eq!(report.deleted, vec!["2023-10-02"]);
    assert_eq!(
        read(dir.path(), "daily/2023-10-01.md"),
        "# 2023-10-01\n\n- [ ] 08:00 - 09:00 Keep"
    );
    assert!(!dir.path().join("daily/2023-10-02.md").exists());
}

#[test]
fn output_inside_source_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "vault/a.md", "- [ ] A (@2023-10-01 09:00)\n");
    write(
        dir.path(),
        "vault/daily/scratch.md",
        "- [ ] Hidden (@2023-10-04 09:00)\n",
    );

    let vault = FsVault::new(dir.path());
    let report = process_tasks(&vault, "vault", "vault/daily").unwrap();

    assert_eq!(report.files_scanned, 1);
    assert!(dir.path().join("vault/daily/2023-10-01.md").exists());
    assert!(!dir.path().join("vault/daily/2023-10-04.md").exists());
}

#[test]
fn invalid_folders_leave_disk_untouched() {
    let dir = setup();
    write(dir.path(), "notes/a.md", "- [ ] A (@2023-10-01 09:00)\n");
    let vault = FsVault::new(dir.path());

    let err = process_tasks(&vault, "missing", "daily").unwrap_err();
    assert!(matches!(err, SyncError::InvalidFolder(_)));
    assert_eq!(err.to_string(), "folder 'missing' does not exist");

    let err = process_tasks(&vault, "notes", "notes").unwrap_err();
    assert!(matches!(err, SyncError::SameFolder(_)));

    assert_eq!(fs::read_dir(dir.path().join("daily")).unwrap().count(), 0);
    assert!(!dir.path().join("notes/2023-10-01.md").exists());
}

#[cfg(unix)]
#[test]
fn dangling_link_does_not_abort_sync() {
    let dir = setup();
    write(dir.path(), "notes/a.md", "- [ ] A (@2023-10-01 09:00)\n");
    std::os::unix::fs::symlink("/nonexistent/target.md", dir.path().join("notes/broken.md"))
        .unwrap();
    std::os::unix::fs::symlink("/nonexistent/old.md", dir.path().join("daily/2023-09-30.md"))
        .unwrap();

    let vault = FsVault::new(dir.path());
    let report = process_tasks(&vault, "notes", "daily").unwrap();

    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.created, vec!["2023-10-01"]);
    assert_eq!(
        read(dir.path(), "daily/2023-10-01.md"),
        "# 2023-10-01\n\n- [ ] 09:00 - 10:00 A"
    );
}
