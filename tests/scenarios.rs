use assert_fs::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use sweep_into::config::EXCLUDE_DEFAULT;
use sweep_into::gate::{DryRun, Execute};
use sweep_into::{ExclusionSet, Level, MemoryLog, Plan, run};
use walkdir::WalkDir;

fn default_plan() -> Plan {
    Plan {
        child_name: "Documents".into(),
        exclusions: ExclusionSet::new(EXCLUDE_DEFAULT, "Documents").unwrap(),
        dry_run: false,
    }
}

/// Relative path -> file contents (None for directories).
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            let body = if e.file_type().is_file() {
                Some(fs::read(e.path()).unwrap())
            } else {
                None
            };
            (rel, body)
        })
        .collect()
}

#[test]
fn existing_destination_receives_loose_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let d1 = temp.child("d1");
    d1.child("a.txt").write_str("a").unwrap();
    d1.child("Documents/old.txt").write_str("old").unwrap();
    d1.child("Music/song.mp3").write_str("la").unwrap();
    let log = MemoryLog::default();

    let summary = run(&[d1.path().to_path_buf()], &default_plan(), &log, &mut Execute);

    d1.child("Documents/a.txt").assert("a");
    d1.child("Documents/old.txt").assert("old");
    d1.child("Music/song.mp3").assert("la");
    assert!(!d1.path().join("a.txt").exists());
    assert!(!d1.path().join("Documents/Music").exists());
    assert_eq!(summary.moved, 1);
    assert!(!log.contains(Level::Info, "Created destination"));
}

#[test]
fn missing_destination_is_created() {
    let temp = assert_fs::TempDir::new().unwrap();
    let d2 = temp.child("d2");
    d2.child("report.pdf").write_str("%PDF").unwrap();
    let log = MemoryLog::default();

    run(&[d2.path().to_path_buf()], &default_plan(), &log, &mut Execute);

    assert!(d2.path().join("Documents").is_dir());
    d2.child("Documents/report.pdf").assert("%PDF");
    assert!(log.contains(Level::Info, "Created destination directory"));
}

#[test]
fn missing_source_is_logged_and_isolated() {
    let temp = assert_fs::TempDir::new().unwrap();
    let d3 = temp.path().join("d3");
    let ok = temp.child("ok");
    ok.child("x.txt").write_str("x").unwrap();
    let log = MemoryLog::default();

    let summary = run(&[d3.clone(), ok.path().to_path_buf()], &default_plan(), &log, &mut Execute);

    assert_eq!(summary.invalid_sources, 1);
    ok.child("Documents/x.txt").assert("x");
    let errors = log.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("does not exist"), "{errors:?}");
    assert!(errors[0].contains(&d3.display().to_string()), "{errors:?}");
    assert!(!d3.exists());
}

#[test]
fn two_sources_are_both_processed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let d4 = temp.child("d4");
    let d5 = temp.child("d5");
    d4.child("x.txt").write_str("four").unwrap();
    d5.child("x.txt").write_str("five").unwrap();
    let log = MemoryLog::default();

    let summary = run(
        &[d4.path().to_path_buf(), d5.path().to_path_buf()],
        &default_plan(),
        &log,
        &mut Execute,
    );

    d4.child("Documents/x.txt").assert("four");
    d5.child("Documents/x.txt").assert("five");
    assert_eq!(summary.processed, 2);
    assert!(log.contains(Level::Info, "Processed 2 source paths"));
}

#[test]
fn second_run_is_a_no_op() {
    let temp = assert_fs::TempDir::new().unwrap();
    let d = temp.child("home");
    d.child("a.txt").write_str("a").unwrap();
    d.child("notes").create_dir_all().unwrap();

    let first = run(&[d.path().to_path_buf()], &default_plan(), &MemoryLog::default(), &mut Execute);
    assert_eq!(first.moved, 2);
    let after_first = snapshot(d.path());

    let log = MemoryLog::default();
    let second = run(&[d.path().to_path_buf()], &default_plan(), &log, &mut Execute);

    assert_eq!(second.moved, 0);
    assert!(!second.has_failures());
    assert!(log.errors().is_empty());
    assert_eq!(snapshot(d.path()), after_first);
}

#[test]
fn dry_run_leaves_filesystem_identical() {
    let temp = assert_fs::TempDir::new().unwrap();
    let with_dest = temp.child("with_dest");
    with_dest.child("Documents/keep.txt").write_str("k").unwrap();
    with_dest.child("a.txt").write_str("a").unwrap();
    let without_dest = temp.child("without_dest");
    without_dest.child("b.txt").write_str("b").unwrap();
    without_dest.child("sub/c.txt").write_str("c").unwrap();
    let before = snapshot(temp.path());

    let log = MemoryLog::default();
    let mut out = Vec::new();
    let plan = Plan {
        dry_run: true,
        ..default_plan()
    };
    let summary = {
        let mut gate = DryRun::new(&mut out, &log);
        run(
            &[with_dest.path().to_path_buf(), without_dest.path().to_path_buf()],
            &plan,
            &log,
            &mut gate,
        )
    };

    assert_eq!(snapshot(temp.path()), before);
    assert_eq!(summary.moved, 0);
    // a.txt, b.txt, sub
    assert_eq!(summary.declined, 3);
    assert!(log.contains(Level::Info, "What if: create directory"));
    assert!(log.contains(Level::Info, "a.txt"));
    assert!(log.contains(Level::Info, "b.txt"));
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 4, "one create + three moves: {text}");
}

#[test]
fn custom_child_name_and_exclusions() {
    let temp = assert_fs::TempDir::new().unwrap();
    let d = temp.child("d");
    d.child("a.txt").write_str("a").unwrap();
    d.child("b.tmp").write_str("b").unwrap();
    d.child(".hidden").write_str("h").unwrap();
    let plan = Plan {
        child_name: "Archive".into(),
        exclusions: ExclusionSet::new(&["*.tmp"], "Archive").unwrap(),
        dry_run: false,
    };

    let summary = run(&[d.path().to_path_buf()], &plan, &MemoryLog::default(), &mut Execute);

    d.child("Archive/a.txt").assert("a");
    // The override replaced ".*", so dotfiles move too.
    d.child("Archive/.hidden").assert("h");
    d.child("b.tmp").assert("b");
    assert_eq!(summary.moved, 2);
}

#[cfg(unix)]
#[test]
fn failed_move_leaves_item_and_continues() {
    use std::os::unix::fs::PermissionsExt;

    let temp = assert_fs::TempDir::new().unwrap();
    let d = temp.child("d");
    d.child("a.txt").write_str("a").unwrap();
    d.child("b.txt").write_str("b").unwrap();
    let docs = d.child("Documents");
    docs.create_dir_all().unwrap();
    // Read-only destination: every rename into it fails.
    fs::set_permissions(docs.path(), fs::Permissions::from_mode(0o555)).unwrap();
    if fs::write(docs.path().join(".probe"), "x").is_ok() {
        // Running as root; permissions are not enforced.
        fs::set_permissions(docs.path(), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let log = MemoryLog::default();
    let summary = run(&[d.path().to_path_buf()], &default_plan(), &log, &mut Execute);
    fs::set_permissions(docs.path(), fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(summary.failed_items, 2);
    assert!(d.path().join("a.txt").exists());
    assert!(d.path().join("b.txt").exists());
    let errors = log.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("a.txt"));
    assert!(errors[1].contains("b.txt"));
    assert!(log.contains(Level::Info, "Processed 1 source paths"));
}

#[cfg(unix)]
#[test]
fn unreadable_source_is_logged_and_counted_invalid() {
    use std::os::unix::fs::PermissionsExt;

    let temp = assert_fs::TempDir::new().unwrap();
    let locked = temp.child("locked");
    locked.child("home/a.txt").write_str("a").unwrap();
    let ok = temp.child("ok");
    ok.child("x.txt").write_str("x").unwrap();
    fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o000)).unwrap();
    if fs::metadata(locked.path().join("home")).is_ok() {
        // Running as root; permissions are not enforced.
        fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let log = MemoryLog::default();
    let sources = [locked.path().join("home"), ok.path().to_path_buf()];
    let summary = run(&sources, &default_plan(), &log, &mut Execute);
    fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(summary.invalid_sources, 1);
    assert_eq!(summary.processed, 1);
    ok.child("Documents/x.txt").assert("x");
    locked.child("home/a.txt").assert("a");
    let errors = log.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Cannot inspect source path"), "{errors:?}");
    assert!(log.contains(Level::Info, "Processed 1 source paths"));
}

#[cfg(unix)]
#[test]
fn unlistable_source_fails_once_and_batch_continues() {
    use std::os::unix::fs::PermissionsExt;

    let temp = assert_fs::TempDir::new().unwrap();
    let blind = temp.child("blind");
    blind.child("a.txt").write_str("a").unwrap();
    blind.child("Documents").create_dir_all().unwrap();
    let ok = temp.child("ok");
    ok.child("x.txt").write_str("x").unwrap();
    fs::set_permissions(blind.path(), fs::Permissions::from_mode(0o300)).unwrap();
    if fs::read_dir(blind.path()).is_ok() {
        fs::set_permissions(blind.path(), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let log = MemoryLog::default();
    let sources = [blind.path().to_path_buf(), ok.path().to_path_buf()];
    let summary = run(&sources, &default_plan(), &log, &mut Execute);
    fs::set_permissions(blind.path(), fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed_items, 1);
    assert_eq!(summary.moved, 1);
    blind.child("a.txt").assert("a");
    ok.child("Documents/x.txt").assert("x");
    let errors = log.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Cannot list"), "{errors:?}");
}
