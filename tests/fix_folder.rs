use std::fs;

use labelfix::fix::{fix_labels_in_folder, FixOptions};
use labelfix::LabelfixError;

mod common;

#[test]
fn corrupt_only_file_is_emptied() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let file = temp.path().join("broken.txt");
    common::write_labels(&file, "abc,1,2\n");

    let report = fix_labels_in_folder(temp.path(), &FixOptions::default()).expect("fix");

    assert_eq!(common::read_labels(&file), "");
    assert_eq!(report.labels.dropped_count(), 1);
    assert_eq!(report.labels.issues[0].source, "broken.txt");
    assert_eq!(report.labels.issues[0].line, 1);
    assert_eq!(report.emptied_files(), vec!["broken.txt"]);
}

#[test]
fn mixed_files_are_normalized_in_place() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_labels(
        &temp.path().join("a.txt"),
        "0,0.1,0.2,0.3,0.4 1,0.5,0.6,0.7,0.8\n\n2 0.9 0.9 0.1 0.1\n",
    );
    common::write_labels(&temp.path().join("b.txt"), "3,0.2,0.2,0.2,0.2,0.4,0.4\n");

    let report = fix_labels_in_folder(temp.path(), &FixOptions::default()).expect("fix");

    assert_eq!(report.files_processed(), 2);
    assert!(report.labels.is_clean());
    assert_eq!(
        common::read_labels(&temp.path().join("a.txt")),
        "0 0.1 0.2 0.3 0.4\n1 0.5 0.6 0.7 0.8\n2 0.9 0.9 0.1 0.1\n"
    );
    assert_eq!(
        common::read_labels(&temp.path().join("b.txt")),
        "3 0.2 0.2 0.2 0.2 0.4 0.4\n"
    );
}

#[test]
fn running_twice_matches_running_once() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let file = temp.path().join("labels.txt");
    common::write_labels(
        &file,
        "0,0.5,0.5,0.2,0.2 1 0.3,0.3,0.1,0.1\n4 0.1 0.1 0.05 0.05\ncat,1,1,1,1\n",
    );

    fix_labels_in_folder(temp.path(), &FixOptions::default()).expect("first run");
    let once = common::read_labels(&file);

    let second = fix_labels_in_folder(temp.path(), &FixOptions::default()).expect("second run");
    let twice = common::read_labels(&file);

    assert_eq!(once, twice);
    assert!(second.labels.is_clean());
    assert_eq!(once, "0 0.5 0.5 0.2 0.2\n4 0.1 0.1 0.05 0.05\ncat 1 1 1 1\n");
}

#[test]
fn nonexistent_folder_is_untouched() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let missing = temp.path().join("does/not/exist");

    let err = fix_labels_in_folder(&missing, &FixOptions::default()).unwrap_err();
    assert!(matches!(err, LabelfixError::FolderNotFound { .. }));
    assert!(!missing.exists());
    assert!(common::file_names(temp.path()).is_empty());
}

#[test]
fn non_utf8_file_is_skipped_and_neighbours_are_fixed() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let before = temp.path().join("a.txt");
    let binary = temp.path().join("b.txt");
    let after = temp.path().join("c.txt");
    common::write_labels(&before, "0,1,2,3,4\n");
    fs::write(&binary, [0xff, 0xfe]).expect("write bytes");
    common::write_labels(&after, "1,1,2,3,4\n");

    let report = fix_labels_in_folder(temp.path(), &FixOptions::default()).expect("fix");

    assert_eq!(common::read_labels(&before), "0 1 2 3 4\n");
    assert_eq!(common::read_labels(&after), "1 1 2 3 4\n");
    assert_eq!(fs::read(&binary).unwrap(), vec![0xff, 0xfe]);
    assert_eq!(report.files_processed(), 2);
    assert_eq!(report.unreadable.len(), 1);
    assert_eq!(report.unreadable[0].file_name, "b.txt");
    assert!(report.to_string().contains("Unreadable, left untouched (1):"));
}
