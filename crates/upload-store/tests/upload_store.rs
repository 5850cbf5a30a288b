//! Behavioural tests for the upload store: atomic writes, reads, and
//! idempotent deletion.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;
use upload_store::{StorageName, UploadStore, UploadStoreError};

struct Harness {
    _tmp: TempDir,
    root: Utf8PathBuf,
    store: UploadStore,
}

#[fixture]
fn harness() -> Harness {
    let tmp = tempfile::tempdir().expect("temp dir");
    let root = Utf8Path::from_path(tmp.path())
        .expect("utf-8 temp path")
        .join("uploads");
    let store = UploadStore::open(&root).expect("open store");
    Harness {
        _tmp: tmp,
        root,
        store,
    }
}

fn directory_entries(root: &Utf8Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root)
        .expect("list directory")
        .map(|entry| {
            entry
                .expect("directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[rstest]
fn open_creates_missing_directories(harness: Harness) {
    assert!(harness.root.is_dir());
    assert_eq!(harness.store.root(), harness.root.as_path());
}

#[rstest]
fn store_writes_bytes_under_generated_name(harness: Harness) {
    let stored = harness
        .store
        .store("Dump Truck.JPEG", b"jpeg-bytes")
        .expect("store upload");

    assert_eq!(stored.size, 10);
    assert!(stored.name.as_str().ends_with(".jpeg"));
    assert_eq!(
        harness.store.read(&stored.name).expect("read back"),
        b"jpeg-bytes"
    );
    assert_eq!(
        directory_entries(&harness.root),
        vec![stored.name.to_string()],
        "no temporary files should remain"
    );
}

#[rstest]
fn store_accepts_empty_files(harness: Harness) {
    let stored = harness.store.store("empty.png", b"").expect("store upload");

    assert_eq!(stored.size, 0);
    assert!(harness.store.contains(&stored.name).expect("exists check"));
}

#[rstest]
fn delete_removes_file(harness: Harness) {
    let stored = harness.store.store("a.png", b"png").expect("store upload");

    harness.store.delete(&stored.name).expect("delete");

    assert!(!harness.store.contains(&stored.name).expect("exists check"));
    assert!(directory_entries(&harness.root).is_empty());
}

#[rstest]
fn deleting_twice_is_not_an_error(harness: Harness) {
    let stored = harness.store.store("a.png", b"png").expect("store upload");

    harness.store.delete(&stored.name).expect("first delete");
    harness.store.delete(&stored.name).expect("second delete");
}

#[rstest]
fn deleting_unknown_name_is_not_an_error(harness: Harness) {
    let name = StorageName::parse("0123456789abcdef0123456789abcdef.png").expect("valid name");

    harness.store.delete(&name).expect("delete missing file");
}

#[rstest]
fn reading_missing_file_fails(harness: Harness) {
    let name = StorageName::generate("missing.png");

    let err = harness.store.read(&name).expect_err("missing file");

    assert!(matches!(err, UploadStoreError::Read { .. }));
}

#[rstest]
fn files_outside_store_are_unreachable(harness: Harness) {
    let outside = harness
        .root
        .parent()
        .expect("root has parent")
        .join("secret.png");
    fs::write(&outside, b"secret").expect("write outside file");

    let err = StorageName::parse("../secret.png").expect_err("traversal rejected");

    assert!(matches!(err, UploadStoreError::InvalidName { .. }));
    assert!(outside.exists());
}

#[rstest]
fn hostile_extensions_still_round_trip_through_delete(harness: Harness) {
    let stored = harness
        .store
        .store("truck.p\\ng", b"abc")
        .expect("store upload");

    let reparsed = StorageName::parse(stored.name.as_str()).expect("stored name parses");
    harness.store.delete(&reparsed).expect("delete");

    assert_eq!(stored.name.as_str().len(), 32);
    assert!(directory_entries(&harness.root).is_empty());
}
