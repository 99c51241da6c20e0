use std::fs;
use std::path::PathBuf;

use serde_json::json;

use dorm_census_ingest::{ReadError, read_records};

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn reads_an_array_of_objects() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "rooms.json",
        r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]"#,
    );

    let records = read_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], json!(1));
    assert_eq!(records[1]["name"], json!("B"));
}

#[test]
fn missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let err = read_records(&path).unwrap_err();
    assert!(matches!(err, ReadError::FileNotFound(p) if p == path));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "bad.json", "[{\"id\": 1,");

    let err = read_records(&path).unwrap_err();
    assert!(matches!(err, ReadError::Parse { .. }));
}

#[test]
fn top_level_object_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "obj.json", r#"{"id": 1}"#);

    let err = read_records(&path).unwrap_err();
    assert!(matches!(err, ReadError::NotAnArray(_)));
}

#[test]
fn array_with_scalar_elements_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "scalars.json", "[1, 2, 3]");

    let err = read_records(&path).unwrap_err();
    assert!(matches!(err, ReadError::NotAnArray(_)));
}

#[test]
fn empty_array_is_fine() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "empty.json", "[]");

    assert!(read_records(&path).unwrap().is_empty());
}
