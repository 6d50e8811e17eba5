//! Tests for appending text to files.
#![allow(clippy::unwrap_used)]

use linecut::append::{append_text, append_text_with, AppendOptions};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_append_line_after_existing_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "A\nB\n").unwrap();

    append_text(&path, "C\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "A\nB\nC\n");
}

#[test]
fn test_append_is_verbatim_without_separator() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lib.rs");
    fs::write(&path, "fn a() {}").unwrap();

    let report = append_text(&path, "fn b() {}\n").unwrap();
    assert!(!report.separator_added);
    assert_eq!(fs::read_to_string(&path).unwrap(), "fn a() {}fn b() {}\n");
}

#[test]
fn test_append_stub_commands() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lib.rs");
    fs::write(&path, "pub fn run() {}\n").unwrap();

    let stubs = "\n#[tauri::command]\nfn get_product_list() -> Vec<String> {\n    Vec::new()\n}\n";
    let report = append_text(&path, stubs).unwrap();

    assert_eq!(report.bytes_appended, stubs.len());
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("pub fn run() {}\n\n#[tauri::command]"));
    assert!(content.ends_with("Vec::new()\n}\n"));
}

#[test]
fn test_append_empty_text_changes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lib.rs");
    fs::write(&path, "x").unwrap();

    let options = AppendOptions {
        ensure_newline: true,
    };
    let report = append_text_with(&path, "", &options).unwrap();
    assert_eq!(report.bytes_appended, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "x");
}

#[test]
fn test_repeated_appends_accumulate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");

    append_text(&path, "one\n").unwrap();
    append_text(&path, "two\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
}
