//! Integration tests for the MCP server.
//!
//! Calls the tool methods directly and checks both the returned report and
//! the file on disk.

use linecut_mcp::tools::{
    AppendTextRequest, BlocksRequest, DuplicatesRequest, LinecutServer, RemoveRangesRequest,
};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use std::fs;
use tempfile::TempDir;

fn text_of(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .map(|c| format!("{c:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

fn numbered(n: usize) -> String {
    (1..=n).map(|i| format!("L{i}\n")).collect()
}

#[test]
#[allow(clippy::expect_used)]
fn test_remove_ranges_tool() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("lib.rs");
    fs::write(&file, numbered(10)).expect("write");

    let server = LinecutServer::new();
    let result = server
        .remove_ranges(Parameters(RemoveRangesRequest {
            path: file.to_string_lossy().into_owned(),
            ranges: vec!["3-5".to_owned(), "4:6".to_owned()],
            lenient: false,
            dry_run: false,
        }))
        .expect("tool call");

    assert!(!is_error(&result));
    assert!(text_of(&result).contains("removed_lines"));
    assert_eq!(
        fs::read_to_string(&file).expect("read"),
        "L1\nL2\nL7\nL8\nL9\nL10\n"
    );
}

#[test]
#[allow(clippy::expect_used)]
fn test_remove_ranges_tool_rejects_bad_input() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("lib.rs");
    fs::write(&file, numbered(3)).expect("write");
    let server = LinecutServer::new();

    let unparsable = server
        .remove_ranges(Parameters(RemoveRangesRequest {
            path: file.to_string_lossy().into_owned(),
            ranges: vec!["one-two".to_owned()],
            lenient: false,
            dry_run: false,
        }))
        .expect("tool call");
    assert!(is_error(&unparsable));

    let out_of_bounds = server
        .remove_ranges(Parameters(RemoveRangesRequest {
            path: file.to_string_lossy().into_owned(),
            ranges: vec!["2-9".to_owned()],
            lenient: false,
            dry_run: false,
        }))
        .expect("tool call");
    assert!(is_error(&out_of_bounds));
    assert_eq!(fs::read_to_string(&file).expect("read"), numbered(3));
}

#[test]
#[allow(clippy::expect_used)]
fn test_append_text_tool() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("lib.rs");
    fs::write(&file, "A\nB\n").expect("write");

    let result = LinecutServer::new()
        .append_text(Parameters(AppendTextRequest {
            path: file.to_string_lossy().into_owned(),
            text: "C\n".to_owned(),
            ensure_newline: false,
        }))
        .expect("tool call");

    assert!(!is_error(&result));
    assert_eq!(fs::read_to_string(&file).expect("read"), "A\nB\nC\n");
}

#[test]
#[allow(clippy::expect_used)]
fn test_locate_and_remove_blocks_tools() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("lib.rs");
    fs::write(
        &file,
        "#[tauri::command]\nfn get_product_list() -> Vec<String> {\n    Vec::new()\n}\n\nfn run() {}\n",
    )
    .expect("write");
    let server = LinecutServer::new();
    let request = |dry_run| BlocksRequest {
        path: file.to_string_lossy().into_owned(),
        names: vec!["get_product_list".to_owned(), "unknown".to_owned()],
        include_attributes: true,
        lenient: true,
        dry_run,
    };

    let located = server
        .locate_blocks(Parameters(request(false)))
        .expect("tool call");
    let text = text_of(&located);
    assert!(text.contains("get_product_list"));
    assert!(text.contains("unknown"));

    let removed = server
        .remove_blocks(Parameters(request(false)))
        .expect("tool call");
    assert!(!is_error(&removed));
    assert_eq!(fs::read_to_string(&file).expect("read"), "\nfn run() {}\n");
}

#[test]
#[allow(clippy::expect_used)]
fn test_root_confines_edits() {
    let dir = TempDir::new().expect("tempdir");
    let project = dir.path().join("project");
    fs::create_dir_all(&project).expect("mkdir");
    let outside = dir.path().join("outside.rs");
    fs::write(&outside, "x\n").expect("write");

    let server = LinecutServer::with_root(&project);
    let result = server
        .append_text(Parameters(AppendTextRequest {
            path: outside.to_string_lossy().into_owned(),
            text: "y\n".to_owned(),
            ensure_newline: false,
        }))
        .expect("tool call");

    assert!(is_error(&result));
    assert_eq!(fs::read_to_string(&outside).expect("read"), "x\n");
}

#[test]
#[allow(clippy::expect_used)]
fn test_find_duplicates_tool() {
    let dir = TempDir::new().expect("tempdir");
    let project = dir.path().join("project");
    fs::create_dir_all(&project).expect("mkdir");
    let file = project.join("lib.rs");
    fs::write(
        &file,
        "fn get_products() {}\nfn keep() {}\n\n#[tauri::command]\nfn get_products() {}\n",
    )
    .expect("write");
    let request = |path: &std::path::Path| {
        Parameters(DuplicatesRequest {
            path: path.to_string_lossy().into_owned(),
        })
    };

    let server = LinecutServer::with_root(&project);
    let result = server.find_duplicates(request(&file)).expect("tool call");
    assert!(!is_error(&result));
    let text = text_of(&result);
    assert!(text.contains("get_products"));
    assert!(!text.contains("keep"));

    let outside = dir.path().join("outside.rs");
    fs::write(&outside, "fn a() {}\nfn a() {}\n").expect("write");
    let result = server.find_duplicates(request(&outside)).expect("tool call");
    assert!(is_error(&result));
}
