//! Function lookup over the Rust CST.

use rustc_hash::FxHashSet;

use super::parser::{CstNode, CstParser, CstTree};
use crate::blocks::{is_outer_doc, Block, BlockOptions};
use crate::constants::FUNCTION_KINDS;
use crate::ranges::LineRange;

/// Locate every function named in `names` by parsing `source` as Rust.
///
/// Returns `None` when the grammar cannot be loaded or the source has
/// syntax errors; the caller then falls back to the text scanner.
#[must_use]
pub fn locate_functions(
    source: &str,
    names: &[String],
    options: &BlockOptions,
) -> Option<Vec<Block>> {
    let mut parser = CstParser::new().ok()?;
    let tree = parser.parse(source).ok()?;
    if tree.has_errors {
        return None;
    }

    let wanted: FxHashSet<&str> = names.iter().map(String::as_str).collect();
    let mut blocks = Vec::new();
    collect(&tree, &tree.root, &wanted, options, &mut blocks);
    Some(blocks)
}

/// Name and 1-indexed start line of every function in `source`, in file order.
///
/// Returns `None` under the same conditions as [`locate_functions`].
#[must_use]
pub fn function_signatures(source: &str) -> Option<Vec<(String, usize)>> {
    let mut parser = CstParser::new().ok()?;
    let tree = parser.parse(source).ok()?;
    if tree.has_errors {
        return None;
    }

    Some(
        tree.root
            .find_by_kinds(FUNCTION_KINDS)
            .into_iter()
            .filter_map(|node| Some((node.name.clone()?, node.start_point.row + 1)))
            .collect(),
    )
}

fn collect(
    tree: &CstTree,
    node: &CstNode,
    wanted: &FxHashSet<&str>,
    options: &BlockOptions,
    blocks: &mut Vec<Block>,
) {
    for (i, child) in node.children.iter().enumerate() {
        if FUNCTION_KINDS.contains(&child.kind.as_str()) {
            if let Some(name) = child.name.as_deref().filter(|n| wanted.contains(n)) {
                let first_row = if options.include_attributes {
                    leading_row(tree, &node.children[..i], child.start_point.row)
                } else {
                    child.start_point.row
                };
                blocks.push(Block {
                    name: name.to_owned(),
                    signature_line: child.start_point.row + 1,
                    range: LineRange::new(first_row + 1, child.last_row() + 1),
                });
            }
        }
        collect(tree, child, wanted, options, blocks);
    }
}

/// Walk back over attributes and doc comments directly above `row`.
///
/// A plain comment trailing an attribute on the same line is stepped over.
fn leading_row(tree: &CstTree, before: &[CstNode], mut row: usize) -> usize {
    for (i, sibling) in before.iter().enumerate().rev() {
        let attached = match sibling.kind.as_str() {
            "attribute_item" => true,
            "line_comment" | "block_comment" => {
                let text = tree.text(sibling).trim_end();
                if is_outer_doc(text) {
                    true
                } else if is_trailing(before, i) {
                    continue;
                } else {
                    false
                }
            }
            _ => false,
        };
        if !attached || sibling.last_row() + 1 < row {
            break;
        }
        row = sibling.start_point.row;
    }
    row
}

fn is_trailing(siblings: &[CstNode], i: usize) -> bool {
    i.checked_sub(1)
        .and_then(|prev| siblings.get(prev))
        .is_some_and(|prev| prev.last_row() == siblings[i].start_point.row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::scan_blocks;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    const COMMANDS: &str = "\
use tauri::State;

/// Lists products.
#[tauri::command]
pub async fn get_product_list(state: State<'_, Db>) -> Result<Vec<String>, String> {
    let sql = \"SELECT } FROM products\";
    state.query(sql).await
}

// helper, not a doc
fn delete_product(id: i64) {
    let _ = id;
}
";

    #[test]
    fn test_locate_with_attributes_and_docs() {
        let blocks =
            locate_functions(COMMANDS, &names(&["get_product_list"]), &BlockOptions::default())
                .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].signature_line, 5);
        assert_eq!(blocks[0].range, LineRange::new(3, 8));
    }

    #[test]
    fn test_plain_comment_not_attached() {
        let blocks =
            locate_functions(COMMANDS, &names(&["delete_product"]), &BlockOptions::default())
                .unwrap();
        assert_eq!(blocks[0].range, LineRange::new(11, 13));
    }

    #[test]
    fn test_without_attributes() {
        let options = BlockOptions {
            include_attributes: false,
            ..BlockOptions::default()
        };
        let blocks = locate_functions(COMMANDS, &names(&["get_product_list"]), &options).unwrap();
        assert_eq!(blocks[0].range, LineRange::new(5, 8));
    }

    #[test]
    fn test_trait_signatures_and_methods() {
        let source = "trait Store {\n    fn load(&self);\n}\n\nimpl Store for Disk {\n    fn load(&self) {\n    }\n}\n";
        let blocks = locate_functions(source, &names(&["load"]), &BlockOptions::default()).unwrap();
        let ranges: Vec<_> = blocks.iter().map(|b| b.range).collect();
        assert_eq!(ranges, vec![LineRange::single(2), LineRange::new(6, 7)]);
    }

    #[test]
    fn test_function_signatures_in_file_order() {
        let signatures = function_signatures(COMMANDS).unwrap();
        assert_eq!(
            signatures,
            vec![
                ("get_product_list".to_owned(), 5),
                ("delete_product".to_owned(), 11),
            ]
        );
        assert!(function_signatures("fn broken( {\n").is_none());
    }

    #[test]
    fn test_syntax_error_defers_to_scanner() {
        assert!(
            locate_functions("fn broken( {\n", &names(&["broken"]), &BlockOptions::default())
                .is_none()
        );
    }

    #[test]
    fn test_attribute_with_trailing_comment_agrees_with_scanner() {
        let source = "\
#[tauri::command] // exposed
fn target() {}

fn other() {} // note
fn after() {}
";
        let wanted = names(&["target", "after"]);
        let options = BlockOptions::default();
        let from_cst = locate_functions(source, &wanted, &options).unwrap();
        let from_scan = scan_blocks(source, &wanted, &options).unwrap();
        assert_eq!(from_cst[0].range, LineRange::new(1, 2));
        assert_eq!(from_cst[1].range, LineRange::single(5));
        assert_eq!(from_cst, from_scan);
    }

    #[test]
    fn test_agrees_with_scanner() {
        let wanted = names(&["get_product_list", "delete_product"]);
        let options = BlockOptions::default();
        let mut from_cst = locate_functions(COMMANDS, &wanted, &options).unwrap();
        let mut from_scan = scan_blocks(COMMANDS, &wanted, &options).unwrap();
        from_cst.sort_by_key(|b| b.range);
        from_scan.sort_by_key(|b| b.range);
        assert_eq!(from_cst, from_scan);
    }
}
