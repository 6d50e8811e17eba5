//! Locating and removing named function blocks.
//!
//! Turns "remove `get_product_list` and `delete_product`" into line ranges
//! computed from the file's current content, then hands those ranges to the
//! single-pass remover. Rust sources go through the tree-sitter grammar when
//! the `cst` feature is enabled; everything else uses the text scanner.

mod duplicates;
mod scanner;

pub use duplicates::{
    find_duplicates, find_duplicates_for_path, find_duplicates_in_file, Duplicate, DuplicateScan,
};
pub use scanner::{code_mask, scan_blocks};
#[cfg(feature = "cst")]
pub(crate) use scanner::is_outer_doc;

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::constants::RUST_EXTENSION;
use crate::error::EditError;
use crate::ranges::{LineRange, RangePolicy};
use crate::remover::{remove_ranges_with, RemovalReport, RemoveOptions};

/// A located function, including its leading attributes when requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Function name.
    pub name: String,
    /// 1-indexed line holding the `fn` keyword.
    pub signature_line: usize,
    /// Lines the block occupies.
    pub range: LineRange,
}

/// Options for block location.
#[derive(Debug, Clone, Copy)]
pub struct BlockOptions {
    /// Extend blocks upward over `#[...]` attributes and `///` docs.
    pub include_attributes: bool,
    /// Strict: a missing name is an error. Lenient: it is reported.
    pub policy: RangePolicy,
}

impl Default for BlockOptions {
    fn default() -> Self {
        Self {
            include_attributes: true,
            policy: RangePolicy::Strict,
        }
    }
}

/// Result of a block search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockScan {
    /// Located blocks, ordered by start line.
    pub blocks: Vec<Block>,
    /// Names with no match (lenient mode only).
    pub missing: Vec<String>,
    /// Which locator produced the blocks ("cst" or "scanner").
    pub locator: &'static str,
}

/// Locate `names` in `source` with the text scanner.
pub fn locate_blocks(
    source: &str,
    names: &[String],
    options: &BlockOptions,
) -> Result<BlockScan, EditError> {
    let blocks = scan_blocks(source, names, options)?;
    finish_scan(blocks, names, options, "scanner")
}

/// Locate `names` in `source`, picking the locator from `path`'s extension.
///
/// Rust files are parsed with tree-sitter when available; a parse with
/// syntax errors falls back to the scanner.
pub fn locate_blocks_for_path(
    path: &Path,
    source: &str,
    names: &[String],
    options: &BlockOptions,
) -> Result<BlockScan, EditError> {
    let is_rust = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RUST_EXTENSION));

    if is_rust {
        if let Some(blocks) = locate_with_cst(source, names, options) {
            return finish_scan(blocks, names, options, "cst");
        }
    }

    locate_blocks(source, names, options)
}

#[cfg(feature = "cst")]
fn locate_with_cst(source: &str, names: &[String], options: &BlockOptions) -> Option<Vec<Block>> {
    crate::cst::locate_functions(source, names, options)
}

#[cfg(not(feature = "cst"))]
fn locate_with_cst(
    _source: &str,
    _names: &[String],
    _options: &BlockOptions,
) -> Option<Vec<Block>> {
    None
}

/// Read `path` and locate `names` in it.
pub fn locate_blocks_in_file(
    path: impl AsRef<Path>,
    names: &[String],
    options: &BlockOptions,
) -> Result<BlockScan, EditError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| EditError::io("read", path, e))?;
    locate_blocks_for_path(path, &source, names, options)
}

fn finish_scan(
    mut blocks: Vec<Block>,
    names: &[String],
    options: &BlockOptions,
    locator: &'static str,
) -> Result<BlockScan, EditError> {
    blocks.sort_by_key(|b| (b.range.start, b.range.end));
    blocks.dedup();

    let found: FxHashSet<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
    let mut missing = Vec::new();
    for name in names {
        if found.contains(name.as_str()) || missing.contains(name) {
            continue;
        }
        if options.policy == RangePolicy::Strict {
            return Err(EditError::BlockNotFound { name: name.clone() });
        }
        missing.push(name.clone());
    }

    Ok(BlockScan {
        blocks,
        missing,
        locator,
    })
}

/// Options for [`remove_blocks`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRemoveOptions {
    /// How blocks are located.
    pub block: BlockOptions,
    /// Compute the result without writing the file.
    pub dry_run: bool,
}

/// Outcome of removing blocks from a file.
#[derive(Debug, Clone, Serialize)]
pub struct BlockRemovalReport {
    /// Blocks that were (or would be) removed.
    pub blocks: Vec<Block>,
    /// Names with no match.
    pub missing: Vec<String>,
    /// The underlying line removal.
    pub removal: RemovalReport,
}

/// Locate the functions named in `names` and delete them from `path` in one pass.
///
/// A block nested inside another removed block merges with it.
pub fn remove_blocks(
    path: impl AsRef<Path>,
    names: &[String],
    options: &BlockRemoveOptions,
) -> Result<BlockRemovalReport, EditError> {
    let path = path.as_ref();
    let scan = locate_blocks_in_file(path, names, &options.block)?;
    let ranges: Vec<LineRange> = scan.blocks.iter().map(|b| b.range).collect();

    let removal = remove_ranges_with(
        path,
        &ranges,
        &RemoveOptions {
            policy: RangePolicy::Strict,
            dry_run: options.dry_run,
        },
    )?;

    Ok(BlockRemovalReport {
        blocks: scan.blocks,
        missing: scan.missing,
        removal,
    })
}
