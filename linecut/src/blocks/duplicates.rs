//! Function names defined more than once in a file.
//!
//! Appending generated stubs to a file that already defines some of them
//! leaves two bodies under one name. Listing those names and their lines
//! shows which blocks to feed back into removal.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::scanner::scan_signatures;
use crate::constants::RUST_EXTENSION;
use crate::error::EditError;

/// A function name with more than one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    /// Function name.
    pub name: String,
    /// 1-indexed signature lines, in file order.
    pub lines: Vec<usize>,
}

/// Result of a duplicate search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DuplicateScan {
    /// Duplicated names, ordered by their first definition.
    pub duplicates: Vec<Duplicate>,
    /// Number of function definitions and signatures seen.
    pub functions: usize,
    /// Which locator produced the result ("cst" or "scanner").
    pub locator: &'static str,
}

/// Find duplicated function names in `source` with the text scanner.
///
/// # Errors
///
/// Returns an error if the name pattern cannot be built.
pub fn find_duplicates(source: &str) -> Result<DuplicateScan, EditError> {
    let signatures = scan_signatures(source)?;
    Ok(group(signatures, "scanner"))
}

/// Find duplicated function names, picking the locator from `path`'s extension.
///
/// # Errors
///
/// Returns an error if the scanner fallback cannot build its pattern.
pub fn find_duplicates_for_path(path: &Path, source: &str) -> Result<DuplicateScan, EditError> {
    let is_rust = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RUST_EXTENSION));

    if is_rust {
        if let Some(signatures) = signatures_with_cst(source) {
            return Ok(group(signatures, "cst"));
        }
    }

    find_duplicates(source)
}

/// Read `path` and find duplicated function names in it.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn find_duplicates_in_file(path: impl AsRef<Path>) -> Result<DuplicateScan, EditError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| EditError::io("read", path, e))?;
    find_duplicates_for_path(path, &source)
}

#[cfg(feature = "cst")]
fn signatures_with_cst(source: &str) -> Option<Vec<(String, usize)>> {
    crate::cst::function_signatures(source)
}

#[cfg(not(feature = "cst"))]
fn signatures_with_cst(_source: &str) -> Option<Vec<(String, usize)>> {
    None
}

fn group(signatures: Vec<(String, usize)>, locator: &'static str) -> DuplicateScan {
    let functions = signatures.len();
    let mut order = Vec::new();
    let mut lines: FxHashMap<String, Vec<usize>> = FxHashMap::default();

    for (name, line) in signatures {
        let entry = lines.entry(name).or_insert_with_key(|name| {
            order.push(name.clone());
            Vec::new()
        });
        entry.push(line);
    }

    let duplicates = order
        .into_iter()
        .filter_map(|name| {
            let lines = lines.remove(&name)?;
            (lines.len() > 1).then_some(Duplicate { name, lines })
        })
        .collect();

    DuplicateScan {
        duplicates,
        functions,
        locator,
    }
}
