//! Range-based line removal.
//!
//! All ranges are resolved against the file as it was read and applied in
//! one pass. Re-running the same ranges on an already edited file removes
//! different lines, because everything after the first deletion has
//! shifted up.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::EditError;
use crate::fix::{LineRewriter, RemovedLine};
use crate::ranges::{LineRange, RangePolicy, RangeSet};
use crate::utils::normalize_display_path;

/// Options for [`remove_ranges_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    /// How ranges that do not fit the file are handled.
    pub policy: RangePolicy,
    /// Compute the result without writing the file.
    pub dry_run: bool,
}

/// Line counts for one removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemovalStats {
    /// Lines before the edit.
    pub original_lines: usize,
    /// Distinct lines covered by at least one range.
    pub removed_lines: usize,
    /// Lines left after the edit.
    pub kept_lines: usize,
}

/// Outcome of removing ranges from a file.
#[derive(Debug, Clone, Serialize)]
pub struct RemovalReport {
    /// File that was edited.
    pub path: String,
    /// Line counts.
    #[serde(flatten)]
    pub stats: RemovalStats,
    /// Merged ranges that were actually applied.
    pub applied: Vec<LineRange>,
    /// `true` when the file was left untouched.
    pub dry_run: bool,
    /// Lines that would be removed (dry runs only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preview: Vec<RemovedLine>,
}

/// Remove `ranges` from `text`, returning the kept text and its stats.
pub fn remove_ranges_in_text(
    text: &str,
    ranges: &[LineRange],
    policy: RangePolicy,
) -> Result<(String, RemovalStats), EditError> {
    let (rewriter, _) = plan(text, ranges, policy)?;
    let original_lines = rewriter.line_count();
    let out = rewriter.apply()?;
    let stats = RemovalStats {
        original_lines,
        removed_lines: out.removed_lines,
        kept_lines: original_lines - out.removed_lines,
    };
    Ok((out.text, stats))
}

fn plan<'a>(
    text: &'a str,
    ranges: &[LineRange],
    policy: RangePolicy,
) -> Result<(LineRewriter<'a>, RangeSet), EditError> {
    let mut rewriter = LineRewriter::new(text);
    let set = RangeSet::normalize(ranges, rewriter.line_count(), policy)?;
    rewriter.delete_all(set.ranges().iter().copied());
    Ok((rewriter, set))
}

/// Remove every line of `path` covered by `ranges`, rejecting ranges that
/// do not fit the file.
pub fn remove_ranges(
    path: impl AsRef<Path>,
    ranges: &[LineRange],
) -> Result<RemovalReport, EditError> {
    remove_ranges_with(path, ranges, &RemoveOptions::default())
}

/// Remove every line of `path` covered by `ranges`.
///
/// The file is read whole, rewritten in memory, and overwritten in place.
/// No backup is kept. When no line is covered the file is not written.
pub fn remove_ranges_with(
    path: impl AsRef<Path>,
    ranges: &[LineRange],
    options: &RemoveOptions,
) -> Result<RemovalReport, EditError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| EditError::io("read", path, e))?;

    let (rewriter, set) = plan(&source, ranges, options.policy)?;
    let original_lines = rewriter.line_count();
    let removed_lines = set.covered_lines();

    let preview = if options.dry_run {
        rewriter.preview()?
    } else {
        // nothing to remove: leave the file (and its mtime) alone
        if rewriter.has_edits() {
            let out = rewriter.apply()?;
            fs::write(path, out.text).map_err(|e| EditError::io("write", path, e))?;
        }
        Vec::new()
    };

    Ok(RemovalReport {
        path: normalize_display_path(path),
        stats: RemovalStats {
            original_lines,
            removed_lines,
            kept_lines: original_lines - removed_lines,
        },
        applied: set.ranges().to_vec(),
        dry_run: options.dry_run,
        preview,
    })
}
