//! Error types shared by every edit operation.

use std::path::{Path, PathBuf};

use crate::fix::RewriteError;
use crate::ranges::LineRange;

/// Errors produced while editing a file.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// Reading or writing the target file failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted ("read", "write", "append to").
        action: &'static str,
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A range is malformed (inverted, or starts before line 1).
    #[error("invalid range {range}: {reason}")]
    InvalidRange {
        /// The offending range.
        range: LineRange,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// A range reaches past the last line of the file.
    #[error("range {range} is outside the file ({line_count} lines)")]
    RangeOutOfBounds {
        /// The offending range.
        range: LineRange,
        /// Number of lines in the file.
        line_count: usize,
    },
    /// No function with this name exists in the source.
    #[error("no function named `{name}` was found")]
    BlockNotFound {
        /// Function name that was searched for.
        name: String,
    },
    /// A function body was opened but never closed.
    #[error("function `{name}` starting at line {line} has no closing brace")]
    UnterminatedBlock {
        /// Function name.
        name: String,
        /// 1-indexed signature line.
        line: usize,
    },
    /// The function-name regex could not be built (e.g. too many names).
    #[error("failed to build function name pattern: {0}")]
    NamePattern(#[from] regex::Error),
    /// The rewriter rejected the computed edits.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

impl EditError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` when the error is an I/O failure of kind `NotFound`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
