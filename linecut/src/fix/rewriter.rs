//! Single-pass line deletion.
//!
//! # Usage
//!
//! ```
//! use linecut::fix::LineRewriter;
//! use linecut::ranges::LineRange;
//!
//! let mut rewriter = LineRewriter::new("a\nb\nc\n");
//! rewriter.delete(LineRange::single(2));
//! let out = rewriter.apply().expect("should apply");
//! assert_eq!(out.text, "a\nc\n");
//! ```

use serde::Serialize;

use crate::lines::{line_text, LineIndex};
use crate::ranges::LineRange;

/// Error during rewriting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// Two deletions cover a common line.
    #[error("deletions {first} and {second} overlap")]
    OverlappingEdits {
        /// The earlier range.
        first: LineRange,
        /// The range that overlaps it.
        second: LineRange,
    },
    /// A deletion starts before line 1, is inverted, or ends past the text.
    #[error("deletion {range} does not fit a text of {line_count} lines")]
    OutOfBounds {
        /// The offending range.
        range: LineRange,
        /// Lines in the source.
        line_count: usize,
    },
}

/// A line dropped by the rewriter, terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedLine {
    /// 1-indexed position in the original text.
    pub line: usize,
    /// Line content.
    pub text: String,
}

/// Output of [`LineRewriter::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// The source with every deleted line removed.
    pub text: String,
    /// Number of lines dropped.
    pub removed_lines: usize,
}

/// Deletes whole lines from a source text.
///
/// Deletions must not overlap; callers merge ranges first
/// (see [`crate::ranges::RangeSet`]).
#[derive(Debug, Clone)]
pub struct LineRewriter<'a> {
    source: &'a str,
    index: LineIndex,
    deletions: Vec<LineRange>,
}

impl<'a> LineRewriter<'a> {
    /// Create a rewriter over `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            index: LineIndex::new(source),
            deletions: Vec::new(),
        }
    }

    /// Queue deletion of every line in `range`.
    pub fn delete(&mut self, range: LineRange) {
        self.deletions.push(range);
    }

    /// Queue several deletions.
    pub fn delete_all(&mut self, ranges: impl IntoIterator<Item = LineRange>) {
        self.deletions.extend(ranges);
    }

    /// Lines in the source text.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    /// Check if there are any pending deletions.
    #[must_use]
    pub fn has_edits(&self) -> bool {
        !self.deletions.is_empty()
    }

    fn sorted(&self) -> Vec<LineRange> {
        let mut sorted = self.deletions.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Validate deletions without applying them.
    ///
    /// # Errors
    /// Returns error if deletions overlap or fall outside the text.
    pub fn validate(&self) -> Result<(), RewriteError> {
        let line_count = self.line_count();
        let sorted = self.sorted();

        for range in &sorted {
            if range.start == 0 || range.is_inverted() || range.end > line_count {
                return Err(RewriteError::OutOfBounds {
                    range: *range,
                    line_count,
                });
            }
        }

        for pair in sorted.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(RewriteError::OverlappingEdits {
                    first: pair[0],
                    second: pair[1],
                });
            }
        }

        Ok(())
    }

    /// Lines that [`apply`](Self::apply) would drop, in order.
    ///
    /// # Errors
    /// Returns error if deletions overlap or fall outside the text.
    pub fn preview(&self) -> Result<Vec<RemovedLine>, RewriteError> {
        self.validate()?;
        Ok(self
            .sorted()
            .iter()
            .flat_map(|range| range.start..=range.end)
            .filter_map(|line| {
                line_text(self.source, &self.index, line).map(|text| RemovedLine {
                    line,
                    text: text.to_owned(),
                })
            })
            .collect())
    }

    /// Apply all deletions and return the rewritten text.
    ///
    /// Kept lines are copied verbatim, terminators included.
    ///
    /// # Errors
    /// Returns error if deletions overlap or fall outside the text.
    pub fn apply(self) -> Result<Rewritten, RewriteError> {
        self.validate()?;

        let mut text = String::with_capacity(self.source.len());
        let mut cursor = 0;
        let mut removed_lines = 0;

        for range in self.sorted() {
            let Some((start, end)) = self.index.lines_span(range.start, range.end) else {
                continue;
            };
            text.push_str(&self.source[cursor..start]);
            cursor = end;
            removed_lines += range.len();
        }
        text.push_str(&self.source[cursor..]);

        Ok(Rewritten {
            text,
            removed_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_middle_line() {
        let mut rewriter = LineRewriter::new("a\nb\nc\n");
        rewriter.delete(LineRange::single(2));
        let out = rewriter.apply().unwrap();
        assert_eq!(out.text, "a\nc\n");
        assert_eq!(out.removed_lines, 1);
    }

    #[test]
    fn test_multiple_deletions_use_original_numbering() {
        let mut rewriter = LineRewriter::new("1\n2\n3\n4\n5\n6\n");
        rewriter.delete(LineRange::new(5, 6));
        rewriter.delete(LineRange::new(1, 2));
        let out = rewriter.apply().unwrap();
        assert_eq!(out.text, "3\n4\n");
        assert_eq!(out.removed_lines, 4);
    }

    #[test]
    fn test_overlapping_deletions_error() {
        let mut rewriter = LineRewriter::new("1\n2\n3\n4\n");
        rewriter.delete(LineRange::new(1, 3));
        rewriter.delete(LineRange::new(3, 4));
        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_error() {
        let mut rewriter = LineRewriter::new("short\n");
        rewriter.delete(LineRange::new(1, 2));
        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::OutOfBounds { line_count: 1, .. })
        ));
    }

    #[test]
    fn test_delete_unterminated_last_line_keeps_previous_newline() {
        let mut rewriter = LineRewriter::new("a\nb");
        rewriter.delete(LineRange::single(2));
        assert_eq!(rewriter.apply().unwrap().text, "a\n");
    }

    #[test]
    fn test_crlf_preserved_on_kept_lines() {
        let mut rewriter = LineRewriter::new("a\r\nb\r\nc\r\n");
        rewriter.delete(LineRange::single(1));
        assert_eq!(rewriter.apply().unwrap().text, "b\r\nc\r\n");
    }

    #[test]
    fn test_preview_lists_removed_lines() {
        let mut rewriter = LineRewriter::new("fn a() {}\nfn b() {}\nfn c() {}\n");
        rewriter.delete(LineRange::new(2, 3));
        let preview = rewriter.preview().unwrap();
        assert_eq!(
            preview,
            vec![
                RemovedLine {
                    line: 2,
                    text: "fn b() {}".to_owned()
                },
                RemovedLine {
                    line: 3,
                    text: "fn c() {}".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_no_edits_returns_source() {
        let rewriter = LineRewriter::new("unchanged\n");
        assert!(!rewriter.has_edits());
        assert_eq!(rewriter.apply().unwrap().text, "unchanged\n");
    }
}
