//! Inclusive, 1-indexed line ranges and their normalized set form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EditError;

/// An inclusive `start..=end` span of 1-indexed line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First line covered (1-indexed).
    pub start: usize,
    /// Last line covered (1-indexed, inclusive).
    pub end: usize,
}

impl LineRange {
    /// Create a range covering `start..=end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a range covering exactly one line.
    #[must_use]
    pub const fn single(line: usize) -> Self {
        Self::new(line, line)
    }

    /// Check whether `line` falls inside this range.
    #[must_use]
    pub const fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    /// A range whose start is after its end covers nothing.
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Number of lines covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.is_inverted() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Inverted ranges are empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_inverted()
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl From<(usize, usize)> for LineRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// Error returned when a range spec such as `"3-5"` cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid range '{spec}': expected N, N-M or N:M")]
pub struct ParseRangeError {
    /// The text that failed to parse.
    pub spec: String,
}

impl FromStr for LineRange {
    type Err = ParseRangeError;

    /// Accepts `7`, `3-5` and `3:5`, with optional surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRangeError { spec: s.to_owned() };
        let trimmed = s.trim();
        let parse = |part: &str| part.trim().parse::<usize>().map_err(|_| err());

        match trimmed.split_once(['-', ':']) {
            Some((start, end)) => Ok(Self::new(parse(start)?, parse(end)?)),
            None => parse(trimmed).map(Self::single),
        }
    }
}

/// How ranges that do not fit the file are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Reject inverted ranges, line 0, and ranges past the last line.
    #[default]
    Strict,
    /// Inverted ranges match nothing; positions outside the file are ignored.
    Lenient,
}

/// Sorted, merged, non-overlapping ranges validated against a line count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<LineRange>,
}

impl RangeSet {
    /// Validate `ranges` against a file of `line_count` lines and merge them.
    ///
    /// Overlapping and adjacent ranges collapse into one, so each covered
    /// position is counted once.
    pub fn normalize(
        ranges: &[LineRange],
        line_count: usize,
        policy: RangePolicy,
    ) -> Result<Self, EditError> {
        let mut clipped = Vec::with_capacity(ranges.len());

        for &range in ranges {
            match policy {
                RangePolicy::Strict => {
                    if range.start == 0 {
                        return Err(EditError::InvalidRange {
                            range,
                            reason: "line numbers start at 1",
                        });
                    }
                    if range.is_inverted() {
                        return Err(EditError::InvalidRange {
                            range,
                            reason: "start is after end",
                        });
                    }
                    if range.end > line_count {
                        return Err(EditError::RangeOutOfBounds { range, line_count });
                    }
                    clipped.push(range);
                }
                RangePolicy::Lenient => {
                    let start = range.start.max(1);
                    let end = range.end.min(line_count);
                    if start <= end {
                        clipped.push(LineRange::new(start, end));
                    }
                }
            }
        }

        Ok(Self {
            ranges: merge(clipped),
        })
    }

    /// The merged ranges, in ascending order.
    #[must_use]
    pub fn ranges(&self) -> &[LineRange] {
        &self.ranges
    }

    /// Total number of distinct lines covered.
    #[must_use]
    pub fn covered_lines(&self) -> usize {
        self.ranges.iter().map(LineRange::len).sum()
    }

    /// Check whether a 1-indexed line is covered by any range.
    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end < line);
        self.ranges.get(idx).is_some_and(|r| r.contains(line))
    }

    /// `true` when no line is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn merge(mut ranges: Vec<LineRange>) -> Vec<LineRange> {
    ranges.sort_unstable();
    let mut merged: Vec<LineRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end.saturating_add(1) => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}
