//! Line indexing over source text.
//!
//! Lines keep their terminators, so slicing a line and writing it back
//! reproduces the original bytes exactly. A trailing newline does not start
//! an extra empty line, matching how editors number lines.

/// Maps 1-indexed line numbers to byte spans.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset at which each line starts.
    line_starts: Vec<usize>,
    /// Total length of the indexed text.
    len: usize,
}

impl LineIndex {
    /// Build the index by scanning for `\n`. `\r\n` stays attached to its line.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = Vec::new();
        if !source.is_empty() {
            line_starts.push(0);
        }
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' && i + 1 < source.len() {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Number of lines in the text.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte span `start..end` of a 1-indexed line, terminator included.
    #[must_use]
    pub fn line_span(&self, line: usize) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self.line_starts.get(line).copied().unwrap_or(self.len);
        Some((start, end))
    }

    /// Byte span covering lines `first..=last`.
    #[must_use]
    pub fn lines_span(&self, first: usize, last: usize) -> Option<(usize, usize)> {
        if first > last {
            return None;
        }
        let (start, _) = self.line_span(first)?;
        let (_, end) = self.line_span(last)?;
        Some((start, end))
    }

    /// 1-indexed line containing the byte at `offset`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }
}

/// Text of a 1-indexed line with its terminator stripped.
#[must_use]
pub fn line_text<'a>(source: &'a str, index: &LineIndex, line: usize) -> Option<&'a str> {
    let (start, end) = index.line_span(line)?;
    let raw = &source[start..end];
    let raw = raw.strip_suffix('\n').unwrap_or(raw);
    Some(raw.strip_suffix('\r').unwrap_or(raw))
}
