//! Text-level function block scanner for brace-delimited sources.
//!
//! Works without a grammar: a lexing pass marks which bytes are code (as
//! opposed to comments and string/char literals), and braces are only
//! counted on code bytes.

use regex::Regex;

use super::{Block, BlockOptions};
use crate::constants::DOC_COMMENT_PREFIX;
use crate::error::EditError;
use crate::lines::{line_text, LineIndex};
use crate::ranges::LineRange;

/// Marks every byte of `source` that is code rather than comment or literal.
#[must_use]
pub fn code_mask(source: &str) -> Vec<bool> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut mask = vec![true; len];
    let mut i = 0;

    while i < len {
        let next = bytes.get(i + 1).copied();
        let end = match bytes[i] {
            b'/' if next == Some(b'/') => bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(len, |p| i + p),
            b'/' if next == Some(b'*') => block_comment_end(bytes, i),
            b'"' => string_end(bytes, i + 1),
            b'r' | b'b' if !follows_ident(bytes, i) => match literal_prefix_end(bytes, i) {
                Some(end) => end,
                None => {
                    i += 1;
                    continue;
                }
            },
            b'\'' => match char_literal_end(source, i) {
                Some(end) => end,
                None => {
                    i += 1;
                    continue;
                }
            },
            _ => {
                i += 1;
                continue;
            }
        };
        for flag in &mut mask[i..end] {
            *flag = false;
        }
        i = end;
    }

    mask
}

fn follows_ident(bytes: &[u8], i: usize) -> bool {
    i > 0 && (bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_')
}

/// End (exclusive) of a nested `/* */` comment starting at `start`.
fn block_comment_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// End (exclusive) of a `"..."` body starting just after the opening quote.
fn string_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Handles `r"…"`, `r#"…"#`, `b"…"`, `br"…"` and `b'…'`.
fn literal_prefix_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    if bytes[i] == b'b' {
        i += 1;
        match bytes.get(i) {
            Some(b'"') => return Some(string_end(bytes, i + 1)),
            Some(b'\'') => return Some(string_end_with(bytes, i + 1, b'\'')),
            Some(b'r') => {}
            _ => return None,
        }
    }
    // raw string: r, hashes, quote
    i += 1;
    let hashes = bytes[i..].iter().take_while(|&&b| b == b'#').count();
    i += hashes;
    if bytes.get(i) != Some(&b'"') {
        return None;
    }
    i += 1;
    while i < bytes.len() {
        let closing = bytes[i + 1..].iter().take(hashes).filter(|&&b| b == b'#');
        if bytes[i] == b'"' && closing.count() == hashes {
            return Some(i + 1 + hashes);
        }
        i += 1;
    }
    Some(bytes.len())
}

fn string_end_with(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Distinguishes `'x'` / `'\n'` from lifetimes such as `'a`.
fn char_literal_end(source: &str, start: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    match bytes.get(start + 1)? {
        b'\\' => Some(string_end_with(bytes, start + 1, b'\'')),
        _ => {
            let ch = source.get(start + 1..)?.chars().next()?;
            let close = start + 1 + ch.len_utf8();
            (bytes.get(close) == Some(&b'\'')).then_some(close + 1)
        }
    }
}

/// Any identifier, raw identifiers included.
const ANY_NAME: &str = r"(?:r#)?[A-Za-z_][A-Za-z0-9_]*";

fn fn_regex(name_pattern: &str) -> Result<Regex, EditError> {
    Ok(Regex::new(&format!(r"\bfn\s+(?P<name>{name_pattern})\s*[<(]"))?)
}

/// Regex matching `fn <name>` followed by `(` or `<`, for any of `names`.
///
/// `Ok(None)` when `names` is empty.
pub(crate) fn signature_regex(names: &[String]) -> Result<Option<Regex>, EditError> {
    if names.is_empty() {
        return Ok(None);
    }
    let alternation = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    fn_regex(&alternation).map(Some)
}

/// Byte offset of the `}` or `;` that ends the item whose `fn` keyword is at `from`.
fn body_end(source: &str, mask: &[bool], from: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut nesting = 0i64;
    let mut braces = 0i64;

    for i in from..bytes.len() {
        if !mask[i] {
            continue;
        }
        match bytes[i] {
            b'(' | b'[' => nesting += 1,
            b')' | b']' => nesting -= 1,
            b';' if braces == 0 && nesting == 0 => return Some(i),
            b'{' => braces += 1,
            b'}' => {
                braces -= 1;
                if braces == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// First line of the attribute / doc comment run directly above `line`.
fn leading_attributes_start(source: &str, mask: &[bool], index: &LineIndex, line: usize) -> usize {
    let mut start = line;

    while start > 1 {
        let Some(text) = line_text(source, index, start - 1) else {
            break;
        };
        if is_outer_doc(text.trim()) {
            start -= 1;
            continue;
        }
        match attribute_opener(source.as_bytes(), mask, index, start - 1) {
            Some(first) => start = first,
            None => break,
        }
    }

    start
}

/// Line of the `#` that opens the attribute(s) ending `line`.
///
/// The last code byte of `line` must be a `]` whose bracket group is
/// preceded by `#`, and that `#` must be the first code on its line once
/// any earlier attributes sharing the line are walked over.
fn attribute_opener(bytes: &[u8], mask: &[bool], index: &LineIndex, line: usize) -> Option<usize> {
    let (line_start, line_end) = index.line_span(line)?;
    let mut close = last_code_byte(bytes, mask, line_start, line_end)?;

    loop {
        if bytes[close] != b']' {
            return None;
        }
        let open = matching_open(bytes, mask, close)?;
        let hash = last_code_byte(bytes, mask, 0, open)?;
        if bytes[hash] != b'#' {
            return None;
        }
        let hash_line = index.line_of(hash);
        match last_code_byte(bytes, mask, 0, hash) {
            Some(prev) if index.line_of(prev) == hash_line => close = prev,
            _ => return Some(hash_line),
        }
    }
}

/// Last non-whitespace code byte in `from..to`.
fn last_code_byte(bytes: &[u8], mask: &[bool], from: usize, to: usize) -> Option<usize> {
    (from..to)
        .rev()
        .find(|&i| mask[i] && !bytes[i].is_ascii_whitespace())
}

/// Offset of the `[` balancing the `]` at `close`.
fn matching_open(bytes: &[u8], mask: &[bool], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..close).rev() {
        if !mask[i] {
            continue;
        }
        match bytes[i] {
            b']' | b')' | b'}' => depth += 1,
            b'[' | b'(' | b'{' if depth > 0 => depth -= 1,
            b'[' => return Some(i),
            b'(' | b'{' => return None,
            _ => {}
        }
    }
    None
}

pub(crate) fn is_outer_doc(trimmed: &str) -> bool {
    trimmed.starts_with(DOC_COMMENT_PREFIX) && !trimmed.starts_with("////")
}

/// Locate every function named in `names` using the text scanner.
///
/// Returns all matches (a name may occur more than once, e.g. in several
/// `impl` blocks), sorted by position.
pub fn scan_blocks(
    source: &str,
    names: &[String],
    options: &BlockOptions,
) -> Result<Vec<Block>, EditError> {
    let Some(re) = signature_regex(names)? else {
        return Ok(Vec::new());
    };
    let mask = code_mask(source);
    let index = LineIndex::new(source);
    let mut blocks = Vec::new();

    for caps in re.captures_iter(source) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
            continue;
        };
        let fn_at = whole.start();
        if !mask[fn_at] {
            continue;
        }

        let signature_line = index.line_of(fn_at);
        let end = body_end(source, &mask, fn_at).ok_or_else(|| EditError::UnterminatedBlock {
            name: name.as_str().to_owned(),
            line: signature_line,
        })?;
        let start_line = if options.include_attributes {
            leading_attributes_start(source, &mask, &index, signature_line)
        } else {
            signature_line
        };

        blocks.push(Block {
            name: name.as_str().to_owned(),
            signature_line,
            range: LineRange::new(start_line, index.line_of(end)),
        });
    }

    Ok(blocks)
}

/// Every `fn` definition or signature on code bytes, as `(name, line)`.
pub(crate) fn scan_signatures(source: &str) -> Result<Vec<(String, usize)>, EditError> {
    let re = fn_regex(ANY_NAME)?;
    let mask = code_mask(source);
    let index = LineIndex::new(source);

    Ok(re
        .captures_iter(source)
        .filter_map(|caps| Some((caps.get(0)?.start(), caps.name("name")?)))
        .filter(|(at, _)| mask[*at])
        .map(|(at, name)| (name.as_str().to_owned(), index.line_of(at)))
        .collect())
}
