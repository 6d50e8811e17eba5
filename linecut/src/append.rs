//! Appending literal text to the end of a file.

use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::EditError;
use crate::utils::normalize_display_path;

/// Options for [`append_text_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendOptions {
    /// Insert a `\n` first when the file does not already end with one.
    pub ensure_newline: bool,
}

/// Outcome of an append.
#[derive(Debug, Clone, Serialize)]
pub struct AppendReport {
    /// File that was appended to.
    pub path: String,
    /// Bytes written, separator included.
    pub bytes_appended: usize,
    /// `true` when the file did not exist before.
    pub created: bool,
    /// `true` when a newline was inserted before the text.
    pub separator_added: bool,
}

/// Append `text` verbatim to `path`, creating the file if needed.
pub fn append_text(path: impl AsRef<Path>, text: &str) -> Result<AppendReport, EditError> {
    append_text_with(path, text, &AppendOptions::default())
}

/// Append `text` to `path`.
///
/// The content is not inspected; the file grows by exactly the reported
/// number of bytes.
pub fn append_text_with(
    path: impl AsRef<Path>,
    text: &str,
    options: &AppendOptions,
) -> Result<AppendReport, EditError> {
    let path = path.as_ref();
    let created = !path.exists();

    let separator_added =
        options.ensure_newline && !created && needs_newline(path)? && !text.is_empty();

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| EditError::io("open", path, e))?;

    if separator_added {
        file.write_all(b"\n")
            .map_err(|e| EditError::io("append to", path, e))?;
    }
    file.write_all(text.as_bytes())
        .map_err(|e| EditError::io("append to", path, e))?;

    Ok(AppendReport {
        path: normalize_display_path(path),
        bytes_appended: text.len() + usize::from(separator_added),
        created,
        separator_added,
    })
}

fn needs_newline(path: &Path) -> Result<bool, EditError> {
    let existing = fs::read(path).map_err(|e| EditError::io("read", path, e))?;
    Ok(existing.last().is_some_and(|&b| b != b'\n'))
}
