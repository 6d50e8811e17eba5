//! `linecut append`.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::append::{append_text_with, AppendOptions, AppendReport};
use crate::output::{print_append, print_json};

/// Where the appended text comes from.
#[derive(Debug, Clone)]
pub enum AppendSource {
    /// Literal text from the command line.
    Text(String),
    /// Contents of another file.
    File(PathBuf),
}

impl Default for AppendSource {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Options for the append command.
#[derive(Debug, Clone, Default)]
pub struct AppendCommandOptions {
    /// File to append to.
    pub path: PathBuf,
    /// Text to append.
    pub source: AppendSource,
    /// Start on a fresh line.
    pub ensure_newline: bool,
    /// Output JSON.
    pub json: bool,
    /// Print diagnostics to stderr.
    pub verbose: bool,
    /// Containment boundary.
    pub root: Option<PathBuf>,
}

/// Append text to a file.
///
/// # Errors
///
/// Returns an error if the target escapes the root, the source file cannot
/// be read, or the append fails.
pub fn run_append<W: Write>(options: &AppendCommandOptions, mut writer: W) -> Result<AppendReport> {
    super::check_target(&options.path, options.root.as_ref(), options.verbose)?;

    let text = match &options.source {
        AppendSource::Text(text) => text.clone(),
        AppendSource::File(from) => fs::read_to_string(from)
            .with_context(|| format!("failed to read {}", from.display()))?,
    };

    if options.verbose {
        eprintln!(
            "[VERBOSE] Appending {} bytes to {}",
            text.len(),
            options.path.display()
        );
    }

    let report = append_text_with(
        &options.path,
        &text,
        &AppendOptions {
            ensure_newline: options.ensure_newline,
        },
    )?;

    if options.json {
        print_json(&mut writer, &report)?;
    } else {
        print_append(&mut writer, &report)?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_append_from_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("lib.rs");
        let stubs = dir.path().join("stubs.rs");
        fs::write(&target, "fn a() {}\n").unwrap();
        fs::write(&stubs, "fn b() {}\n").unwrap();

        let options = AppendCommandOptions {
            path: target.clone(),
            source: AppendSource::File(stubs),
            ..AppendCommandOptions::default()
        };
        let report = run_append(&options, Vec::new()).unwrap();
        assert_eq!(report.bytes_appended, 10);
        assert_eq!(fs::read_to_string(&target).unwrap(), "fn a() {}\nfn b() {}\n");
    }

    #[test]
    fn test_run_append_missing_source_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("lib.rs");
        let options = AppendCommandOptions {
            path: target.clone(),
            source: AppendSource::File(dir.path().join("nope.rs")),
            ..AppendCommandOptions::default()
        };
        let err = run_append(&options, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("nope.rs"));
        assert!(!target.exists());
    }

    #[test]
    fn test_run_append_creates_inside_root() {
        let dir = TempDir::new().unwrap();
        let options = AppendCommandOptions {
            path: dir.path().join("new.rs"),
            source: AppendSource::Text("x\n".to_owned()),
            root: Some(dir.path().to_path_buf()),
            ..AppendCommandOptions::default()
        };
        let report = run_append(&options, Vec::new()).unwrap();
        assert!(report.created);
    }
}
