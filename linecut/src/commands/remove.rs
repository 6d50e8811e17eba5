//! `linecut remove`.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use crate::output::{print_json, print_removal};
use crate::ranges::{LineRange, RangePolicy};
use crate::remover::{remove_ranges_with, RemovalReport, RemoveOptions};

/// Options for the remove command.
#[derive(Debug, Clone, Default)]
pub struct RemoveCommandOptions {
    /// File to edit.
    pub path: PathBuf,
    /// Ranges as given, numbered against the unedited file.
    pub ranges: Vec<LineRange>,
    /// Range validation policy.
    pub policy: RangePolicy,
    /// Preview only.
    pub dry_run: bool,
    /// Output JSON.
    pub json: bool,
    /// Print diagnostics to stderr.
    pub verbose: bool,
    /// Containment boundary.
    pub root: Option<PathBuf>,
}

/// Remove line ranges from a single file.
///
/// # Errors
///
/// Returns an error if the target escapes the root, a range is rejected,
/// or file I/O fails. The file is left untouched on error.
pub fn run_remove<W: Write>(options: &RemoveCommandOptions, mut writer: W) -> Result<RemovalReport> {
    super::check_existing(&options.path, options.root.as_ref(), options.verbose)?;

    if options.verbose {
        eprintln!(
            "[VERBOSE] Removing {} range(s) from {} ({:?})",
            options.ranges.len(),
            options.path.display(),
            options.policy
        );
    }

    let report = remove_ranges_with(
        &options.path,
        &options.ranges,
        &RemoveOptions {
            policy: options.policy,
            dry_run: options.dry_run,
        },
    )?;

    if options.json {
        print_json(&mut writer, &report)?;
    } else {
        print_removal(&mut writer, &report)?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options(path: PathBuf, ranges: Vec<LineRange>) -> RemoveCommandOptions {
        RemoveCommandOptions {
            path,
            ranges,
            ..RemoveCommandOptions::default()
        }
    }

    #[test]
    fn test_run_remove_json() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("lib.rs");
        fs::write(&file, "a\nb\nc\n").unwrap();

        let mut opts = options(file.clone(), vec![LineRange::single(2)]);
        opts.json = true;
        let mut out = Vec::new();
        let report = run_remove(&opts, &mut out).unwrap();

        assert_eq!(report.stats.removed_lines, 1);
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["removed_lines"], 1);
        assert_eq!(json["applied"][0]["start"], 2);
        assert_eq!(fs::read_to_string(&file).unwrap(), "a\nc\n");
    }

    #[test]
    fn test_run_remove_outside_root_is_refused() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("project");
        fs::create_dir_all(&root).unwrap();
        let file = dir.path().join("outside.rs");
        fs::write(&file, "a\n").unwrap();

        let mut opts = options(file.clone(), vec![LineRange::single(1)]);
        opts.root = Some(root);
        assert!(run_remove(&opts, Vec::new()).is_err());
        assert_eq!(fs::read_to_string(&file).unwrap(), "a\n");
    }

    #[test]
    fn test_run_remove_lenient_drops_inverted() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("lib.rs");
        fs::write(&file, "a\nb\nc\n").unwrap();

        let mut opts = options(file.clone(), vec![LineRange::new(3, 2)]);
        opts.policy = RangePolicy::Lenient;
        let report = run_remove(&opts, Vec::new()).unwrap();
        assert_eq!(report.stats.removed_lines, 0);
        assert_eq!(fs::read_to_string(&file).unwrap(), "a\nb\nc\n");
    }
}
