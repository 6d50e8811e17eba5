//! Commands module - CLI subcommand implementations.
//!
//! Each command takes fully resolved options (config already merged with
//! flags), performs the edit through the library API and reports to the
//! given writer.

mod append;
mod blocks;
mod remove;

pub use append::{run_append, AppendCommandOptions, AppendSource};
pub use blocks::{
    run_blocks, run_duplicates, run_locate, BlockCommandOptions, DuplicatesCommandOptions,
};
pub use remove::{run_remove, RemoveCommandOptions};

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::utils::{validate_path_within_root, validate_target_path};

/// Enforce the `--root` boundary on an existing target.
fn check_existing(path: &Path, root: Option<&PathBuf>, verbose: bool) -> Result<()> {
    if let Some(root) = root {
        let resolved = validate_path_within_root(path, root)?;
        if verbose {
            eprintln!("[VERBOSE] Target resolved to {}", resolved.display());
        }
    }
    Ok(())
}

/// Enforce the `--root` boundary on a target that may not exist yet.
fn check_target(path: &Path, root: Option<&PathBuf>, verbose: bool) -> Result<()> {
    if let Some(root) = root {
        let resolved = validate_target_path(path, root)?;
        if verbose {
            eprintln!("[VERBOSE] Target resolved to {}", resolved.display());
        }
    }
    Ok(())
}
