//! `linecut locate`, `linecut blocks` and `linecut duplicates`.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use crate::blocks::{
    find_duplicates_in_file, locate_blocks_in_file, remove_blocks, BlockOptions,
    BlockRemovalReport, BlockRemoveOptions, BlockScan, DuplicateScan,
};
use crate::output::{print_blocks, print_duplicates, print_json, print_missing, print_removal};
use crate::ranges::RangePolicy;
use crate::utils::normalize_display_path;

/// Options for the block commands.
#[derive(Debug, Clone, Default)]
pub struct BlockCommandOptions {
    /// Source file.
    pub path: PathBuf,
    /// Function names.
    pub names: Vec<String>,
    /// Include leading attributes and doc comments.
    pub include_attributes: bool,
    /// Strict: unknown names fail. Lenient: they are reported.
    pub policy: RangePolicy,
    /// Preview only (`blocks`).
    pub dry_run: bool,
    /// Output JSON.
    pub json: bool,
    /// Print diagnostics to stderr.
    pub verbose: bool,
    /// Containment boundary.
    pub root: Option<PathBuf>,
}

impl BlockCommandOptions {
    fn block_options(&self, policy: RangePolicy) -> BlockOptions {
        BlockOptions {
            include_attributes: self.include_attributes,
            policy,
        }
    }
}

/// List where the named functions are. Unknown names are reported, never fatal.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a body is unterminated.
pub fn run_locate<W: Write>(options: &BlockCommandOptions, mut writer: W) -> Result<BlockScan> {
    super::check_existing(&options.path, options.root.as_ref(), options.verbose)?;

    let scan = locate_blocks_in_file(
        &options.path,
        &options.names,
        &options.block_options(RangePolicy::Lenient),
    )?;
    if options.verbose {
        eprintln!(
            "[VERBOSE] {} block(s) found with the {} locator",
            scan.blocks.len(),
            scan.locator
        );
    }

    if options.json {
        print_json(&mut writer, &scan)?;
    } else {
        print_blocks(&mut writer, &normalize_display_path(&options.path), &scan)?;
    }
    Ok(scan)
}

/// Remove the named functions in a single pass.
///
/// # Errors
///
/// Returns an error if the target escapes the root, a name is missing under
/// the strict policy, or file I/O fails.
pub fn run_blocks<W: Write>(
    options: &BlockCommandOptions,
    mut writer: W,
) -> Result<BlockRemovalReport> {
    super::check_existing(&options.path, options.root.as_ref(), options.verbose)?;

    let report = remove_blocks(
        &options.path,
        &options.names,
        &BlockRemoveOptions {
            block: options.block_options(options.policy),
            dry_run: options.dry_run,
        },
    )?;
    if options.verbose {
        for block in &report.blocks {
            eprintln!("[VERBOSE] {} -> lines {}", block.name, block.range);
        }
    }

    if options.json {
        print_json(&mut writer, &report)?;
    } else {
        print_removal(&mut writer, &report.removal)?;
        print_missing(&mut writer, &report.missing)?;
    }
    Ok(report)
}

/// Options for `linecut duplicates`.
#[derive(Debug, Clone, Default)]
pub struct DuplicatesCommandOptions {
    /// Source file.
    pub path: PathBuf,
    /// Output JSON.
    pub json: bool,
    /// Print diagnostics to stderr.
    pub verbose: bool,
    /// Containment boundary.
    pub root: Option<PathBuf>,
}

/// List function names defined more than once.
///
/// # Errors
///
/// Returns an error if the target escapes the root or cannot be read.
pub fn run_duplicates<W: Write>(
    options: &DuplicatesCommandOptions,
    mut writer: W,
) -> Result<DuplicateScan> {
    super::check_existing(&options.path, options.root.as_ref(), options.verbose)?;

    let scan = find_duplicates_in_file(&options.path)?;
    if options.verbose {
        eprintln!(
            "[VERBOSE] {} function(s) scanned with the {} locator",
            scan.functions, scan.locator
        );
    }

    if options.json {
        print_json(&mut writer, &scan)?;
    } else {
        print_duplicates(&mut writer, &normalize_display_path(&options.path), &scan)?;
    }
    Ok(scan)
}
