//! Core library for linecut.
//!
//! Removes 1-indexed, inclusive line ranges from a file in a single pass,
//! appends text to files, and turns function names into line ranges so
//! whole functions can be dropped without hand-counting lines.
//!
//! Every range refers to the file as it was read. Applying ranges one by one
//! against a shrinking file is the failure mode this crate exists to avoid.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Append text to files.
pub mod append;

/// Function block location (text scanner and tree-sitter).
pub mod blocks;

/// Module containing the CLI definition.
pub mod cli;

/// Module containing the CLI subcommand implementations.
pub mod commands;

/// Module for loading configuration.
pub mod config;

/// Shared constants.
pub mod constants;

/// Tree-sitter CST support for Rust sources.
pub mod cst;

/// Shared entry point used by every binary.
pub mod entry_point;

/// Library error type.
pub mod error;

/// Single-pass line rewriting.
pub mod fix;

/// Byte offset / line number mapping.
pub mod lines;

/// Module for console output.
pub mod output;

/// Line ranges, validation policy and merging.
pub mod ranges;

/// Range removal on files.
pub mod remover;

/// Path helpers.
pub mod utils;

pub use append::{append_text, append_text_with, AppendOptions, AppendReport};
pub use blocks::{find_duplicates, locate_blocks, remove_blocks, Block, BlockOptions, Duplicate};
pub use error::EditError;
pub use ranges::{LineRange, RangePolicy, RangeSet};
pub use remover::{remove_ranges, remove_ranges_with, RemovalReport, RemoveOptions};
