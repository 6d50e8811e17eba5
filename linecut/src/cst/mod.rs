//! Tree-sitter based function location for Rust sources.
//!
//! The grammar gives exact item boundaries, so strings, comments and macro
//! bodies never confuse the brace count. Sources that do not parse cleanly
//! are left to the text scanner.
//!
//! # Feature Gate
//!
//! This module is only available with the `cst` feature enabled (on by
//! default):
//! ```bash
//! cargo build --features cst
//! ```

#[cfg(feature = "cst")]
mod functions;
#[cfg(feature = "cst")]
mod parser;

#[cfg(feature = "cst")]
pub use functions::{function_signatures, locate_functions};
#[cfg(feature = "cst")]
pub use parser::{CstError, CstNode, CstParser, CstTree, Point};
