//! Shared constants.

/// Per-project configuration file, looked up from the target file upward.
pub const CONFIG_FILENAME: &str = ".linecut.toml";

/// Extension of files handled by the tree-sitter locator.
pub const RUST_EXTENSION: &str = "rs";

/// Opening of an outer doc comment line.
pub const DOC_COMMENT_PREFIX: &str = "///";

/// Node kinds that declare a function in the Rust grammar.
pub const FUNCTION_KINDS: &[&str] = &["function_item", "function_signature_item"];
