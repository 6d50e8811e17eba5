//! Utilities module for linecut.

mod paths;

pub use paths::{normalize_display_path, validate_path_within_root, validate_target_path};
