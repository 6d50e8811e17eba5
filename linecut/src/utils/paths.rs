//! Path utilities for linecut.
//!
//! Display normalization plus the containment checks applied when a
//! `--root` boundary is configured.

use std::path::{Component, Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use linecut::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src-tauri\\src\\lib.rs")), "src-tauri/src/lib.rs");
/// assert_eq!(normalize_display_path(Path::new("./src/main.rs")), "src/main.rs");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Validates that an existing path is contained within `root`.
///
/// # Errors
///
/// Returns an error if the path or root cannot be canonicalized,
/// or if the path lies outside the root.
pub fn validate_path_within_root(path: &Path, root: &Path) -> anyhow::Result<PathBuf> {
    let canonical_path = path
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Failed to resolve path {}: {}", path.display(), e))?;
    let canonical_root = root
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Failed to resolve root {}: {}", root.display(), e))?;

    if canonical_path.starts_with(&canonical_root) {
        Ok(canonical_path)
    } else {
        anyhow::bail!(
            "Path traversal detected: {} is outside of {}",
            path.display(),
            root.display()
        )
    }
}

/// Validates a path that may not exist yet (an append target).
///
/// The longest existing ancestor is canonicalized and must lie inside
/// `root`; the missing remainder may not contain `..`.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved, if the existing part
/// escapes the root, or if the missing part contains `..`.
pub fn validate_target_path(path: &Path, root: &Path) -> anyhow::Result<PathBuf> {
    if path.exists() {
        return validate_path_within_root(path, root);
    }

    let canonical_root = root
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Failed to resolve root {}: {}", root.display(), e))?;
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut ancestor = absolute_path.as_path();
    while !ancestor.exists() {
        match ancestor.parent() {
            Some(p) => ancestor = p,
            None => break,
        }
    }

    let canonical_ancestor = ancestor.canonicalize().map_err(|e| {
        anyhow::anyhow!("Failed to resolve ancestor {}: {}", ancestor.display(), e)
    })?;
    if !canonical_ancestor.starts_with(&canonical_root) {
        anyhow::bail!(
            "Path traversal detected: {} is outside of {}",
            path.display(),
            root.display()
        );
    }

    let remainder = absolute_path.strip_prefix(ancestor)?;
    if remainder
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        anyhow::bail!(
            "Path contains '..' in non-existent portion: '{}'",
            path.display()
        );
    }

    Ok(canonical_ancestor.join(remainder))
}
