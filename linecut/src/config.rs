use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILENAME;
use crate::ranges::RangePolicy;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[linecut]` section.
    pub linecut: LinecutConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
    /// Why a config file that was found could not be used.
    #[serde(skip)]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
/// Configuration options for linecut.
pub struct LinecutConfig {
    /// Clamp or drop ranges that do not fit instead of rejecting them.
    pub lenient: Option<bool>,
    /// Extend located blocks over leading attributes and doc comments.
    pub include_attributes: Option<bool>,
    /// Separate appended text from an unterminated last line.
    pub ensure_newline: Option<bool>,
}

impl LinecutConfig {
    /// Range policy selected by `lenient`.
    #[must_use]
    pub fn policy(&self) -> RangePolicy {
        if self.lenient.unwrap_or(false) {
            RangePolicy::Lenient
        } else {
            RangePolicy::Strict
        }
    }
}

impl Config {
    /// Loads configuration from the current directory upward.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// The first `.linecut.toml` found wins. If it cannot be read or parsed,
    /// defaults are used and [`Config::warning`] explains why.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                let parsed = fs::read_to_string(&candidate)
                    .map_err(|e| e.to_string())
                    .and_then(|content| {
                        toml::from_str::<Config>(&content).map_err(|e| e.to_string())
                    });
                return match parsed {
                    Ok(mut config) => {
                        config.config_file_path = Some(candidate);
                        config
                    }
                    Err(reason) => Config {
                        warning: Some(format!(
                            "ignoring {}: {}",
                            candidate.display(),
                            reason.trim_end()
                        )),
                        ..Config::default()
                    },
                };
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}
