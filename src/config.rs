//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <path>`, else `$XDG_CONFIG_HOME/mansion/mansion.toml`
//! 3. Environment variables: `MANSION_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for mansion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Room to start exploring from (default: the entrance)
    pub start_room: Option<String>,
    /// Consecutive failed reads tolerated before input counts as exhausted
    pub max_read_failures: u32,
    /// Print a closing line once the mansion has been released
    pub farewell: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_room: None,
            max_read_failures: 3,
            farewell: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub start_room: Option<String>,
    pub max_read_failures: Option<u32>,
    pub farewell: Option<bool>,
}

/// Get the XDG config directory for mansion.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mansion").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mansion.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());
    PathBuf::from(expanded)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            start_room: overlay
                .start_room
                .clone()
                .or_else(|| self.start_room.clone()),
            max_read_failures: overlay.max_read_failures.unwrap_or(self.max_read_failures),
            farewell: overlay.farewell.unwrap_or(self.farewell),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist. When `None`, the
    ///   global config file is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`Settings::load`], but `MANSION_*` variables come from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        match config_file {
            Some(path) => {
                let path = expand_path(&path.to_string_lossy());
                debug!("loading config file {}", path.display());
                current = current.merge_with(&load_raw_settings(&path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        debug!("loading global config {}", global_path.display());
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply MANSION_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MANSION")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("start_room") {
            settings.start_room = Some(val);
        }
        if let Ok(val) = config.get_string("max_read_failures") {
            settings.max_read_failures = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("MANSION_MAX_READ_FAILURES={}: {}", val, e),
            })?;
        }
        if let Ok(val) = config.get_string("farewell") {
            settings.farewell = val
                .trim()
                .to_ascii_lowercase()
                .parse()
                .map_err(|e| ApplicationError::Config {
                    message: format!("MANSION_FAREWELL={}: {}", val, e),
                })?;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_read_failures == 0 {
            return Err(ApplicationError::Config {
                message: "max_read_failures must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
