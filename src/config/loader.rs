//! Configuration loading and discovery for `bucketfill.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::BucketConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "bucketfill.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse bucketfill.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", bullet_list(.0))]
    Validation(Vec<String>),
}

fn bullet_list(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override fill tolerance
    pub tolerance: Option<u8>,
    /// Override wall threshold
    pub wall_threshold: Option<u8>,
    /// Override undo history capacity
    pub history: Option<usize>,
    /// Override the default palette color
    pub color: Option<String>,
}

/// Find bucketfill.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for bucketfill.toml
/// 2. Check XDG_CONFIG_HOME/bucketfill/bucketfill.toml (or ~/.config/bucketfill/bucketfill.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find bucketfill.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("bucketfill").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find bucketfill.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a bucketfill.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the
/// defaults.
pub fn load_config(path: Option<&Path>) -> Result<BucketConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(BucketConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<BucketConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: BucketConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut BucketConfig, overrides: &CliOverrides) {
    if let Some(tolerance) = overrides.tolerance {
        config.fill.tolerance = tolerance;
    }

    if let Some(wall_threshold) = overrides.wall_threshold {
        config.fill.wall_threshold = wall_threshold;
    }

    if let Some(history) = overrides.history {
        config.history.capacity = history;
    }

    if let Some(ref color) = overrides.color {
        config.palette.default = color.clone();
    }
}
