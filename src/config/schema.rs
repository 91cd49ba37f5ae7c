//! Configuration schema types for `bucketfill.toml`
//!
//! Defines the structure and validation rules for fill, history, palette and
//! output settings. Every section is optional.

use serde::{Deserialize, Serialize};

use crate::color::parse_color;
use crate::fill::FillSettings;
use crate::history::DEFAULT_CAPACITY;

/// Undo history section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of undo steps kept in memory
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Palette section: the swatches offered to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Color used when a fill step names no color
    #[serde(default = "default_color")]
    pub default: String,
    /// Available swatches, as hex or CSS color strings
    #[serde(default = "default_swatches")]
    pub swatches: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            default: default_color(),
            swatches: default_swatches(),
        }
    }
}

fn default_color() -> String {
    "#ff1f1f".to_string()
}

fn default_swatches() -> Vec<String> {
    ["#ff1f1f", "#ff9f1c", "#ffd60a", "#2ec4b6", "#3a86ff", "#8338ec", "#8d6e63", "#ffffff"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Output section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Suffix appended to the input file stem when no output path is given
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
        }
    }
}

fn default_suffix() -> String {
    "_filled".to_string()
}

/// Complete bucketfill.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BucketConfig {
    /// Tolerance and wall threshold
    #[serde(default)]
    pub fill: FillSettings,
    /// Undo history settings
    #[serde(default)]
    pub history: HistoryConfig,
    /// Palette swatches
    #[serde(default)]
    pub palette: PaletteConfig,
    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "palette.swatches[2]")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bucketfill.toml: '{}' {}", self.field, self.message)
    }
}

impl BucketConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.history.capacity == 0 {
            errors.push(ConfigValidationError {
                field: "history.capacity".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if let Err(e) = parse_color(&self.palette.default) {
            errors.push(ConfigValidationError {
                field: "palette.default".to_string(),
                message: format!("is not a valid color: {}", e),
            });
        }

        for (i, swatch) in self.palette.swatches.iter().enumerate() {
            if let Err(e) = parse_color(swatch) {
                errors.push(ConfigValidationError {
                    field: format!("palette.swatches[{}]", i),
                    message: format!("is not a valid color: {}", e),
                });
            }
        }

        if self.output.suffix.is_empty() {
            errors.push(ConfigValidationError {
                field: "output.suffix".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        errors
    }

    /// Check if the configuration is valid
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
