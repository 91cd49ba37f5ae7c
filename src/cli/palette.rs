//! CLI dispatch for the `bucketfill palette` command.

use std::process::ExitCode;

use crate::color::{format_hex, parse_color};
use crate::config::BucketConfig;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the palette command.
pub fn run_palette(config: &BucketConfig, json: bool) -> ExitCode {
    let mut entries = Vec::with_capacity(config.palette.swatches.len());
    for swatch in &config.palette.swatches {
        match parse_color(swatch) {
            Ok(color) => entries.push((swatch.as_str(), format_hex(color))),
            Err(e) => {
                eprintln!("Error: swatch '{}': {}", swatch, e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    if json {
        let swatches: Vec<_> = entries
            .iter()
            .map(|(name, hex)| serde_json::json!({ "name": name, "hex": hex }))
            .collect();
        let value = serde_json::json!({
            "default": config.palette.default,
            "swatches": swatches,
        });
        println!("{}", value);
    } else {
        println!("Default: {}", config.palette.default);
        for (name, hex) in &entries {
            if *name == hex.as_str() {
                println!("  {}", hex);
            } else {
                println!("  {:<20} {}", name, hex);
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
