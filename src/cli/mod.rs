//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod fill;
mod palette;
mod probe;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, BucketConfig, CliOverrides};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Bucketfill - paint-bucket fills on raster images, with undo/redo
#[derive(Parser)]
#[command(name = "bucketfill")]
#[command(about = "Bucketfill - paint-bucket fills on raster images, with undo/redo")]
#[command(version)]
pub struct Cli {
    /// Path to a bucketfill.toml (default: search upwards, then XDG config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply fill/undo/redo/reset steps to an image and save the result as PNG
    Fill {
        /// Input image (PNG or any format the image decoder reads)
        input: PathBuf,

        /// Step to apply, in order: X,Y=COLOR, X,Y (default color), undo, redo, reset
        /// (e.g. --step 10,12=#3a86ff --step undo)
        #[arg(
            short,
            long = "step",
            value_name = "STEP",
            required = true,
            allow_hyphen_values = true
        )]
        steps: Vec<String>,

        /// Output file or directory.
        /// If omitted: {input}_filled.png next to the input
        /// If directory (ends with /): dir/{input}_filled.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Per-channel color tolerance (0-255, default from config or 24)
        #[arg(long)]
        tolerance: Option<u8>,

        /// Outline threshold: pixels with R, G, B all below it are never filled
        #[arg(long)]
        wall_threshold: Option<u8>,

        /// Number of undo steps kept (default from config or 30)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        history: Option<u64>,

        /// Color used by steps that name none
        #[arg(short, long)]
        color: Option<String>,

        /// Print a JSON report of every step
        #[arg(long)]
        json: bool,

        /// Run the steps but do not write the output image
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the color at a pixel and whether it counts as an outline
    Probe {
        /// Input image
        input: PathBuf,

        /// Pixel coordinate: X,Y
        #[arg(value_name = "X,Y")]
        at: String,

        /// Outline threshold (default from config or 40)
        #[arg(long)]
        wall_threshold: Option<u8>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the configured palette swatches
    Palette {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Fill {
            input,
            steps,
            output,
            tolerance,
            wall_threshold,
            history,
            color,
            json,
            dry_run,
        } => {
            let overrides = CliOverrides {
                tolerance,
                wall_threshold,
                history: history.map(|h| h as usize),
                color,
            };
            let config = match resolve_config(config_path, &overrides) {
                Ok(c) => c,
                Err(code) => return code,
            };
            fill::run_fill(&input, &steps, output.as_deref(), &config, json, dry_run)
        }
        Commands::Probe {
            input,
            at,
            wall_threshold,
            json,
        } => {
            let overrides = CliOverrides {
                wall_threshold,
                ..Default::default()
            };
            let config = match resolve_config(config_path, &overrides) {
                Ok(c) => c,
                Err(code) => return code,
            };
            probe::run_probe(&input, &at, &config, json)
        }
        Commands::Palette { json } => {
            let config = match resolve_config(config_path, &CliOverrides::default()) {
                Ok(c) => c,
                Err(code) => return code,
            };
            palette::run_palette(&config, json)
        }
    }
}

/// Load the config file (explicit or discovered) and apply CLI overrides.
fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<BucketConfig, ExitCode> {
    let mut config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    merge_cli_overrides(&mut config, overrides);
    Ok(config)
}
