//! CLI dispatch for the `bucketfill fill` command.
//!
//! Loads the image, replays the steps through one edit session and writes
//! the final buffer.

use std::path::Path;
use std::process::ExitCode;

use crate::color::parse_color;
use crate::config::BucketConfig;
use crate::output::{generate_output_path, load_png, save_png};
use crate::session::EditSession;
use crate::step::{Step, StepReport};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the fill command.
pub fn run_fill(
    input: &Path,
    raw_steps: &[String],
    output: Option<&Path>,
    config: &BucketConfig,
    json: bool,
    dry_run: bool,
) -> ExitCode {
    // Parse every step up front so a typo never leaves a half-written image
    let mut steps = Vec::with_capacity(raw_steps.len());
    for raw in raw_steps {
        match raw.parse::<Step>() {
            Ok(step) => steps.push(step),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    let default_color = match parse_color(&config.palette.default) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid default color '{}': {}", config.palette.default, e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let buffer = match load_png(input) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut session = EditSession::new(buffer, config.fill, config.history.capacity);
    let mut reports: Vec<StepReport> = Vec::with_capacity(steps.len());

    for (i, step) in steps.into_iter().enumerate() {
        match session.apply_step(step, default_color) {
            Ok(report) => {
                log::info!("step {}: {}", i + 1, report);
                reports.push(report);
            }
            Err(e) => {
                log::warn!("step {} ('{}') rejected", i + 1, raw_steps[i]);
                eprintln!("Error: step {} ('{}'): {}", i + 1, raw_steps[i], e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    let output_path = generate_output_path(input, output, &config.output.suffix);

    if json {
        let summary = serde_json::json!({
            "input": input.display().to_string(),
            "output": if dry_run { None } else { Some(output_path.display().to_string()) },
            "width": session.current().width(),
            "height": session.current().height(),
            "undo_depth": session.history().undo_len(),
            "redo_depth": session.history().redo_len(),
            "steps": reports,
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for report in &reports {
            println!("{}", report);
        }
    }

    if dry_run {
        return ExitCode::from(EXIT_SUCCESS);
    }

    if let Err(e) = save_png(session.current(), &output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    if json {
        eprintln!("Saved: {}", output_path.display());
    } else {
        println!("Saved: {}", output_path.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}
