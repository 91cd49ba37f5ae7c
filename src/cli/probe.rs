//! CLI dispatch for the `bucketfill probe` command.

use std::path::Path;
use std::process::ExitCode;

use crate::color::{format_hex, is_wall};
use crate::config::BucketConfig;
use crate::output::load_png;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Parse an `X,Y` coordinate pair.
fn parse_point(s: &str) -> Option<(i64, i64)> {
    let (x, y) = s.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Execute the probe command.
pub fn run_probe(input: &Path, at: &str, config: &BucketConfig, json: bool) -> ExitCode {
    let Some((x, y)) = parse_point(at) else {
        eprintln!("Error: invalid coordinate '{}', expected X,Y", at);
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let buffer = match load_png(input) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let color = match buffer.get(x, y) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let wall = is_wall(color, config.fill.wall_threshold);

    if json {
        let value = serde_json::json!({
            "x": x,
            "y": y,
            "rgba": color.0,
            "hex": format_hex(color),
            "wall": wall,
        });
        println!("{}", value);
    } else {
        let kind = if wall { "outline" } else { "fillable" };
        println!(
            "({}, {}): {} alpha {} ({})",
            x,
            y,
            format_hex(color),
            color[3],
            kind
        );
    }

    ExitCode::from(EXIT_SUCCESS)
}
