//! Scripted editing steps: `X,Y=COLOR`, `X,Y`, `undo`, `redo`, `reset`.
//!
//! Used by the command line to replay a sequence of clicks and history
//! commands against an [`EditSession`].

use std::str::FromStr;

use image::Rgba;
use serde::Serialize;
use thiserror::Error;

use crate::color::{format_hex, parse_color, ColorError};
use crate::fill::{FillError, FillOutcome};
use crate::session::EditSession;

/// Error type for step parsing and application
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The step string is not one of the recognised forms
    #[error("invalid step '{0}', expected X,Y[=COLOR], undo, redo or reset")]
    Syntax(String),
    /// A coordinate is not an integer
    #[error("invalid coordinate '{0}'")]
    Coordinate(String),
    /// The color part failed to parse
    #[error("invalid color in step '{step}': {source}")]
    Color { step: String, source: ColorError },
    /// The fill itself was rejected
    #[error(transparent)]
    Fill(#[from] FillError),
}

/// One editing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Paint-bucket click; `None` uses the session's default color
    Fill {
        x: i64,
        y: i64,
        color: Option<Rgba<u8>>,
    },
    Undo,
    Redo,
    Reset,
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "undo" => return Ok(Step::Undo),
            "redo" => return Ok(Step::Redo),
            "reset" => return Ok(Step::Reset),
            _ => {}
        }

        let (coords, color) = match trimmed.split_once('=') {
            Some((coords, color)) => (coords, Some(color)),
            None => (trimmed, None),
        };

        let (x, y) = coords.split_once(',').ok_or_else(|| StepError::Syntax(s.to_string()))?;
        let x = parse_coordinate(x)?;
        let y = parse_coordinate(y)?;

        let color = match color {
            Some(c) => Some(parse_color(c).map_err(|source| StepError::Color {
                step: s.to_string(),
                source,
            })?),
            None => None,
        };

        Ok(Step::Fill { x, y, color })
    }
}

fn parse_coordinate(s: &str) -> Result<i64, StepError> {
    s.trim().parse::<i64>().map_err(|_| StepError::Coordinate(s.trim().to_string()))
}

/// What a step did, in a form suitable for `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum StepReport {
    Fill {
        x: i64,
        y: i64,
        color: String,
        /// "filled", "wall" or "already_filled"
        result: &'static str,
        pixels: usize,
    },
    Undo { applied: bool },
    Redo { applied: bool },
    Reset,
}

impl std::fmt::Display for StepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepReport::Fill {
                x,
                y,
                color,
                result,
                pixels,
            } => match *result {
                "filled" => write!(f, "fill ({}, {}) {}: {} pixels", x, y, color, pixels),
                "wall" => write!(f, "fill ({}, {}) {}: outline, skipped", x, y, color),
                _ => write!(f, "fill ({}, {}) {}: already that color, skipped", x, y, color),
            },
            StepReport::Undo { applied: true } => write!(f, "undo"),
            StepReport::Undo { applied: false } => write!(f, "undo: nothing to undo"),
            StepReport::Redo { applied: true } => write!(f, "redo"),
            StepReport::Redo { applied: false } => write!(f, "redo: nothing to redo"),
            StepReport::Reset => write!(f, "reset"),
        }
    }
}

impl EditSession {
    /// Apply a parsed step, painting with `default_color` when a fill step
    /// names none.
    pub fn apply_step(
        &mut self,
        step: Step,
        default_color: Rgba<u8>,
    ) -> Result<StepReport, StepError> {
        let report = match step {
            Step::Fill { x, y, color } => {
                let color = color.unwrap_or(default_color);
                let outcome = self.fill_at(x, y, color)?;
                let result = match outcome {
                    FillOutcome::Filled(_) => "filled",
                    FillOutcome::Wall => "wall",
                    FillOutcome::AlreadyFilled => "already_filled",
                };
                StepReport::Fill {
                    x,
                    y,
                    color: format_hex(color),
                    result,
                    pixels: outcome.pixels(),
                }
            }
            Step::Undo => StepReport::Undo {
                applied: self.undo(),
            },
            Step::Redo => StepReport::Redo {
                applied: self.redo(),
            },
            Step::Reset => {
                self.reset();
                StepReport::Reset
            }
        };
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::fill::FillSettings;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_parse_fill_with_color() {
        let step: Step = "3,4=#00f".parse().unwrap();
        assert_eq!(
            step,
            Step::Fill {
                x: 3,
                y: 4,
                color: Some(Rgba([0, 0, 255, 255])),
            }
        );
    }

    #[test]
    fn test_parse_fill_without_color() {
        assert_eq!(
            " 10 , 0 ".parse::<Step>(),
            Ok(Step::Fill {
                x: 10,
                y: 0,
                color: None,
            })
        );
    }

    #[test]
    fn test_parse_negative_coordinates() {
        // Parsed; rejected later as out of bounds
        assert_eq!(
            "-1,2".parse::<Step>(),
            Ok(Step::Fill {
                x: -1,
                y: 2,
                color: None,
            })
        );
    }

    #[test]
    fn test_parse_history_commands() {
        assert_eq!("undo".parse::<Step>(), Ok(Step::Undo));
        assert_eq!("REDO".parse::<Step>(), Ok(Step::Redo));
        assert_eq!("reset".parse::<Step>(), Ok(Step::Reset));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("fill".parse::<Step>(), Err(StepError::Syntax("fill".to_string())));
        assert_eq!("a,2".parse::<Step>(), Err(StepError::Coordinate("a".to_string())));
        assert_eq!("1.5,2".parse::<Step>(), Err(StepError::Coordinate("1.5".to_string())));
        assert!(matches!("1,2=#12".parse::<Step>(), Err(StepError::Color { .. })));
    }

    #[test]
    fn test_apply_steps() {
        let base = PixelBuffer::new(3, 3, WHITE).unwrap();
        let mut session = EditSession::new(base.clone(), FillSettings::default(), 30);

        let report = session.apply_step("1,1".parse().unwrap(), RED).unwrap();
        assert_eq!(
            report,
            StepReport::Fill {
                x: 1,
                y: 1,
                color: "#ff0000".to_string(),
                result: "filled",
                pixels: 9,
            }
        );

        let report = session.apply_step("0,0=#f00".parse().unwrap(), WHITE).unwrap();
        assert_eq!(report.to_string(), "fill (0, 0) #ff0000: already that color, skipped");

        let undone = StepReport::Undo { applied: true };
        assert_eq!(session.apply_step(Step::Undo, RED).unwrap(), undone);
        assert_eq!(session.current(), &base);
        let nothing = StepReport::Undo { applied: false };
        assert_eq!(session.apply_step(Step::Undo, RED).unwrap(), nothing);
        let redone = StepReport::Redo { applied: true };
        assert_eq!(session.apply_step(Step::Redo, RED).unwrap(), redone);
        assert_eq!(session.apply_step(Step::Reset, RED).unwrap(), StepReport::Reset);
        assert_eq!(session.current(), &base);
    }

    #[test]
    fn test_apply_out_of_bounds() {
        let base = PixelBuffer::new(2, 2, WHITE).unwrap();
        let mut session = EditSession::new(base, FillSettings::default(), 30);
        let err = session.apply_step("5,5".parse().unwrap(), RED).unwrap_err();
        assert!(matches!(err, StepError::Fill(FillError::OutOfBounds { x: 5, y: 5, .. })));
    }

    #[test]
    fn test_report_json() {
        let report = StepReport::Fill {
            x: 1,
            y: 2,
            color: "#ff0000".to_string(),
            result: "wall",
            pixels: 0,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["step"], "fill");
        assert_eq!(json["result"], "wall");
        assert_eq!(json["pixels"], 0);

        let json = serde_json::to_value(StepReport::Undo { applied: false }).unwrap();
        assert_eq!(json, serde_json::json!({"step": "undo", "applied": false}));
    }
}
