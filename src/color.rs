//! Color parsing and matching for palette colors and fill boundaries
//!
//! Palette colors are always opaque. Supported input formats:
//! - Hex: `#RGB`, `#RRGGBB`
//! - Functional: `rgb()`, `hsl()`, `hwb()`, `oklch()` (alpha is discarded)
//! - Named: `red`, `rebeccapurple`, etc.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// Default per-channel tolerance; absorbs anti-aliasing fuzz next to outlines.
pub const DEFAULT_TOLERANCE: u8 = 24;

/// Default channel ceiling below which a pixel counts as an outline.
pub const DEFAULT_WALL_THRESHOLD: u8 = 40;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a palette color string into an opaque RGBA color.
///
/// # Examples
///
/// ```
/// use bucketfill::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("#ff1f1f").unwrap(), image::Rgba([255, 31, 31, 255]));
/// assert_eq!(parse_color("blue").unwrap(), image::Rgba([0, 0, 255, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    parse_css_color(s)
}

/// Parse a hex color string (#RGB, #RRGGBB). Alpha is always 255.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    match hex.len() {
        3 => {
            // #RGB -> #RRGGBB (doubled digits)
            let digits: Vec<u8> = hex.bytes().map(hex_value).collect();
            Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, 255]))
        }
        6 => {
            let bytes = hex.as_bytes();
            let r = hex_value(bytes[0]) * 16 + hex_value(bytes[1]);
            let g = hex_value(bytes[2]) * 16 + hex_value(bytes[3]);
            let b = hex_value(bytes[4]) * 16 + hex_value(bytes[5]);
            Ok(Rgba([r, g, b, 255]))
        }
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgb(css_color)
}

/// Convert a lightningcss CssColor to an opaque RGBA color
fn css_color_to_rgb(color: CssColor) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, 255])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let r = (rgb.r * 255.0).round() as u8;
                let g = (rgb.g * 255.0).round() as u8;
                let b = (rgb.b * 255.0).round() as u8;
                Ok(Rgba([r, g, b, 255]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

/// Value of an ASCII hex digit. Callers validate the digit first.
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

/// Format a color as lowercase `#rrggbb`, dropping alpha.
pub fn format_hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// True when every channel (including alpha) differs by at most `tolerance`.
#[inline]
pub fn matches(a: Rgba<u8>, b: Rgba<u8>, tolerance: u8) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= tolerance)
}

/// True for near-black outline pixels. Alpha is not considered.
#[inline]
pub fn is_wall(color: Rgba<u8>, wall_threshold: u8) -> bool {
    color[0] < wall_threshold && color[1] < wall_threshold && color[2] < wall_threshold
}

/// Exact "already painted" test: same RGB as `paint` and fully opaque.
///
/// Deliberately stricter than [`matches`]; a seed that is merely close to the
/// paint color still gets filled.
#[inline]
pub fn is_painted(seed: Rgba<u8>, paint: Rgba<u8>) -> bool {
    seed[0] == paint[0] && seed[1] == paint[1] && seed[2] == paint[2] && seed[3] == 255
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_color("#F00"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("#abc"), Ok(Rgba([170, 187, 204, 255])));
    }

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(parse_color("#ff1f1f"), Ok(Rgba([255, 31, 31, 255])));
        assert_eq!(parse_color("#00FF7f"), Ok(Rgba([0, 255, 127, 255])));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_color("  #000 "), Ok(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_parse_rejects_alpha_hex() {
        assert_eq!(parse_color("#F00F"), Err(ColorError::InvalidLength(4)));
        assert_eq!(parse_color("#FF000080"), Err(ColorError::InvalidLength(8)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("#GG0000"), Err(ColorError::InvalidHex('G')));
        assert_eq!(parse_color("#"), Err(ColorError::InvalidLength(0)));
        assert_eq!(parse_hex_color("ff0000"), Err(ColorError::MissingHash));
        assert!(matches!(parse_color("notacolor"), Err(ColorError::CssParse(_))));
    }

    #[test]
    fn test_parse_css_forces_opaque() {
        assert_eq!(parse_color("red"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("rgba(0, 128, 0, 0.5)"), Ok(Rgba([0, 128, 0, 255])));
        assert_eq!(parse_color("transparent").map(|c| c[3]), Ok(255));
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex(Rgba([255, 31, 31, 255])), "#ff1f1f");
        assert_eq!(format_hex(Rgba([0, 0, 0, 0])), "#000000");
    }

    #[test]
    fn test_matches_within_tolerance() {
        let white = Rgba([255, 255, 255, 255]);
        assert!(matches(white, Rgba([231, 231, 231, 255]), 24));
        assert!(!matches(white, Rgba([230, 255, 255, 255]), 24));
        assert!(matches(white, white, 0));
    }

    #[test]
    fn test_matches_includes_alpha() {
        let opaque = Rgba([10, 10, 10, 255]);
        let faded = Rgba([10, 10, 10, 200]);
        assert!(!matches(opaque, faded, 24));
        assert!(matches(opaque, faded, 55));
    }

    #[test]
    fn test_is_wall() {
        assert!(is_wall(Rgba([0, 0, 0, 255]), 40));
        assert!(is_wall(Rgba([39, 39, 39, 0]), 40));
        assert!(!is_wall(Rgba([40, 0, 0, 255]), 40));
        assert!(!is_wall(Rgba([0, 0, 0, 255]), 0));
    }

    #[test]
    fn test_is_painted_is_exact() {
        let red = Rgba([255, 0, 0, 255]);
        assert!(is_painted(red, red));
        assert!(is_painted(red, Rgba([255, 0, 0, 0])));
        assert!(!is_painted(Rgba([254, 0, 0, 255]), red));
        assert!(!is_painted(Rgba([255, 0, 0, 254]), red));
    }
}
