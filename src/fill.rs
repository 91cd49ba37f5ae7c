//! Scanline flood fill over a [`PixelBuffer`].
//!
//! The fill works span by span: each popped row seed is widened to the full
//! horizontal run of fillable pixels, the run is painted, and at most one new
//! row seed is pushed per contiguous run of fillable pixels directly above and
//! below it. The work stack is an explicit `Vec`, so region size never
//! touches the call stack.

use image::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::color::{is_painted, is_wall, matches, DEFAULT_TOLERANCE, DEFAULT_WALL_THRESHOLD};

/// Error type for fill requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    /// Seed point outside the buffer; nothing was written
    #[error("seed ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
}

/// Matching thresholds shared by every fill in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillSettings {
    /// Per-channel tolerance for joining the seed's region
    pub tolerance: u8,
    /// Pixels with R, G and B all below this are outlines and never filled
    pub wall_threshold: u8,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            wall_threshold: DEFAULT_WALL_THRESHOLD,
        }
    }
}

/// A single paint-bucket click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillRequest {
    pub x: i64,
    pub y: i64,
    /// Paint color; alpha is ignored and written as 255
    pub color: Rgba<u8>,
    pub settings: FillSettings,
}

impl FillRequest {
    /// Request with default tolerance and wall threshold.
    pub fn new(x: i64, y: i64, color: Rgba<u8>) -> Self {
        Self {
            x,
            y,
            color,
            settings: FillSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: FillSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.settings.tolerance = tolerance;
        self
    }

    pub fn with_wall_threshold(mut self, wall_threshold: u8) -> Self {
        self.settings.wall_threshold = wall_threshold;
        self
    }
}

/// Work done by a fill that painted something.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FillStats {
    /// Pixels painted
    pub pixels: usize,
    /// Horizontal spans processed
    pub spans: usize,
}

/// What a fill request did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The seed's region was painted
    Filled(FillStats),
    /// The seed is an outline pixel; buffer untouched
    Wall,
    /// The seed already has the paint color; buffer untouched
    AlreadyFilled,
}

impl FillOutcome {
    /// True when the buffer was left untouched.
    pub fn is_noop(&self) -> bool {
        !matches!(self, FillOutcome::Filled(_))
    }

    /// Number of pixels painted (0 for no-ops).
    pub fn pixels(&self) -> usize {
        match self {
            FillOutcome::Filled(stats) => stats.pixels,
            _ => 0,
        }
    }
}

/// Validate a request without touching the buffer.
///
/// Returns `Ok(Some(outcome))` when the request is a no-op (wall seed or
/// already painted), `Ok(None)` when a fill would paint, and an error when the
/// seed is outside the buffer.
pub fn check_seed(
    buffer: &PixelBuffer,
    request: &FillRequest,
) -> Result<Option<FillOutcome>, FillError> {
    let seed = buffer.get(request.x, request.y).map_err(|_| FillError::OutOfBounds {
        x: request.x,
        y: request.y,
        width: buffer.width(),
        height: buffer.height(),
    })?;

    if is_wall(seed, request.settings.wall_threshold) {
        return Ok(Some(FillOutcome::Wall));
    }
    if is_painted(seed, request.color) {
        return Ok(Some(FillOutcome::AlreadyFilled));
    }
    Ok(None)
}

/// Paint the 4-connected region around the seed in place.
///
/// The region is every pixel reachable from the seed through pixels that
/// match the seed's original color within `tolerance` and are not walls.
/// All validation happens before the first write.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    request: &FillRequest,
) -> Result<FillOutcome, FillError> {
    if let Some(noop) = check_seed(buffer, request)? {
        log::debug!("fill at ({}, {}) skipped: {:?}", request.x, request.y, noop);
        return Ok(noop);
    }
    Ok(FillOutcome::Filled(fill_region(buffer, request)))
}

/// Scanline fill for a request that already passed [`check_seed`] with
/// `Ok(None)` against this buffer.
pub(crate) fn fill_region(buffer: &mut PixelBuffer, request: &FillRequest) -> FillStats {
    // check_seed guarantees the seed is in bounds
    let (x, y) = (request.x as usize, request.y as usize);
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;

    let scan = Scan {
        start: buffer.pixel_at(y * width + x),
        tolerance: request.settings.tolerance,
        wall_threshold: request.settings.wall_threshold,
    };
    let mut visited = vec![false; buffer.pixel_count()];
    let mut stack: Vec<(usize, usize)> = vec![(x, y)];
    let mut stats = FillStats::default();

    while let Some((cx, cy)) = stack.pop() {
        let row = cy * width;

        // Another span may have painted this seed since it was pushed
        if !scan.fillable(buffer, &visited, row + cx) {
            continue;
        }

        let mut sx = cx;
        while sx > 0 && scan.fillable(buffer, &visited, row + sx - 1) {
            sx -= 1;
        }

        stats.spans += 1;
        let span_start = sx;
        let mut span_up = false;
        let mut span_down = false;

        while sx < width && scan.fillable(buffer, &visited, row + sx) {
            let index = row + sx;
            buffer.paint_at(index, request.color);
            visited[index] = true;
            stats.pixels += 1;

            if cy > 0 {
                if scan.fillable(buffer, &visited, index - width) {
                    if !span_up {
                        stack.push((sx, cy - 1));
                        span_up = true;
                    }
                } else {
                    span_up = false;
                }
            }

            if cy + 1 < height {
                if scan.fillable(buffer, &visited, index + width) {
                    if !span_down {
                        stack.push((sx, cy + 1));
                        span_down = true;
                    }
                } else {
                    span_down = false;
                }
            }

            sx += 1;
        }

        log::trace!("span y={} x={}..{}", cy, span_start, sx);
    }

    log::debug!(
        "filled {} pixels in {} spans from ({}, {})",
        stats.pixels,
        stats.spans,
        request.x,
        request.y
    );
    stats
}

/// Per-fill matching state. `start` is captured before any write.
struct Scan {
    start: Rgba<u8>,
    tolerance: u8,
    wall_threshold: u8,
}

impl Scan {
    #[inline]
    fn fillable(&self, buffer: &PixelBuffer, visited: &[bool], index: usize) -> bool {
        if visited[index] {
            return false;
        }
        let color = buffer.pixel_at(index);
        matches(color, self.start, self.tolerance) && !is_wall(color, self.wall_threshold)
    }
}
