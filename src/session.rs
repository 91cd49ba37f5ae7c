//! Editing session: the live buffer, its pristine base image and the
//! undo/redo history, driven one request at a time.

use image::Rgba;

use crate::buffer::PixelBuffer;
use crate::fill::{
    check_seed, fill_region, FillError, FillOutcome, FillRequest, FillSettings,
};
use crate::history::HistoryStore;

/// Convert a device-pixel pointer position into a seed coordinate.
///
/// Fractional positions are floored. Non-finite input cannot address a pixel
/// and is rejected as out of bounds for the given buffer.
pub fn seed_from_pointer(buffer: &PixelBuffer, x: f64, y: f64) -> Result<(i64, i64), FillError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(FillError::OutOfBounds {
            x: i64::MIN,
            y: i64::MIN,
            width: buffer.width(),
            height: buffer.height(),
        });
    }
    // `as` saturates for values beyond the i64 range
    Ok((x.floor() as i64, y.floor() as i64))
}

/// One image being colored in.
#[derive(Debug, Clone)]
pub struct EditSession {
    base: PixelBuffer,
    current: PixelBuffer,
    history: HistoryStore,
    settings: FillSettings,
}

impl EditSession {
    /// Start a session on `base`. The base image is kept for [`reset`](Self::reset).
    pub fn new(base: PixelBuffer, settings: FillSettings, history_capacity: usize) -> Self {
        Self {
            current: base.clone(),
            base,
            history: HistoryStore::with_capacity(history_capacity),
            settings,
        }
    }

    /// The buffer as it should currently be displayed.
    pub fn current(&self) -> &PixelBuffer {
        &self.current
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn settings(&self) -> FillSettings {
        self.settings
    }

    /// Consume the session, returning the current buffer.
    pub fn into_current(self) -> PixelBuffer {
        self.current
    }

    /// Paint-bucket click at `(x, y)`.
    ///
    /// Out-of-bounds seeds fail before anything is recorded. Wall seeds and
    /// seeds that already carry the paint color are no-ops and leave the
    /// history untouched.
    pub fn fill_at(&mut self, x: i64, y: i64, color: Rgba<u8>) -> Result<FillOutcome, FillError> {
        let request = FillRequest::new(x, y, color).with_settings(self.settings);
        if let Some(noop) = check_seed(&self.current, &request)? {
            log::debug!("click at ({}, {}) ignored: {:?}", x, y, noop);
            return Ok(noop);
        }

        self.history.snapshot(&self.current);
        Ok(FillOutcome::Filled(fill_region(&mut self.current, &request)))
    }

    /// Restore the previous state. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.current) {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone state. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.current) {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    /// Go back to the original image. The reset itself can be undone.
    pub fn reset(&mut self) {
        self.history.snapshot(&self.current);
        self.current = self.base.clone();
    }
}
