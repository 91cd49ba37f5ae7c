//! Packed RGBA pixel buffer that fills operate on.
//!
//! Samples are stored row-major, four bytes per pixel (red, green, blue,
//! alpha). `(x, y)` lives at pixel index `y * width + x`.

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Error type for pixel buffer access and construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Coordinate outside the buffer (negative coordinates included)
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    /// Raw sample data does not cover exactly width * height pixels
    #[error("expected {expected} bytes for {width}x{height} buffer, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    /// Width or height is zero
    #[error("buffer dimensions must be non-zero, got {width}x{height}")]
    Empty { width: u32, height: u32 },
    /// width * height * 4 does not fit in memory addressing
    #[error("buffer dimensions {width}x{height} are too large")]
    TooLarge { width: u32, height: u32 },
}

/// Byte length of a width x height RGBA buffer.
fn byte_len(width: u32, height: u32) -> Result<usize, BufferError> {
    if width == 0 || height == 0 {
        return Err(BufferError::Empty { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or(BufferError::TooLarge { width, height })
}

/// A width x height grid of RGBA8 samples.
///
/// `Clone` is a deep copy; history snapshots never share storage with the
/// live buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: Rgba<u8>) -> Result<Self, BufferError> {
        let len = byte_len(width, height)?;
        let data = fill.0.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap raw row-major RGBA bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(BufferError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (width * height).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `(x, y)` addresses a pixel of this buffer.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Get the color at (x, y).
    pub fn get(&self, x: i64, y: i64) -> Result<Rgba<u8>, BufferError> {
        let index = self.index_of(x, y)?;
        Ok(self.pixel_at(index))
    }

    /// Paint (x, y) with `color`. Paint is always opaque: alpha is written as 255.
    pub fn set(&mut self, x: i64, y: i64, color: Rgba<u8>) -> Result<(), BufferError> {
        let index = self.index_of(x, y)?;
        self.paint_at(index, color);
        Ok(())
    }

    /// Raw row-major RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Copy into an `image` crate buffer for encoding.
    pub fn to_rgba_image(&self) -> Result<RgbaImage, BufferError> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or(
            BufferError::TooLarge {
                width: self.width,
                height: self.height,
            },
        )
    }

    fn index_of(&self, x: i64, y: i64) -> Result<usize, BufferError> {
        if !self.contains(x, y) {
            return Err(BufferError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Color at a pixel index. The index must be below `pixel_count()`.
    #[inline]
    pub(crate) fn pixel_at(&self, index: usize) -> Rgba<u8> {
        let i = index * 4;
        Rgba([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Opaque write at a pixel index. The index must be below `pixel_count()`.
    #[inline]
    pub(crate) fn paint_at(&mut self, index: usize, color: Rgba<u8>) {
        let i = index * 4;
        self.data[i] = color[0];
        self.data[i + 1] = color[1];
        self.data[i + 2] = color[2];
        self.data[i + 3] = 255;
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = BufferError;

    fn try_from(image: RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        Self::from_raw(width, height, image.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_new_fills_every_pixel() {
        let buf = PixelBuffer::new(3, 2, Rgba([1, 2, 3, 4])).unwrap();
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.pixel_count(), 6);
        assert_eq!(buf.as_raw().len(), 24);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buf.get(x, y).unwrap(), Rgba([1, 2, 3, 4]));
            }
        }
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert_eq!(
            PixelBuffer::new(0, 4, WHITE),
            Err(BufferError::Empty {
                width: 0,
                height: 4,
            })
        );
    }

    #[test]
    fn test_from_raw_size_mismatch() {
        let result = PixelBuffer::from_raw(2, 2, vec![0; 15]);
        assert_eq!(
            result,
            Err(BufferError::SizeMismatch {
                width: 2,
                height: 2,
                expected: 16,
                actual: 15,
            })
        );
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let huge = 1 << 31;
        let expected = Err(BufferError::TooLarge {
            width: huge,
            height: huge,
        });
        assert_eq!(PixelBuffer::from_raw(huge, huge, Vec::new()), expected);
        assert_eq!(PixelBuffer::new(huge, huge, WHITE), expected);
    }

    #[test]
    fn test_oversized_error_message() {
        let err = PixelBuffer::from_raw(u32::MAX, u32::MAX, vec![0; 4]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "buffer dimensions 4294967295x4294967295 are too large"
        );
    }

    #[test]
    fn test_row_major_layout() {
        let mut buf = PixelBuffer::new(4, 3, WHITE).unwrap();
        buf.set(2, 1, Rgba([9, 8, 7, 255])).unwrap();
        let i = (4 + 2) * 4;
        assert_eq!(&buf.as_raw()[i..i + 4], &[9, 8, 7, 255]);
    }

    #[test]
    fn test_set_forces_opaque() {
        let mut buf = PixelBuffer::new(2, 2, Rgba([0, 0, 0, 0])).unwrap();
        buf.set(1, 1, Rgba([10, 20, 30, 0])).unwrap();
        assert_eq!(buf.get(1, 1).unwrap(), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut buf = PixelBuffer::new(2, 3, WHITE).unwrap();
        assert_eq!(
            buf.get(2, 0),
            Err(BufferError::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 3,
            })
        );
        assert!(buf.get(0, 3).is_err());
        assert!(buf.get(-1, 0).is_err());
        assert!(buf.set(0, -1, WHITE).is_err());
        assert!(buf.contains(1, 2));
        assert!(!buf.contains(1, 3));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut buf = PixelBuffer::new(2, 2, WHITE).unwrap();
        let snapshot = buf.clone();
        buf.set(0, 0, Rgba([1, 1, 1, 255])).unwrap();
        assert_eq!(snapshot.get(0, 0).unwrap(), WHITE);
        assert_ne!(snapshot, buf);
    }

    #[test]
    fn test_rgba_image_round_trip() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(1, 1, Rgba([5, 6, 7, 8]));
        let buf = PixelBuffer::try_from(image.clone()).unwrap();
        assert_eq!(buf.get(1, 1).unwrap(), Rgba([5, 6, 7, 8]));
        assert_eq!(buf.to_rgba_image().unwrap(), image);
    }
}
