//! PNG import/export and output path generation

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::buffer::{BufferError, PixelBuffer};

/// Error type for image loading and saving
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Decoded image cannot back a pixel buffer (e.g. zero-sized)
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),
}

/// Decode an image file (PNG or any format `image` reads) into a pixel buffer.
pub fn load_png(path: &Path) -> Result<PixelBuffer, OutputError> {
    let image = image::open(path)?.to_rgba8();
    let buffer = PixelBuffer::try_from(image)?;
    log::debug!("loaded {} ({}x{})", path.display(), buffer.width(), buffer.height());
    Ok(buffer)
}

/// Save a pixel buffer to a PNG file, creating parent directories as needed.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    buffer
        .to_rgba_image()?
        .save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Generate the output path for a filled image.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_stem}{suffix}.png` next to the input |
/// | `-o out.png` | `out.png` |
/// | `-o dir/` | `dir/{input_stem}{suffix}.png` |
pub fn generate_output_path(input: &Path, output_arg: Option<&Path>, suffix: &str) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = format!("{}{}.png", input_stem, suffix);

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => {
            let parent = input.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                PathBuf::from(file_name)
            } else {
                parent.join(file_name)
            }
        }
    }
}
