//! Bucketfill - paint-bucket region fill for raster images
//!
//! This library provides functionality to:
//! - Hold an image as a packed RGBA [`buffer::PixelBuffer`]
//! - Flood fill a clicked region with tolerance-aware matching that stops at
//!   dark outlines ([`fill::flood_fill`])
//! - Undo and redo fills through a bounded snapshot history
//!   ([`history::HistoryStore`], [`session::EditSession`])

pub mod buffer;
pub mod cli;
pub mod color;
pub mod config;
pub mod fill;
pub mod history;
pub mod output;
pub mod session;
pub mod step;
