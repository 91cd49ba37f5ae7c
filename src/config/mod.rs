//! Configuration module for bucketfill
//!
//! Provides types, discovery and parsing for `bucketfill.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
