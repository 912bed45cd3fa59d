//! Pixel storage and the geometric primitives analysis runs over
//!
//! This module contains:
//! - The immutable RGBA pixel buffer
//! - Regions and grid candidates that slice a sheet into cells
//! - Per-cell content bitmasks

/// Read-only RGBA pixel storage
pub mod buffer;
/// Content-pixel bitmasks over a region
pub mod mask;
/// Regions, grid modes and grid candidates
pub mod region;

pub use buffer::PixelBuffer;
pub use region::{GridCandidate, GridMode, Region};
