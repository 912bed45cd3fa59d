//! Alpha-channel profiles along each axis and the boundary hints they carry
//!
//! A column (or row) whose transparent fraction jumps sharply from its
//! neighbour often sits on a cell boundary. The hints are advisory: anti-aliased
//! or noisy art produces spurious jumps, and grid search has the final say.

use crate::raster::buffer::PixelBuffer;
use crate::raster::region::GridCandidate;
use ndarray::Axis;
use serde::Serialize;

/// Per-axis transparency profiles and the discontinuities found in them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransparencyProfile {
    /// Fully transparent fraction of each column (length = width)
    pub horizontal: Vec<f64>,
    /// Fully transparent fraction of each row (length = height)
    pub vertical: Vec<f64>,
    /// Column indices where the horizontal profile jumps
    pub column_breaks: Vec<usize>,
    /// Row indices where the vertical profile jumps
    pub row_breaks: Vec<usize>,
}

impl TransparencyProfile {
    /// Grid dimensions implied by the breaks: `(column breaks + 1, row breaks + 1)`
    pub fn suggested_grid(&self) -> (usize, usize) {
        (self.column_breaks.len() + 1, self.row_breaks.len() + 1)
    }

    /// The suggested grid as a candidate, if it fits in `u32`
    pub fn suggested_candidate(&self) -> Option<GridCandidate> {
        let (cols, rows) = self.suggested_grid();
        GridCandidate::new(u32::try_from(cols).ok()?, u32::try_from(rows).ok()?).ok()
    }
}

/// Fully transparent (alpha == 0) fraction of every column
pub fn horizontal_profile(buffer: &PixelBuffer) -> Vec<f64> {
    transparent_fraction(buffer, Axis(0))
}

/// Fully transparent (alpha == 0) fraction of every row
pub fn vertical_profile(buffer: &PixelBuffer) -> Vec<f64> {
    transparent_fraction(buffer, Axis(1))
}

fn transparent_fraction(buffer: &PixelBuffer, axis: Axis) -> Vec<f64> {
    buffer
        .alpha_plane()
        .mapv(|alpha| if alpha == 0 { 1.0 } else { 0.0 })
        .mean_axis(axis)
        .map(|means| means.to_vec())
        .unwrap_or_default()
}

/// Indices `i >= 1` where `|profile[i] - profile[i - 1]| > jump_threshold`
pub fn find_discontinuities(profile: &[f64], jump_threshold: f64) -> Vec<usize> {
    profile
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| match pair {
            [previous, current] if (current - previous).abs() > jump_threshold => Some(i + 1),
            _ => None,
        })
        .collect()
}

/// Profile both axes and locate their discontinuities
pub fn profile_transparency(buffer: &PixelBuffer, jump_threshold: f64) -> TransparencyProfile {
    let horizontal = horizontal_profile(buffer);
    let vertical = vertical_profile(buffer);
    let column_breaks = find_discontinuities(&horizontal, jump_threshold);
    let row_breaks = find_discontinuities(&vertical, jump_threshold);

    tracing::debug!(
        column_breaks = column_breaks.len(),
        row_breaks = row_breaks.len(),
        "transparency profiled"
    );

    TransparencyProfile {
        horizontal,
        vertical,
        column_breaks,
        row_breaks,
    }
}
