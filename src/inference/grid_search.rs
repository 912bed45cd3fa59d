//! Ranks hypothesised grid layouts by how well they split a sheet into content cells
//!
//! A candidate scores `content_cells * mean_coverage`, where content cells are
//! those whose coverage exceeds the configured minimum. Candidates are scored
//! independently (in parallel) and ranked by a stable descending sort, so
//! equal scores keep the order of the input list.

use crate::analysis::coverage::coverage;
use crate::analysis::transparency::TransparencyProfile;
use crate::io::configuration::{AnalysisConfig, DEFAULT_GRID_CANDIDATES};
use crate::raster::buffer::PixelBuffer;
use crate::raster::region::{GridCandidate, GridMode};
use rayon::prelude::*;
use serde::Serialize;

/// Score of one evaluated grid candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridScore {
    /// The evaluated grid
    pub candidate: GridCandidate,
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// Cells whose coverage exceeds the content threshold
    pub content_cells: usize,
    /// Mean coverage over content cells; 0.0 when there are none
    pub mean_coverage: f64,
    /// `content_cells * mean_coverage`
    pub score: f64,
}

/// Result of a grid search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "ranking", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Evaluated candidates, best first
    Ranked(Vec<GridScore>),
    /// No candidate produced a single content cell; structure undetermined
    NoViableGrid,
}

impl SearchOutcome {
    /// Highest-ranked candidate
    pub fn best(&self) -> Option<&GridScore> {
        self.scores().first()
    }

    /// Ranked scores; empty for `NoViableGrid`
    pub fn scores(&self) -> &[GridScore] {
        match self {
            Self::Ranked(scores) => scores,
            Self::NoViableGrid => &[],
        }
    }

    /// Whether any grid was inferred
    pub const fn is_viable(&self) -> bool {
        matches!(self, Self::Ranked(_))
    }
}

/// Default candidate list: square grids up to 16x16 plus common sheet layouts
pub fn default_candidates() -> Vec<GridCandidate> {
    let mut candidates: Vec<GridCandidate> = Vec::with_capacity(DEFAULT_GRID_CANDIDATES.len());
    for &(cols, rows) in DEFAULT_GRID_CANDIDATES {
        if let Ok(candidate) = GridCandidate::new(cols, rows) {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

/// Append the transparency profile's suggested grid when the list lacks it
pub fn with_profile_hint(
    mut candidates: Vec<GridCandidate>,
    profile: &TransparencyProfile,
) -> Vec<GridCandidate> {
    if let Some(hint) = profile.suggested_candidate() {
        if !candidates.contains(&hint) {
            tracing::debug!(grid = %hint, "adding transparency hint to candidates");
            candidates.push(hint);
        }
    }
    candidates
}

/// Score one candidate, or `None` when the grid mode or minimum cell size rules it out
pub fn evaluate_candidate(
    buffer: &PixelBuffer,
    candidate: &GridCandidate,
    config: &AnalysisConfig,
) -> Option<GridScore> {
    let (width, height) = (buffer.width(), buffer.height());
    if config.grid_mode == GridMode::Exact && !candidate.divides(width, height) {
        tracing::trace!(grid = %candidate, "rejected: doesn't divide {width}x{height}");
        return None;
    }

    let (cell_width, cell_height) = candidate.cell_size(width, height);
    if cell_width < config.min_cell_size || cell_height < config.min_cell_size {
        tracing::trace!(
            grid = %candidate,
            "rejected: {cell_width}x{cell_height} cells below {} px",
            config.min_cell_size
        );
        return None;
    }

    let regions = candidate.cells(width, height).ok()?;
    let (content_cells, total_coverage) = regions
        .iter()
        .map(|region| coverage(buffer, region, config.alpha_threshold))
        .filter(|&ratio| ratio > config.min_content_coverage)
        .fold((0usize, 0.0), |(count, sum), ratio| (count + 1, sum + ratio));

    let mean_coverage = if content_cells == 0 {
        0.0
    } else {
        total_coverage / content_cells as f64
    };

    Some(GridScore {
        candidate: *candidate,
        cell_width,
        cell_height,
        content_cells,
        mean_coverage,
        score: content_cells as f64 * mean_coverage,
    })
}

/// Evaluate `candidates` and rank them by score, best first
///
/// Ties keep input order. Returns `NoViableGrid` when no candidate
/// yields any content cell.
pub fn search_grids(
    buffer: &PixelBuffer,
    candidates: &[GridCandidate],
    config: &AnalysisConfig,
) -> SearchOutcome {
    let mut scores: Vec<GridScore> = candidates
        .par_iter()
        .filter_map(|candidate| evaluate_candidate(buffer, candidate, config))
        .collect();

    if scores.iter().all(|score| score.content_cells == 0) {
        tracing::debug!(
            evaluated = scores.len(),
            "no candidate produced content cells"
        );
        return SearchOutcome::NoViableGrid;
    }

    scores.sort_by(|a, b| b.score.total_cmp(&a.score));

    if let Some(best) = scores.first() {
        tracing::debug!(
            grid = %best.candidate,
            score = best.score,
            evaluated = scores.len(),
            "grid search ranked"
        );
    }
    SearchOutcome::Ranked(scores)
}
