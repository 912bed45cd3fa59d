//! One full analysis pass over a sheet: profile, search, classify, summarize

use crate::analysis::distribution::{AlphaSummary, ContentDistribution, content_distribution};
use crate::analysis::transparency::{TransparencyProfile, profile_transparency};
use crate::inference::classifier::{CellRecord, classify_cells};
use crate::inference::grid_search::{SearchOutcome, search_grids, with_profile_hint};
use crate::inference::summary::ClassificationSummary;
use crate::io::configuration::{AnalysisConfig, TOP_CELLS_REPORTED};
use crate::io::error::Result;
use crate::raster::buffer::PixelBuffer;
use crate::raster::region::GridCandidate;

/// Where the analysed grid came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridChoice {
    /// Infer the grid by searching these candidates (plus the transparency hint)
    Search,
    /// Skip the search and classify this grid
    Forced(GridCandidate),
}

/// Everything learned about one sheet
#[derive(Debug, Clone)]
pub struct SheetAnalysis {
    /// Alpha channel tallies
    pub alpha: AlphaSummary,
    /// Content bounds and color statistics, `None` for a blank sheet
    pub distribution: Option<ContentDistribution>,
    /// Transparency profiles and boundary hints
    pub transparency: TransparencyProfile,
    /// Search ranking, `None` when the grid was forced
    pub outcome: Option<SearchOutcome>,
    /// The grid the cells belong to
    pub grid: Option<GridCandidate>,
    /// Classified cells of `grid`, row-major
    pub cells: Vec<CellRecord>,
    /// Verdict tallies over `cells`
    pub summary: Option<ClassificationSummary>,
}

/// Analyse a sheet with the given candidate list
///
/// With `GridChoice::Search` the top-ranked candidate is classified; an
/// undetermined search leaves `grid`, `cells` and `summary` empty.
///
/// # Errors
///
/// Returns `DegenerateRegion` if a forced grid is finer than the image
pub fn analyze_sheet(
    buffer: &PixelBuffer,
    candidates: Vec<GridCandidate>,
    choice: GridChoice,
    config: &AnalysisConfig,
) -> Result<SheetAnalysis> {
    let alpha = AlphaSummary::from_buffer(buffer);
    let distribution = content_distribution(buffer, config.alpha_threshold);
    let transparency = profile_transparency(buffer, config.discontinuity_jump);

    let (outcome, grid) = match choice {
        GridChoice::Forced(candidate) => (None, Some(candidate)),
        GridChoice::Search => {
            let candidates = with_profile_hint(candidates, &transparency);
            let outcome = search_grids(buffer, &candidates, config);
            let grid = outcome.best().map(|best| best.candidate);
            (Some(outcome), grid)
        }
    };

    let cells = match &grid {
        Some(candidate) => classify_cells(buffer, candidate, config)?,
        None => Vec::new(),
    };
    let summary = grid
        .is_some()
        .then(|| ClassificationSummary::from_records(&cells, TOP_CELLS_REPORTED));

    Ok(SheetAnalysis {
        alpha,
        distribution,
        transparency,
        outcome,
        grid,
        cells,
        summary,
    })
}
