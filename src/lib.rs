//! Sprite-sheet grid inference and cell content classification
//!
//! A sheet is decoded into an immutable RGBA buffer, candidate grids are scored
//! by how many of their cells hold content, and each cell of the winning grid
//! is labelled by color and shape heuristics (furniture, character, both).

#![forbid(unsafe_code)]

/// Pixel statistics: coverage, transparency profiles, color features
pub mod analysis;
/// Grid search, cell classification and whole-sheet analysis
pub mod inference;
/// Input/output operations, configuration and error handling
pub mod io;
/// Pixel storage, regions and grid candidates
pub mod raster;

pub use analysis::coverage::coverage;
pub use analysis::transparency::profile_transparency;
pub use inference::classifier::{ContentType, classify_cells};
pub use inference::grid_search::{SearchOutcome, search_grids};
pub use inference::pipeline::{GridChoice, analyze_sheet};
pub use io::configuration::AnalysisConfig;
pub use io::error::{AnalysisError, Result};
pub use raster::{GridCandidate, GridMode, PixelBuffer, Region};
