//! Analysis constants and the runtime configuration object

use crate::analysis::color::ColorThresholds;
use crate::inference::classifier::{LadderThresholds, StructureConfig};
use crate::io::error::{AnalysisError, Result, WithContext, invalid_parameter};
use crate::raster::region::GridMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixels with alpha above this are content
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 0;

/// A cell counts toward a grid's score above this coverage
pub const DEFAULT_MIN_CONTENT_COVERAGE: f64 = 0.1;

// Narrower cells are slivers, not sprites
/// Smallest cell width or height a candidate may induce
pub const DEFAULT_MIN_CELL_SIZE: u32 = 10;

/// Transparency profile jump that marks a likely boundary
pub const DEFAULT_DISCONTINUITY_JUMP: f64 = 0.3;

/// Number of best-covered cells listed in a summary
pub const TOP_CELLS_REPORTED: usize = 3;

/// Grids tried when the caller gives no candidate list
///
/// Every square grid up to 16x16, then the rectangular layouts sprite
/// sheets commonly use. Duplicates are dropped when the list is built.
pub const DEFAULT_GRID_CANDIDATES: &[(u32, u32)] = &[
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (5, 5),
    (6, 6),
    (7, 7),
    (8, 8),
    (9, 9),
    (10, 10),
    (11, 11),
    (12, 12),
    (13, 13),
    (14, 14),
    (15, 15),
    (16, 16),
    (2, 1),
    (1, 2),
    (3, 1),
    (1, 3),
    (4, 1),
    (1, 4),
    (3, 2),
    (2, 3),
    (4, 2),
    (2, 4),
    (4, 3),
    (3, 4),
    (5, 4),
    (4, 5),
    (6, 4),
    (4, 6),
    (8, 6),
    (6, 8),
    (12, 8),
    (13, 11),
];

// Output settings
/// Suffix of the JSON report written next to each sheet
pub const REPORT_SUFFIX: &str = "_analysis";
/// Suffix of the texture atlas written next to each sheet
pub const ATLAS_SUFFIX: &str = "_atlas";
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Every tunable threshold of the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Pixels with alpha above this are content
    pub alpha_threshold: u8,
    /// A cell counts toward a grid's score above this coverage
    pub min_content_coverage: f64,
    /// Smallest cell width or height a candidate may induce
    pub min_cell_size: u32,
    /// Whether candidates must tile the sheet exactly
    pub grid_mode: GridMode,
    /// Profile jump that marks a likely boundary
    pub discontinuity_jump: f64,
    /// Structure score and desk weights
    pub structure: StructureConfig,
    /// Color feature bounds
    pub colors: ColorThresholds,
    /// Decision ladder thresholds
    pub ladder: LadderThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            min_content_coverage: DEFAULT_MIN_CONTENT_COVERAGE,
            min_cell_size: DEFAULT_MIN_CELL_SIZE,
            grid_mode: GridMode::Exact,
            discontinuity_jump: DEFAULT_DISCONTINUITY_JUMP,
            structure: StructureConfig::default(),
            colors: ColorThresholds::default(),
            ladder: LadderThresholds::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from JSON; missing fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, isn't valid JSON, or
    /// holds out-of-range values
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::FileSystem {
            path: path.to_path_buf(),
            operation: "read configuration",
            source: e,
        })?;
        let config: Self = serde_json::from_str(&text).with_path(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every ratio lies in `[0, 1]` and the cell size is positive
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending field
    pub fn validate(&self) -> Result<()> {
        if self.min_cell_size == 0 {
            return Err(invalid_parameter(
                "min_cell_size",
                &self.min_cell_size,
                &"must be at least 1",
            ));
        }

        let ratios = [
            ("min_content_coverage", self.min_content_coverage),
            ("discontinuity_jump", self.discontinuity_jump),
            ("structure.row_density", self.structure.row_density),
            ("structure.wood_weight", self.structure.wood_weight),
            ("structure.metal_weight", self.structure.metal_weight),
            ("structure.structure_weight", self.structure.structure_weight),
            ("ladder.empty_coverage", self.ladder.empty_coverage),
            ("ladder.combined_desk", self.ladder.combined_desk),
            ("ladder.combined_character", self.ladder.combined_character),
            ("ladder.furniture_desk", self.ladder.furniture_desk),
            ("ladder.character", self.ladder.character),
            ("ladder.mixed", self.ladder.mixed),
        ];
        for (parameter, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid_parameter(parameter, &value, &"must be within [0, 1]"));
            }
        }
        Ok(())
    }
}
