//! Serializable per-sheet reports and the sinks that receive them

use crate::analysis::distribution::{AlphaSummary, ContentDistribution};
use crate::inference::classifier::CellRecord;
use crate::inference::grid_search::GridScore;
use crate::inference::pipeline::SheetAnalysis;
use crate::inference::summary::ClassificationSummary;
use crate::io::error::{AnalysisError, Result};
use crate::raster::region::GridCandidate;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Boundary hints from the transparency profiles, without the raw profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransparencyHint {
    /// Columns where transparency jumps
    pub column_breaks: Vec<usize>,
    /// Rows where transparency jumps
    pub row_breaks: Vec<usize>,
    /// `(cols, rows)` implied by the breaks
    pub suggested_grid: (usize, usize),
}

/// Everything written for one sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    /// Sheet file name
    pub source: String,
    /// Sheet width in pixels
    pub width: u32,
    /// Sheet height in pixels
    pub height: u32,
    /// Alpha channel tallies
    pub alpha: AlphaSummary,
    /// Whether the background has been cut out to transparency
    pub cutout_background: bool,
    /// Content bounds and color statistics
    pub distribution: Option<ContentDistribution>,
    /// Transparency boundary hints
    pub transparency: TransparencyHint,
    /// Whether the grid was given rather than searched
    pub forced_grid: bool,
    /// Whether a search ran and found no content-bearing grid
    pub undetermined: bool,
    /// Ranked candidates, best first
    pub ranking: Vec<GridScore>,
    /// Grid the cells belong to
    pub grid: Option<GridCandidate>,
    /// Classified cells, row-major
    pub cells: Vec<CellRecord>,
    /// Verdict tallies
    pub summary: Option<ClassificationSummary>,
}

impl SheetReport {
    /// Flatten an analysis of a `width x height` sheet into a report
    pub fn from_analysis(source: &str, width: u32, height: u32, analysis: SheetAnalysis) -> Self {
        let transparency = TransparencyHint {
            suggested_grid: analysis.transparency.suggested_grid(),
            column_breaks: analysis.transparency.column_breaks,
            row_breaks: analysis.transparency.row_breaks,
        };
        let (forced_grid, undetermined, ranking) = match &analysis.outcome {
            Some(outcome) => (false, !outcome.is_viable(), outcome.scores().to_vec()),
            None => (true, false, Vec::new()),
        };

        Self {
            source: source.to_string(),
            width,
            height,
            cutout_background: analysis.alpha.has_cutout_background(),
            alpha: analysis.alpha,
            distribution: analysis.distribution,
            transparency,
            forced_grid,
            undetermined,
            ranking,
            grid: analysis.grid,
            cells: analysis.cells,
            summary: analysis.summary,
        }
    }
}

/// Destination for finished sheet reports
pub trait ResultSink {
    /// Accept one report
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be stored
    fn accept(&mut self, report: &SheetReport) -> Result<()>;
}

/// Writes each report as pretty-printed JSON to a fixed path
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Sink writing to `path`, creating parent directories as needed
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Target file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonFileSink {
    fn accept(&mut self, report: &SheetReport) -> Result<()> {
        write_json(&self.path, report)
    }
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory cannot be created, serialization
/// fails, or the file cannot be written
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AnalysisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| AnalysisError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| AnalysisError::FileSystem {
        path: path.to_path_buf(),
        operation: "write report",
        source: e,
    })
}
