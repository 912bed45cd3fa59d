//! Command-line interface for batch analysis of sprite sheets

use crate::analysis::color::ColorThresholds;
use crate::inference::classifier::ContentType;
use crate::inference::grid_search::default_candidates;
use crate::inference::pipeline::{GridChoice, analyze_sheet};
use crate::io::atlas::build_atlas;
use crate::io::configuration::{ATLAS_SUFFIX, AnalysisConfig, REPORT_SUFFIX};
use crate::io::error::{AnalysisError, Result, WithContext, invalid_parameter};
use crate::io::image::{ImageFileLoader, SheetLoader, export_cells};
use crate::io::progress::{ProgressManager, Stage};
use crate::io::report::{JsonFileSink, ResultSink, SheetReport, write_json};
use crate::raster::region::{GridCandidate, GridMode};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug, Clone)]
#[command(name = "spritegrid")]
#[command(
    author,
    version,
    about = "Infer the grid layout of sprite sheets and classify each cell"
)]
/// Command-line arguments for the sheet analysis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Skip the search and classify this grid, e.g. 13x11
    #[arg(short, long, value_name = "CxR", value_parser = parse_grid)]
    pub grid: Option<GridCandidate>,

    /// Comma-separated grids to try instead of the built-in list
    #[arg(short, long, value_name = "CxR,..", value_delimiter = ',', value_parser = parse_grid)]
    pub candidates: Vec<GridCandidate>,

    /// Accept grids that leave a remainder strip, using floor division
    #[arg(short, long)]
    pub floor: bool,

    /// Smallest cell width or height a candidate may induce
    #[arg(short, long)]
    pub min_cell_size: Option<u32>,

    /// Pixels with alpha above this are content
    #[arg(short, long)]
    pub alpha_threshold: Option<u8>,

    /// JSON file overriding analysis thresholds
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use the tighter color bounds for furniture sheets
    #[arg(short, long)]
    pub strict_colors: bool,

    /// Write each non-empty cell as a PNG into this directory
    #[arg(short = 'x', long, value_name = "DIR")]
    pub extract: Option<PathBuf>,

    /// Write a texture atlas describing the chosen grid
    #[arg(long)]
    pub atlas: bool,

    /// Process files even if a report exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Suppress progress output and informational logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-candidate and per-stage details
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse a `CxR` grid argument
///
/// # Errors
///
/// Returns the parse failure as a message clap can display
pub fn parse_grid(value: &str) -> std::result::Result<GridCandidate, String> {
    value.parse::<GridCandidate>().map_err(|e| e.to_string())
}

impl Cli {
    /// Check if existing reports should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Configuration file (or defaults) with the command-line overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded or the
    /// combined settings are out of range
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };

        if self.floor {
            config.grid_mode = GridMode::Floor;
        }
        if let Some(size) = self.min_cell_size {
            config.min_cell_size = size;
        }
        if let Some(threshold) = self.alpha_threshold {
            config.alpha_threshold = threshold;
        }
        if self.strict_colors {
            config.colors = ColorThresholds::furniture_scan();
        }

        config.validate()?;
        Ok(config)
    }

    /// Grids to search: the explicit list, or the built-in defaults
    pub fn candidate_list(&self) -> Vec<GridCandidate> {
        if self.candidates.is_empty() {
            default_candidates()
        } else {
            self.candidates.clone()
        }
    }

    /// Search, or the forced grid when one was given
    pub fn grid_choice(&self) -> GridChoice {
        self.grid.map_or(GridChoice::Search, GridChoice::Forced)
    }
}

/// Orchestrates batch analysis of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    config: AnalysisConfig,
    loader: ImageFileLoader,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the analysis configuration is invalid
    pub fn new(cli: Cli) -> Result<Self> {
        let config = cli.analysis_config()?;
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Ok(Self {
            cli,
            config,
            loader: ImageFileLoader,
            progress_manager,
        })
    }

    /// Process files according to CLI arguments
    ///
    /// Returns the number of sheets analysed. Sheets smaller than a forced
    /// grid are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<usize> {
        let files = self.collect_files()?;

        if files.is_empty() {
            tracing::info!(path = %self.cli.target.display(), "nothing to analyse");
            return Ok(0);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut analysed = 0;
        for (index, file) in files.iter().enumerate() {
            match self.process_file(file, index) {
                Ok(()) => analysed += 1,
                Err(error @ AnalysisError::DegenerateRegion { .. }) => {
                    tracing::warn!(sheet = %file.display(), %error, "skipping sheet");
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.complete_file(index);
                    }
                }
                Err(error) => return Err(error),
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(analysed)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_png(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"file must be a PNG image",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target)? {
                let path = entry.with_path(target)?.path();
                if is_png(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let report_path = report_path(input_path);
        if report_path.exists() {
            tracing::warn!(sheet = %input_path.display(), "skipping, report exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let stem = input_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let source = input_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let buffer = self.loader.load(input_path)?;
        tracing::debug!(
            sheet = %source,
            width = buffer.width(),
            height = buffer.height(),
            "sheet loaded"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, Stage::Analyze);
        }

        let analysis = analyze_sheet(
            &buffer,
            self.cli.candidate_list(),
            self.cli.grid_choice(),
            &self.config,
        )?;
        let report = SheetReport::from_analysis(&source, buffer.width(), buffer.height(), analysis);

        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, Stage::Write);
        }

        let mut sink = JsonFileSink::new(report_path(input_path));
        sink.accept(&report)?;

        match (report.grid, report.undetermined) {
            (Some(grid), _) => {
                if self.cli.atlas {
                    let atlas = build_atlas(&source, buffer.width(), buffer.height(), &grid)?;
                    write_json(&atlas_path(input_path), &atlas)?;
                }
                if let Some(ref dir) = self.cli.extract {
                    export_cells(&buffer, &report.cells, dir, &stem)?;
                }
                let tally = |content| {
                    report
                        .summary
                        .as_ref()
                        .map_or(0, |summary| summary.count(content))
                };
                tracing::info!(
                    sheet = %source,
                    grid = %grid,
                    cells = report.cells.len(),
                    furniture = tally(ContentType::Furniture),
                    characters = tally(ContentType::Character),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "sheet analysed"
                );
            }
            (None, true) => {
                tracing::warn!(sheet = %source, "no candidate grid holds content");
            }
            (None, false) => {
                tracing::warn!(sheet = %source, "no grid chosen");
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(())
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn sibling_path(input_path: &Path, suffix: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.json", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Path of the JSON report written next to `input_path`
pub fn report_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, REPORT_SUFFIX)
}

/// Path of the texture atlas written next to `input_path`
pub fn atlas_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, ATLAS_SUFFIX)
}
