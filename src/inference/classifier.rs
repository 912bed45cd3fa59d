//! Per-cell content verdicts from coverage, silhouette structure and color features
//!
//! The verdict comes from an ordered threshold ladder, not a blended score:
//! the first rule that fires wins, so rule order is part of the behaviour.

use crate::analysis::color::{feature_score, union_score};
use crate::analysis::coverage::coverage;
use crate::io::configuration::AnalysisConfig;
use crate::io::error::Result;
use crate::raster::buffer::PixelBuffer;
use crate::raster::mask::ContentMask;
use crate::raster::region::{GridCandidate, Region};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a cell most likely depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Too few content pixels to matter
    Empty,
    /// Desk, table or other furniture
    Furniture,
    /// A human figure
    Character,
    /// Furniture with a figure at it
    FurnitureWithCharacter,
    /// Weak evidence for either
    Mixed,
    /// Content that matches no feature
    Unknown,
}

impl ContentType {
    /// Every variant, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Empty,
        Self::Furniture,
        Self::Character,
        Self::FurnitureWithCharacter,
        Self::Mixed,
        Self::Unknown,
    ];

    /// Whether the verdict includes furniture
    pub const fn has_furniture(self) -> bool {
        matches!(self, Self::Furniture | Self::FurnitureWithCharacter)
    }

    /// Whether the verdict includes a figure
    pub const fn has_character(self) -> bool {
        matches!(self, Self::Character | Self::FurnitureWithCharacter)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Empty => "empty",
            Self::Furniture => "furniture",
            Self::Character => "character",
            Self::FurnitureWithCharacter => "furniture+character",
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Thresholds of the decision ladder, checked in field order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderThresholds {
    /// Coverage at or below this is `Empty`
    pub empty_coverage: f64,
    /// Desk score above this (with `combined_character`) is `FurnitureWithCharacter`
    pub combined_desk: f64,
    /// Character score above this (with `combined_desk`) is `FurnitureWithCharacter`
    pub combined_character: f64,
    /// Desk score above this is `Furniture`
    pub furniture_desk: f64,
    /// Character score above this is `Character`
    pub character: f64,
    /// Either score above this is `Mixed`
    pub mixed: f64,
}

impl Default for LadderThresholds {
    fn default() -> Self {
        Self {
            empty_coverage: 0.1,
            combined_desk: 0.3,
            combined_character: 0.2,
            furniture_desk: 0.4,
            character: 0.3,
            mixed: 0.1,
        }
    }
}

/// Weights of the desk score and the scanline density the structure score uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// A scanline counts as solid above this content density
    pub row_density: f64,
    /// Weight of the wood score in the desk score
    pub wood_weight: f64,
    /// Weight of the metal score in the desk score
    pub metal_weight: f64,
    /// Weight of the structure score in the desk score
    pub structure_weight: f64,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            row_density: 0.6,
            wood_weight: 0.4,
            metal_weight: 0.3,
            structure_weight: 0.3,
        }
    }
}

/// Feature scores of one cell, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FeatureScores {
    /// Skin-tone fraction of content pixels
    pub skin: f64,
    /// Clothing-palette fraction of content pixels
    pub clothing: f64,
    /// Wood-tone fraction of content pixels
    pub wood: f64,
    /// Metal/gray fraction of content pixels
    pub metal: f64,
    /// Solid-scanline score of the middle half
    pub structure: f64,
    /// Weighted wood, metal and structure
    pub desk: f64,
    /// Fraction matching skin or clothing
    pub character: f64,
}

/// Analysis of one cell of a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellRecord {
    /// Row-major index (`row * cols + col`)
    pub index: usize,
    /// Column in the grid
    pub col: u32,
    /// Row in the grid
    pub row: u32,
    /// Pixel region of the cell
    pub region: Region,
    /// Content fraction
    pub coverage: f64,
    /// Color and structure scores
    pub scores: FeatureScores,
    /// Ladder verdict
    pub content: ContentType,
}

/// Share of solid scanlines in the middle half of the mask
///
/// Counts rows `h/4 .. 3h/4` whose density exceeds `row_density`, divided by
/// `h/2` and capped at 1.0. A flat tabletop silhouette scores high.
pub fn structure_score(mask: &ContentMask, row_density: f64) -> f64 {
    let height = mask.height();
    let half = height / 2;
    if half == 0 {
        return 0.0;
    }
    let solid_rows = (height / 4..3 * height / 4)
        .filter(|&y| mask.row_density(y) > row_density)
        .count();
    (solid_rows as f64 / half as f64).min(1.0)
}

/// Color and structure scores of the content pixels in `region`
pub fn feature_scores(
    buffer: &PixelBuffer,
    region: &Region,
    config: &AnalysisConfig,
) -> FeatureScores {
    let samples = buffer.content_rgb(region, config.alpha_threshold);
    let colors = &config.colors;
    let weights = &config.structure;

    let mask = ContentMask::from_region(buffer, region, config.alpha_threshold);
    let structure = structure_score(&mask, weights.row_density);

    let wood = feature_score(&samples, &colors.wood);
    let metal = feature_score(&samples, &colors.metal);
    let desk = wood * weights.wood_weight
        + metal * weights.metal_weight
        + structure * weights.structure_weight;

    FeatureScores {
        skin: feature_score(&samples, &colors.skin),
        clothing: feature_score(&samples, &colors.clothing),
        wood,
        metal,
        structure,
        desk,
        character: union_score(&samples, &[&colors.skin, &colors.clothing]),
    }
}

/// Apply the decision ladder; the first matching rule wins
pub fn decide(coverage: f64, desk: f64, character: f64, ladder: &LadderThresholds) -> ContentType {
    if coverage <= ladder.empty_coverage {
        ContentType::Empty
    } else if desk > ladder.combined_desk && character > ladder.combined_character {
        ContentType::FurnitureWithCharacter
    } else if desk > ladder.furniture_desk {
        ContentType::Furniture
    } else if character > ladder.character {
        ContentType::Character
    } else if desk > ladder.mixed || character > ladder.mixed {
        ContentType::Mixed
    } else {
        ContentType::Unknown
    }
}

/// Score and classify one cell
pub fn classify_cell(
    buffer: &PixelBuffer,
    candidate: &GridCandidate,
    index: usize,
    region: Region,
    config: &AnalysisConfig,
) -> CellRecord {
    let (col, row) = candidate.position(index);
    let coverage = coverage(buffer, &region, config.alpha_threshold);
    let scores = feature_scores(buffer, &region, config);
    let content = decide(coverage, scores.desk, scores.character, &config.ladder);

    CellRecord {
        index,
        col,
        row,
        region,
        coverage,
        scores,
        content,
    }
}

/// Classify every cell of `candidate`, returned in row-major order
///
/// Leftover border pixels beyond the last full column or row are ignored.
///
/// # Errors
///
/// Returns `DegenerateRegion` if the grid is finer than the image
pub fn classify_cells(
    buffer: &PixelBuffer,
    candidate: &GridCandidate,
    config: &AnalysisConfig,
) -> Result<Vec<CellRecord>> {
    let regions = candidate.cells(buffer.width(), buffer.height())?;
    let records: Vec<CellRecord> = regions
        .into_par_iter()
        .enumerate()
        .map(|(index, region)| classify_cell(buffer, candidate, index, region, config))
        .collect();

    tracing::debug!(
        grid = %candidate,
        content_cells = records.iter().filter(|r| r.content != ContentType::Empty).count(),
        "cells classified"
    );
    Ok(records)
}
