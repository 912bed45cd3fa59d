//! Rectangular regions and the grid layouts that slice a sheet into cells

use crate::io::error::{Result, degenerate_region, invalid_parameter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Axis-aligned rectangle with half-open bounds `[x1, x2) x [y1, y2)`
///
/// Construction guarantees a non-zero area; regions never outlive the
/// grid or buffer that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

impl Region {
    /// Create a region from its corners
    ///
    /// # Errors
    ///
    /// Returns `DegenerateRegion` if `x1 >= x2` or `y1 >= y2`
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Result<Self> {
        if x1 >= x2 || y1 >= y2 {
            return Err(degenerate_region([x1, y1, x2, y2], &"region has zero area"));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Left edge (inclusive)
    pub const fn x1(&self) -> u32 {
        self.x1
    }

    /// Top edge (inclusive)
    pub const fn y1(&self) -> u32 {
        self.y1
    }

    /// Right edge (exclusive)
    pub const fn x2(&self) -> u32 {
        self.x2
    }

    /// Bottom edge (exclusive)
    pub const fn y2(&self) -> u32 {
        self.y2
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Pixel count
    pub const fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Corners as `[x1, y1, x2, y2]`
    pub const fn corners(&self) -> [u32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Overlap of two regions, `None` when they don't intersect
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        Self::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        )
        .ok()
    }
}

/// How a grid treats image dimensions that aren't multiples of the grid size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Only grids that tile the image exactly are considered
    #[default]
    Exact,
    /// Cell sizes use floor division; leftover border pixels are ignored
    Floor,
}

/// Hypothesised `cols x rows` partition of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCandidate {
    cols: u32,
    rows: u32,
}

impl GridCandidate {
    /// Create a candidate with at least one column and one row
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero
    pub fn new(cols: u32, rows: u32) -> Result<Self> {
        if cols == 0 {
            return Err(invalid_parameter("cols", &cols, &"must be at least 1"));
        }
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"must be at least 1"));
        }
        Ok(Self { cols, rows })
    }

    /// Number of columns
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total cell count (`cols * rows`)
    pub const fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Cell size induced on a `width x height` image, using floor division
    pub const fn cell_size(&self, width: u32, height: u32) -> (u32, u32) {
        (width / self.cols, height / self.rows)
    }

    /// Whether the grid tiles the image with no leftover pixels
    pub const fn divides(&self, width: u32, height: u32) -> bool {
        width % self.cols == 0 && height % self.rows == 0
    }

    /// Grid position `(col, row)` of a row-major cell index
    pub const fn position(&self, index: usize) -> (u32, u32) {
        let cols = self.cols as usize;
        ((index % cols) as u32, (index / cols) as u32)
    }

    /// Cell regions in row-major order (`index = row * cols + col`)
    ///
    /// # Errors
    ///
    /// Returns `DegenerateRegion` if the grid is finer than the image,
    /// leaving cells with zero width or height
    pub fn cells(&self, width: u32, height: u32) -> Result<Vec<Region>> {
        let (cell_width, cell_height) = self.cell_size(width, height);
        if cell_width == 0 || cell_height == 0 {
            return Err(degenerate_region(
                [0, 0, cell_width, cell_height],
                &format!("{self} grid is finer than the {width}x{height} image"),
            ));
        }

        (0..self.cell_count())
            .map(|index| {
                let (col, row) = self.position(index);
                let x1 = col * cell_width;
                let y1 = row * cell_height;
                Region::new(x1, y1, x1 + cell_width, y1 + cell_height)
            })
            .collect()
    }
}

impl fmt::Display for GridCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

impl FromStr for GridCandidate {
    type Err = crate::io::error::AnalysisError;

    /// Parses `COLSxROWS`, e.g. `13x11`
    fn from_str(s: &str) -> Result<Self> {
        let (cols, rows) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| invalid_parameter("grid", &s, &"expected COLSxROWS"))?;
        let cols = cols
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid_parameter("grid", &s, &e))?;
        let rows = rows
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid_parameter("grid", &s, &e))?;
        Self::new(cols, rows)
    }
}
