use crate::raster::buffer::PixelBuffer;
use crate::raster::region::Region;
use bitvec::prelude::*;

/// Row-major bitmask of content pixels (alpha above a threshold) in a region
///
/// Scoped to a single cell: built, scored, then dropped.
#[derive(Clone, Debug)]
pub struct ContentMask {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl ContentMask {
    /// Mask the clipped `region` of `buffer`
    ///
    /// A region entirely outside the image yields an empty mask.
    pub fn from_region(buffer: &PixelBuffer, region: &Region, alpha_threshold: u8) -> Self {
        let alpha = buffer.alpha_view(region);
        let (height, width) = alpha.dim();
        let mut bits = bitvec![0; width * height];
        for (index, &value) in alpha.iter().enumerate() {
            if value > alpha_threshold {
                bits.set(index, true);
            }
        }
        Self {
            bits,
            width,
            height,
        }
    }

    /// Masked width
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Masked height
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Number of content pixels
    pub fn content_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Content fraction; 0.0 for an empty mask
    pub fn coverage(&self) -> f64 {
        if self.area() == 0 {
            0.0
        } else {
            self.content_count() as f64 / self.area() as f64
        }
    }

    /// Content fraction of scanline `y`; 0.0 outside the mask
    pub fn row_density(&self, y: usize) -> f64 {
        if y >= self.height || self.width == 0 {
            return 0.0;
        }
        let start = y * self.width;
        self.bits
            .get(start..start + self.width)
            .map_or(0.0, |row| row.count_ones() as f64 / self.width as f64)
    }
}
