//! Read-only RGBA pixel storage shared by every analysis stage

use crate::io::error::{AnalysisError, Result};
use crate::raster::region::Region;
use image::DynamicImage;
use ndarray::{Array3, ArrayView2, ArrayView3, Axis, Slice};

/// One pixel as `[r, g, b, a]`
pub type Rgba = [u8; 4];

/// One pixel without its alpha channel
pub type Rgb = [u8; 3];

/// Immutable RGBA pixels of a decoded sheet, stored as (height, width, channel)
///
/// Sources without an alpha channel are normalized to fully opaque on
/// construction, so every accessor sees four channels.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pixels: Array3<u8>,
    bounds: Region,
}

impl PixelBuffer {
    /// Wrap interleaved RGBA samples in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if either dimension is zero or the sample
    /// count doesn't equal `width * height * 4`
    pub fn from_rgba(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        let bounds = Region::new(0, 0, width, height).map_err(|e| {
            AnalysisError::InvalidSourceData {
                reason: format!("image must not be empty: {e}"),
            }
        })?;
        let pixels = Array3::from_shape_vec((height as usize, width as usize, 4), samples)
            .map_err(|e| AnalysisError::InvalidSourceData {
                reason: format!("sample count doesn't match {width}x{height} RGBA: {e}"),
            })?;
        Ok(Self { pixels, bounds })
    }

    /// Wrap interleaved RGB samples, synthesizing full opacity
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if either dimension is zero or the sample
    /// count doesn't equal `width * height * 3`
    pub fn from_rgb(width: u32, height: u32, samples: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if samples.len() != expected {
            return Err(AnalysisError::InvalidSourceData {
                reason: format!(
                    "expected {expected} RGB samples for {width}x{height}, got {}",
                    samples.len()
                ),
            });
        }

        let rgba = samples
            .chunks_exact(3)
            .flat_map(|rgb| rgb.iter().copied().chain(std::iter::once(u8::MAX)))
            .collect();
        Self::from_rgba(width, height, rgba)
    }

    /// Build a buffer by evaluating `pixel(x, y)` for every position
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if either dimension is zero
    pub fn from_fn(width: u32, height: u32, mut pixel: impl FnMut(u32, u32) -> Rgba) -> Result<Self> {
        let mut samples = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&pixel(x, y));
            }
        }
        Self::from_rgba(width, height, samples)
    }

    /// Normalize a decoded image of any color type to RGBA
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the image has zero width or height
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Image width in pixels
    pub const fn width(&self) -> u32 {
        self.bounds.width()
    }

    /// Image height in pixels
    pub const fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Region covering the whole image
    pub const fn bounds(&self) -> Region {
        self.bounds
    }

    /// Alpha value at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the image
    pub fn alpha_at(&self, x: u32, y: u32) -> Result<u8> {
        self.pixel_at(x, y).map(|[_, _, _, a]| a)
    }

    /// Full RGBA value at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the image
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<Rgba> {
        if x >= self.width() || y >= self.height() {
            return Err(AnalysisError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }

        let (row, col) = (y as usize, x as usize);
        let mut pixel = [0; 4];
        for (channel, out) in pixel.iter_mut().enumerate() {
            if let Some(&value) = self.pixels.get((row, col, channel)) {
                *out = value;
            }
        }
        Ok(pixel)
    }

    /// Part of `region` that lies inside the image
    pub fn clip(&self, region: &Region) -> Option<Region> {
        self.bounds.intersect(region)
    }

    /// Whole-image alpha plane indexed `(y, x)`
    pub fn alpha_plane(&self) -> ArrayView2<'_, u8> {
        self.pixels.index_axis(Axis(2), 3)
    }

    /// Alpha values of the clipped region indexed `(y, x)`; empty when the
    /// region misses the image entirely
    pub fn alpha_view(&self, region: &Region) -> ArrayView2<'_, u8> {
        self.region_view(region).index_axis_move(Axis(2), 3)
    }

    /// Every RGBA pixel of the clipped region in row-major order
    pub fn rgba_in_region(&self, region: &Region) -> Vec<Rgba> {
        self.region_view(region)
            .lanes(Axis(2))
            .into_iter()
            .map(|lane| {
                let mut pixel = [0; 4];
                for (out, &value) in pixel.iter_mut().zip(lane.iter()) {
                    *out = value;
                }
                pixel
            })
            .collect()
    }

    /// RGB values of the region's content pixels (alpha above `alpha_threshold`)
    pub fn content_rgb(&self, region: &Region, alpha_threshold: u8) -> Vec<Rgb> {
        self.rgba_in_region(region)
            .into_iter()
            .filter(|&[_, _, _, a]| a > alpha_threshold)
            .map(|[r, g, b, _]| [r, g, b])
            .collect()
    }

    fn region_view(&self, region: &Region) -> ArrayView3<'_, u8> {
        let (rows, cols) = self.clip(region).map_or_else(
            || (Slice::from(0..0), Slice::from(0..0)),
            |clipped| {
                (
                    Slice::from(clipped.y1() as usize..clipped.y2() as usize),
                    Slice::from(clipped.x1() as usize..clipped.x2() as usize),
                )
            },
        );
        self.pixels
            .slice_axis(Axis(0), rows)
            .slice_axis_move(Axis(1), cols)
    }
}
