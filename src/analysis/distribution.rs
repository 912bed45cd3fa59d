//! Sheet-wide alpha and color statistics reported alongside the grid verdict

use crate::raster::buffer::PixelBuffer;
use crate::raster::region::Region;
use serde::Serialize;

/// Share of fully transparent, partially transparent and opaque pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlphaSummary {
    /// Fraction with alpha == 0
    pub transparent: f64,
    /// Fraction with 0 < alpha < 255
    pub semi_transparent: f64,
    /// Fraction with alpha == 255
    pub opaque: f64,
}

impl AlphaSummary {
    /// Tally the alpha channel of the whole sheet
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let mut counts = [0usize; 3];
        for &alpha in buffer.alpha_plane() {
            let bucket = match alpha {
                0 => 0,
                u8::MAX => 2,
                _ => 1,
            };
            if let Some(count) = counts.get_mut(bucket) {
                *count += 1;
            }
        }

        let total = buffer.bounds().area() as f64;
        let [transparent, semi_transparent, opaque] = counts.map(|count| count as f64 / total);
        Self {
            transparent,
            semi_transparent,
            opaque,
        }
    }

    /// Whether the background looks removed (more than 10% fully transparent)
    pub fn has_cutout_background(&self) -> bool {
        self.transparent > 0.1
    }
}

/// Where the content sits and what color it is on average
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDistribution {
    /// Smallest region holding every content pixel
    pub bounds: Region,
    /// Content pixels over all pixels
    pub content_fraction: f64,
    /// Mean RGB of content pixels
    pub mean_rgb: [f64; 3],
    /// Population standard deviation of content RGB
    pub std_rgb: [f64; 3],
}

/// Describe the content pixels (alpha above `alpha_threshold`) of a sheet,
/// or `None` if it has none
pub fn content_distribution(
    buffer: &PixelBuffer,
    alpha_threshold: u8,
) -> Option<ContentDistribution> {
    let mut min = [u32::MAX; 2];
    let mut max = [0u32; 2];
    let mut count = 0usize;
    for ((y, x), &alpha) in buffer.alpha_plane().indexed_iter() {
        if alpha > alpha_threshold {
            let (x, y) = (x as u32, y as u32);
            min = [min[0].min(x), min[1].min(y)];
            max = [max[0].max(x), max[1].max(y)];
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    let bounds = Region::new(min[0], min[1], max[0] + 1, max[1] + 1).ok()?;

    let samples = buffer.content_rgb(&buffer.bounds(), alpha_threshold);
    let n = samples.len() as f64;
    let mut mean_rgb = [0.0; 3];
    for rgb in &samples {
        for (mean, &channel) in mean_rgb.iter_mut().zip(rgb) {
            *mean += f64::from(channel) / n;
        }
    }
    let mut std_rgb = [0.0; 3];
    for rgb in &samples {
        for ((var, &channel), mean) in std_rgb.iter_mut().zip(rgb).zip(mean_rgb) {
            *var += (f64::from(channel) - mean).powi(2) / n;
        }
    }
    let std_rgb = std_rgb.map(f64::sqrt);

    Some(ContentDistribution {
        bounds,
        content_fraction: count as f64 / buffer.bounds().area() as f64,
        mean_rgb,
        std_rgb,
    })
}
