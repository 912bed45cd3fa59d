//! Fraction of content pixels inside a region

use crate::raster::buffer::PixelBuffer;
use crate::raster::region::Region;

/// Number of pixels in the clipped region whose alpha exceeds `alpha_threshold`
pub fn content_pixel_count(buffer: &PixelBuffer, region: &Region, alpha_threshold: u8) -> usize {
    buffer
        .alpha_view(region)
        .iter()
        .filter(|&&alpha| alpha > alpha_threshold)
        .count()
}

/// Content fraction of `region`, in `[0, 1]`
///
/// Pixels of `region` outside the image are not counted. A region that
/// misses the image entirely has zero area and yields 0.0.
pub fn coverage(buffer: &PixelBuffer, region: &Region, alpha_threshold: u8) -> f64 {
    let Some(clipped) = buffer.clip(region) else {
        return 0.0;
    };
    content_pixel_count(buffer, &clipped, alpha_threshold) as f64 / clipped.area() as f64
}
