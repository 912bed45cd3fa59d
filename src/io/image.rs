//! Sheet decoding and PNG export of individual cells

use crate::inference::classifier::{CellRecord, ContentType};
use crate::io::error::{AnalysisError, Result};
use crate::raster::buffer::PixelBuffer;
use crate::raster::region::Region;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Source of decoded sprite sheets
pub trait SheetLoader {
    /// Decode the sheet at `path` into RGBA pixels
    ///
    /// # Errors
    ///
    /// Returns `ImageLoad` if the file is missing or cannot be decoded
    fn load(&self, path: &Path) -> Result<PixelBuffer>;
}

/// Loads sheets from disk with the `image` crate, normalizing to RGBA
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileLoader;

impl SheetLoader for ImageFileLoader {
    fn load(&self, path: &Path) -> Result<PixelBuffer> {
        load_sheet(path)
    }
}

/// Decode the image at `path` into a pixel buffer
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read
/// - The file is not a supported image format
/// - The image has zero width or height
pub fn load_sheet(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).map_err(|e| AnalysisError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    PixelBuffer::from_image(&img)
}

/// Copy the clipped `region` of `buffer` into a standalone image
///
/// # Errors
///
/// Returns `DegenerateRegion` if the region lies outside the buffer
pub fn crop_region(buffer: &PixelBuffer, region: &Region) -> Result<RgbaImage> {
    let clipped = buffer.clip(region).ok_or_else(|| {
        crate::io::error::degenerate_region(region.corners(), &"region lies outside the image")
    })?;
    let samples = buffer.rgba_in_region(&clipped).concat();
    RgbaImage::from_raw(clipped.width(), clipped.height(), samples).ok_or_else(|| {
        AnalysisError::InvalidSourceData {
            reason: format!("cropped samples don't fill {region:?}"),
        }
    })
}

/// Write every non-empty cell as `<stem>_frame_<index>.png` under `out_dir`
///
/// Returns the written paths in row-major order.
///
/// # Errors
///
/// Returns an error if:
/// - The output directory cannot be created
/// - A cell image cannot be encoded or saved
pub fn export_cells(
    buffer: &PixelBuffer,
    records: &[CellRecord],
    out_dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|e| AnalysisError::FileSystem {
        path: out_dir.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let mut written = Vec::new();
    for record in records.iter().filter(|r| r.content != ContentType::Empty) {
        let path = out_dir.join(format!("{stem}_frame_{:03}.png", record.index));
        crop_region(buffer, &record.region)?
            .save(&path)
            .map_err(|e| AnalysisError::ImageExport {
                path: path.clone(),
                source: e,
            })?;
        written.push(path);
    }

    tracing::debug!(frames = written.len(), dir = %out_dir.display(), "cells exported");
    Ok(written)
}
