//! Texture-atlas description of a grid, one named frame per cell

use crate::io::error::Result;
use crate::raster::region::GridCandidate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Position and size of a rectangle in the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AtlasRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

/// Width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AtlasSize {
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

/// One untrimmed, unrotated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasFrame {
    /// Frame rectangle in the sheet
    pub frame: AtlasRect,
    /// Always false
    pub rotated: bool,
    /// Always false
    pub trimmed: bool,
    /// Frame rectangle relative to the untrimmed source
    pub sprite_source_size: AtlasRect,
    /// Untrimmed frame size
    pub source_size: AtlasSize,
}

/// One texture page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtlasTexture {
    /// Image file name
    pub image: String,
    /// Pixel format
    pub format: String,
    /// Page size
    pub size: AtlasSize,
    /// Scale factor
    pub scale: u32,
    /// Frames keyed `frame_NNN` by row-major cell index
    pub frames: BTreeMap<String, AtlasFrame>,
}

/// Multi-texture atlas document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtlasDocument {
    /// Texture pages; a sheet produces exactly one
    pub textures: Vec<AtlasTexture>,
}

/// Describe every cell of `grid` over a `width x height` sheet
///
/// # Errors
///
/// Returns `DegenerateRegion` if the grid is finer than the sheet
pub fn build_atlas(
    image_name: &str,
    width: u32,
    height: u32,
    grid: &GridCandidate,
) -> Result<AtlasDocument> {
    let frames = grid
        .cells(width, height)?
        .into_iter()
        .enumerate()
        .map(|(index, cell)| {
            let (w, h) = (cell.width(), cell.height());
            let frame = AtlasFrame {
                frame: AtlasRect {
                    x: cell.x1(),
                    y: cell.y1(),
                    w,
                    h,
                },
                rotated: false,
                trimmed: false,
                sprite_source_size: AtlasRect { x: 0, y: 0, w, h },
                source_size: AtlasSize { w, h },
            };
            (format!("frame_{index:03}"), frame)
        })
        .collect();

    Ok(AtlasDocument {
        textures: vec![AtlasTexture {
            image: image_name.to_string(),
            format: "RGBA8888".to_string(),
            size: AtlasSize {
                w: width,
                h: height,
            },
            scale: 1,
            frames,
        }],
    })
}
