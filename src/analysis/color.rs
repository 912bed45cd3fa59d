//! Fixed per-channel color predicates and the fraction-of-pixels scores built on them
//!
//! Each feature (skin, wood, metal, clothing) is a threshold struct whose
//! fields are the tunable bounds. Scores are the fraction of content pixels
//! matching the predicate and are always in `[0, 1]`; an empty sample set
//! scores 0.0.

use crate::raster::buffer::Rgb;
use serde::{Deserialize, Serialize};

/// Pixel-level test for one color feature
pub trait PixelPredicate {
    /// Whether the pixel shows this feature
    fn matches(&self, rgb: Rgb) -> bool;
}

/// Warm skin tones: `R > red_min, G > green_min, B > blue_min, R > G, R > B`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinTone {
    /// Red must exceed this
    pub red_min: u8,
    /// Green must exceed this
    pub green_min: u8,
    /// Blue must exceed this
    pub blue_min: u8,
    /// Additionally require `G > B`
    pub require_green_over_blue: bool,
}

impl SkinTone {
    /// Variant that also requires `G > B`
    pub const STRICT: Self = Self {
        red_min: 95,
        green_min: 40,
        blue_min: 20,
        require_green_over_blue: true,
    };
}

impl Default for SkinTone {
    fn default() -> Self {
        Self {
            require_green_over_blue: false,
            ..Self::STRICT
        }
    }
}

impl PixelPredicate for SkinTone {
    fn matches(&self, [r, g, b]: Rgb) -> bool {
        r > self.red_min
            && g > self.green_min
            && b > self.blue_min
            && r > g
            && r > b
            && (!self.require_green_over_blue || g > b)
    }
}

/// Brown wood tones: `R > red_min, G > green_min, B < blue_max, R > B`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WoodTone {
    /// Red must exceed this
    pub red_min: u8,
    /// Green must exceed this
    pub green_min: u8,
    /// Blue must stay below this
    pub blue_max: u8,
}

impl WoodTone {
    /// Brighter bounds used when scanning furniture-only sheets
    pub const WARM: Self = Self {
        red_min: 100,
        green_min: 50,
        blue_max: 100,
    };
}

impl Default for WoodTone {
    fn default() -> Self {
        Self {
            red_min: 80,
            green_min: 40,
            blue_max: 80,
        }
    }
}

impl PixelPredicate for WoodTone {
    fn matches(&self, [r, g, b]: Rgb) -> bool {
        r > self.red_min && g > self.green_min && b < self.blue_max && r > b
    }
}

/// Mid-brightness neutrals: channels within `max_channel_delta` of each other
/// and `red_min < R < red_max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetalTone {
    /// Largest allowed `|R - G|` and `|G - B|` (exclusive)
    pub max_channel_delta: u8,
    /// Red must exceed this
    pub red_min: u8,
    /// Red must stay below this
    pub red_max: u8,
}

impl MetalTone {
    /// Wider neutral band used when scanning furniture-only sheets
    pub const WIDE: Self = Self {
        max_channel_delta: 30,
        red_min: 50,
        red_max: 200,
    };
}

impl Default for MetalTone {
    fn default() -> Self {
        Self {
            max_channel_delta: 25,
            red_min: 60,
            red_max: 180,
        }
    }
}

impl PixelPredicate for MetalTone {
    fn matches(&self, [r, g, b]: Rgb) -> bool {
        r.abs_diff(g) < self.max_channel_delta
            && g.abs_diff(b) < self.max_channel_delta
            && r > self.red_min
            && r < self.red_max
    }
}

/// Typical clothing colors: blue-dominant, near-white or near-black
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothingPalette {
    /// Blue must exceed red by more than this
    pub blue_margin: u8,
    /// Every channel above this counts as white
    pub white_min: u8,
    /// Every channel below this counts as black
    pub black_max: u8,
}

impl ClothingPalette {
    /// Stricter palette: bluer blues, whiter whites, blacker blacks
    pub const STRICT: Self = Self {
        blue_margin: 30,
        white_min: 200,
        black_max: 50,
    };

    /// `B > R + blue_margin`
    pub fn is_blue(&self, [r, _, b]: Rgb) -> bool {
        u16::from(b) > u16::from(r) + u16::from(self.blue_margin)
    }

    /// All channels above `white_min`
    pub fn is_white(&self, rgb: Rgb) -> bool {
        rgb.iter().all(|&channel| channel > self.white_min)
    }

    /// All channels below `black_max`
    pub fn is_black(&self, rgb: Rgb) -> bool {
        rgb.iter().all(|&channel| channel < self.black_max)
    }
}

impl Default for ClothingPalette {
    fn default() -> Self {
        Self {
            blue_margin: 20,
            white_min: 180,
            black_max: 60,
        }
    }
}

impl PixelPredicate for ClothingPalette {
    fn matches(&self, rgb: Rgb) -> bool {
        self.is_blue(rgb) || self.is_white(rgb) || self.is_black(rgb)
    }
}

/// Bounds for every color feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorThresholds {
    /// Skin-tone bounds
    pub skin: SkinTone,
    /// Wood-tone bounds
    pub wood: WoodTone,
    /// Metal/gray bounds
    pub metal: MetalTone,
    /// Clothing palette bounds
    pub clothing: ClothingPalette,
}

impl ColorThresholds {
    /// Tighter character colors and wider furniture colors, as used when a
    /// sheet is known to mix desks with seated figures
    pub const fn furniture_scan() -> Self {
        Self {
            skin: SkinTone::STRICT,
            wood: WoodTone::WARM,
            metal: MetalTone::WIDE,
            clothing: ClothingPalette::STRICT,
        }
    }
}

/// Fraction of `samples` matching `predicate`; 0.0 when `samples` is empty
pub fn feature_score(samples: &[Rgb], predicate: &impl PixelPredicate) -> f64 {
    union_score(samples, &[predicate])
}

/// Fraction of `samples` matching at least one predicate; 0.0 when `samples` is empty
pub fn union_score(samples: &[Rgb], predicates: &[&dyn PixelPredicate]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let matching = samples
        .iter()
        .filter(|&&rgb| predicates.iter().any(|predicate| predicate.matches(rgb)))
        .count();
    matching as f64 / samples.len() as f64
}
