//! Pixel statistics computed over regions and whole sheets

/// Color feature predicates and scores
pub mod color;
/// Content-pixel coverage of a region
pub mod coverage;
/// Sheet-wide alpha and color statistics
pub mod distribution;
/// Per-axis transparency profiles and boundary hints
pub mod transparency;
