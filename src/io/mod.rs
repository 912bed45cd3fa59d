/// Texture-atlas descriptions of a grid
pub mod atlas;
/// Command-line arguments and batch processing
pub mod cli;
/// Analysis constants and runtime configuration
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Sheet decoding and cell export
pub mod image;
/// Log subscriber setup
pub mod logging;
/// Terminal progress display
pub mod progress;
/// Per-sheet reports and their sinks
pub mod report;
