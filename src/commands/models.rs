use crate::imaging::properties::ColorMode;
use crate::utils::config::{DEFAULT_HEIGHT, DEFAULT_OUTFILE, DEFAULT_RESOLUTION, DEFAULT_WIDTH};
use std::path::PathBuf;

/// Capture parameters for a single scan
///
/// **Public** - produced by the argument parser, consumed by the scan command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Scan resolution in DPI, applied to both axes
    pub resolution: i32,

    /// Horizontal start offset in pixels
    pub start_left: i32,

    /// Vertical start offset in pixels
    pub start_top: i32,

    /// Capture width in pixels
    pub width: i32,

    /// Capture height in pixels
    pub height: i32,

    pub color_mode: ColorMode,

    pub brightness_percent: i32,

    pub contrast_percent: i32,

    /// 1-based device index (None = first scanner found)
    pub device_index: Option<i32>,

    /// Output image path, overwritten if present
    pub output_path: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            start_left: 0,
            start_top: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            color_mode: ColorMode::Rgb,
            brightness_percent: 0,
            contrast_percent: 0,
            device_index: None,
            output_path: PathBuf::from(DEFAULT_OUTFILE),
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print scanner devices and exit
    ListScanners,

    /// Configure a device and acquire one image
    Scan(ScanConfig),
}

/// A fully parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub action: Action,

    /// Enable debug logging
    pub verbose: bool,
}
