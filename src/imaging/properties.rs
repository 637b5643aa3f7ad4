//! Typed mapping from scan settings to the numeric property identifiers
//! the imaging service understands.

use crate::commands::models::ScanConfig;
use crate::utils::config::{
    WIA_IPS_BRIGHTNESS, WIA_IPS_CONTRAST, WIA_IPS_CUR_INTENT, WIA_IPS_XEXTENT, WIA_IPS_XPOS,
    WIA_IPS_XRES, WIA_IPS_YEXTENT, WIA_IPS_YPOS, WIA_IPS_YRES,
};
use crate::utils::error::UsageError;
use std::fmt;
use std::str::FromStr;

/// A scanner item property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    HorizontalResolution,
    VerticalResolution,
    HorizontalStart,
    VerticalStart,
    HorizontalExtent,
    VerticalExtent,
    Brightness,
    Contrast,
    ColorMode,
}

impl PropertyId {
    /// Numeric identifier defined by the imaging standard
    pub fn id(self) -> u32 {
        match self {
            PropertyId::HorizontalResolution => WIA_IPS_XRES,
            PropertyId::VerticalResolution => WIA_IPS_YRES,
            PropertyId::HorizontalStart => WIA_IPS_XPOS,
            PropertyId::VerticalStart => WIA_IPS_YPOS,
            PropertyId::HorizontalExtent => WIA_IPS_XEXTENT,
            PropertyId::VerticalExtent => WIA_IPS_YEXTENT,
            PropertyId::Brightness => WIA_IPS_BRIGHTNESS,
            PropertyId::Contrast => WIA_IPS_CONTRAST,
            PropertyId::ColorMode => WIA_IPS_CUR_INTENT,
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.id())
    }
}

/// Color mode of the acquired image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Rgb,
    Grayscale,
    Monochrome,
    AutoColor,
}

impl ColorMode {
    pub fn value(self) -> i32 {
        match self {
            ColorMode::Rgb => 0,
            ColorMode::Grayscale => 1,
            ColorMode::Monochrome => 2,
            ColorMode::AutoColor => 3,
        }
    }
}

impl FromStr for ColorMode {
    type Err = UsageError;

    /// Accepts a name (`rgb`, `grayscale`, `monochrome`, `auto`) or its number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "rgb" | "color" => Ok(ColorMode::Rgb),
            "1" | "grayscale" | "gray" => Ok(ColorMode::Grayscale),
            "2" | "monochrome" | "mono" => Ok(ColorMode::Monochrome),
            "3" | "auto" | "autocolor" => Ok(ColorMode::AutoColor),
            _ => Err(UsageError::InvalidColorMode(s.to_string())),
        }
    }
}

/// Property writes for a scan, in the order they are applied
///
/// **Public** - used by the settings applier and its tests
///
/// Resolution and offsets/extents are written per axis, then brightness,
/// contrast and finally color mode.
pub fn scan_properties(config: &ScanConfig) -> [(PropertyId, i32); 9] {
    [
        (PropertyId::HorizontalResolution, config.resolution),
        (PropertyId::VerticalResolution, config.resolution),
        (PropertyId::HorizontalStart, config.start_left),
        (PropertyId::VerticalStart, config.start_top),
        (PropertyId::HorizontalExtent, config.width),
        (PropertyId::VerticalExtent, config.height),
        (PropertyId::Brightness, config.brightness_percent),
        (PropertyId::Contrast, config.contrast_percent),
        (PropertyId::ColorMode, config.color_mode.value()),
    ]
}
