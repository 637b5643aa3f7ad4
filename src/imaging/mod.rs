//! Capability surface of the platform imaging service.
//!
//! Device discovery, property storage and image transfer all live in the
//! operating system. This module describes the small slice of that service
//! the CLI needs:
//! - `ImagingService` enumerates devices and connects to one
//! - `ScanDevice` hands out the item that owns the scan settings
//! - `ScanItem` accepts integer property writes and performs the transfer

pub mod memory;
pub mod properties;

#[cfg(windows)]
pub mod wia;

#[cfg(not(windows))]
pub mod unsupported;

pub use properties::{scan_properties, ColorMode, PropertyId};

use crate::utils::error::ImagingError;

/// Device category reported by the imaging service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Scanner,
    Camera,
    Video,
    Other(u32),
}

impl DeviceType {
    /// Map an STI device type code (high word of WIA_DIP_DEV_TYPE)
    pub fn from_sti_code(code: u32) -> Self {
        match code {
            1 => DeviceType::Scanner,
            2 => DeviceType::Camera,
            3 => DeviceType::Video,
            other => DeviceType::Other(other),
        }
    }

    pub fn is_scanner(self) -> bool {
        self == DeviceType::Scanner
    }
}

/// One enumerated device, as reported by the imaging service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// 1-based position in enumeration order
    pub index: usize,

    /// Service-specific device identifier used to connect
    pub id: String,

    /// Human-readable device name
    pub name: String,

    pub device_type: DeviceType,
}

/// Encoding requested from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Encoded image returned by a transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// Entry point into the platform imaging service
pub trait ImagingService {
    type Device: ScanDevice;

    /// All devices in enumeration order, regardless of type
    fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, ImagingError>;

    /// Open a session with an enumerated device
    fn connect(&self, device: &DeviceInfo) -> Result<Self::Device, ImagingError>;
}

/// A connected device
pub trait ScanDevice {
    type Item: ScanItem;

    /// The first child item (the flatbed on a scanner)
    fn scan_item(&self) -> Result<Self::Item, ImagingError>;
}

/// The settable, transferable part of a device
pub trait ScanItem {
    /// Write one integer property; the service rejects unsupported values
    fn set_property(&mut self, id: PropertyId, value: i32) -> Result<(), ImagingError>;

    /// Acquire an image. Blocks for the whole physical scan.
    fn transfer(&mut self, format: ImageFormat) -> Result<AcquiredImage, ImagingError>;
}

/// Open the imaging service of the running platform
///
/// **Public** - called once by main.rs after argument parsing
#[cfg(windows)]
pub fn open_platform_service() -> Result<wia::WiaService, ImagingError> {
    wia::WiaService::new()
}

/// Open the imaging service of the running platform
///
/// **Public** - called once by main.rs after argument parsing
#[cfg(not(windows))]
pub fn open_platform_service() -> Result<unsupported::UnsupportedService, ImagingError> {
    unsupported::UnsupportedService::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_from_sti_code() {
        assert_eq!(DeviceType::from_sti_code(1), DeviceType::Scanner);
        assert_eq!(DeviceType::from_sti_code(2), DeviceType::Camera);
        assert_eq!(DeviceType::from_sti_code(3), DeviceType::Video);
        assert_eq!(DeviceType::from_sti_code(9), DeviceType::Other(9));
        assert!(!DeviceType::Camera.is_scanner());
    }
}
