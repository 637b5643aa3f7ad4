//! Stub imaging service for platforms without Windows Image Acquisition.

use super::{
    AcquiredImage, DeviceInfo, ImageFormat, ImagingService, PropertyId, ScanDevice, ScanItem,
};
use crate::utils::error::ImagingError;

fn unsupported() -> ImagingError {
    ImagingError::Unsupported(std::env::consts::OS.to_string())
}

/// Imaging service whose every call fails with `ImagingError::Unsupported`
#[derive(Debug)]
pub struct UnsupportedService {
    _private: (),
}

impl UnsupportedService {
    pub fn new() -> Result<Self, ImagingError> {
        Ok(Self { _private: () })
    }
}

impl ImagingService for UnsupportedService {
    type Device = UnsupportedDevice;

    fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, ImagingError> {
        Err(unsupported())
    }

    fn connect(&self, _device: &DeviceInfo) -> Result<Self::Device, ImagingError> {
        Err(unsupported())
    }
}

/// Never constructed; exists to satisfy the service's associated types
#[derive(Debug)]
pub enum UnsupportedDevice {}

impl ScanDevice for UnsupportedDevice {
    type Item = UnsupportedDevice;

    fn scan_item(&self) -> Result<Self::Item, ImagingError> {
        match *self {}
    }
}

impl ScanItem for UnsupportedDevice {
    fn set_property(&mut self, _id: PropertyId, _value: i32) -> Result<(), ImagingError> {
        match *self {}
    }

    fn transfer(&mut self, _format: ImageFormat) -> Result<AcquiredImage, ImagingError> {
        match *self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_reports_platform() {
        let service = UnsupportedService::new().unwrap();
        let err = service.enumerate_devices().unwrap_err();
        assert!(matches!(err, ImagingError::Unsupported(ref os) if os == std::env::consts::OS));
    }
}
