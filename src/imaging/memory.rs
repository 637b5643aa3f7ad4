//! In-memory imaging service.
//!
//! Devices, image bytes and failures are scripted up front; every connect
//! and property write is recorded so callers can inspect what happened.

use super::{
    AcquiredImage, DeviceInfo, DeviceType, ImageFormat, ImagingService, PropertyId, ScanDevice,
    ScanItem,
};
use crate::utils::error::ImagingError;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// A scripted device
#[derive(Debug, Clone)]
pub struct MemoryDevice {
    name: String,
    device_type: DeviceType,
    image: Vec<u8>,
    has_item: bool,
    rejected_property: Option<PropertyId>,
    transfer_failure: Option<String>,
}

impl MemoryDevice {
    pub fn new(name: impl Into<String>, device_type: DeviceType) -> Self {
        Self {
            name: name.into(),
            device_type,
            image: Vec::new(),
            has_item: true,
            rejected_property: None,
            transfer_failure: None,
        }
    }

    pub fn scanner(name: impl Into<String>) -> Self {
        Self::new(name, DeviceType::Scanner)
    }

    pub fn camera(name: impl Into<String>) -> Self {
        Self::new(name, DeviceType::Camera)
    }

    /// Bytes returned by every transfer from this device
    pub fn with_image(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.image = bytes.into();
        self
    }

    /// Device exposes no child item
    pub fn without_item(mut self) -> Self {
        self.has_item = false;
        self
    }

    pub fn rejecting(mut self, property: PropertyId) -> Self {
        self.rejected_property = Some(property);
        self
    }

    pub fn failing_transfer(mut self, reason: impl Into<String>) -> Self {
        self.transfer_failure = Some(reason.into());
        self
    }
}

/// Everything the service observed
#[derive(Debug, Default)]
struct Journal {
    connected: Vec<String>,
    writes: Vec<(PropertyId, i32)>,
    transfers: usize,
}

/// Scriptable imaging service
#[derive(Debug, Default)]
pub struct MemoryImagingService {
    devices: Vec<MemoryDevice>,
    journal: Rc<RefCell<Journal>>,
}

impl MemoryImagingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: MemoryDevice) -> Self {
        self.devices.push(device);
        self
    }

    /// Names of devices connected to, in order
    pub fn connected(&self) -> Vec<String> {
        self.journal.borrow().connected.clone()
    }

    /// Property writes accepted so far, in order
    pub fn property_writes(&self) -> Vec<(PropertyId, i32)> {
        self.journal.borrow().writes.clone()
    }

    pub fn transfer_count(&self) -> usize {
        self.journal.borrow().transfers
    }
}

impl ImagingService for MemoryImagingService {
    type Device = MemoryConnection;

    fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, ImagingError> {
        Ok(self
            .devices
            .iter()
            .enumerate()
            .map(|(i, d)| DeviceInfo {
                index: i + 1,
                id: format!("memory:{}", i + 1),
                name: d.name.clone(),
                device_type: d.device_type,
            })
            .collect())
    }

    fn connect(&self, device: &DeviceInfo) -> Result<Self::Device, ImagingError> {
        let script = device
            .index
            .checked_sub(1)
            .and_then(|i| self.devices.get(i))
            .ok_or_else(|| ImagingError::Platform(format!("unknown device {}", device.id)))?;

        debug!("Connecting to in-memory device {}", script.name);
        self.journal
            .borrow_mut()
            .connected
            .push(script.name.clone());

        Ok(MemoryConnection {
            device: script.clone(),
            journal: Rc::clone(&self.journal),
        })
    }
}

/// Connected in-memory device
#[derive(Debug)]
pub struct MemoryConnection {
    device: MemoryDevice,
    journal: Rc<RefCell<Journal>>,
}

impl ScanDevice for MemoryConnection {
    type Item = MemoryItem;

    fn scan_item(&self) -> Result<Self::Item, ImagingError> {
        if !self.device.has_item {
            return Err(ImagingError::NoScanItem(self.device.name.clone()));
        }

        Ok(MemoryItem {
            device: self.device.clone(),
            journal: Rc::clone(&self.journal),
        })
    }
}

/// Item of a connected in-memory device
#[derive(Debug)]
pub struct MemoryItem {
    device: MemoryDevice,
    journal: Rc<RefCell<Journal>>,
}

impl ScanItem for MemoryItem {
    fn set_property(&mut self, id: PropertyId, value: i32) -> Result<(), ImagingError> {
        if self.device.rejected_property == Some(id) {
            return Err(ImagingError::PropertyRejected {
                property: id.id(),
                value,
                reason: "value out of range".to_string(),
            });
        }

        self.journal.borrow_mut().writes.push((id, value));
        Ok(())
    }

    fn transfer(&mut self, format: ImageFormat) -> Result<AcquiredImage, ImagingError> {
        self.journal.borrow_mut().transfers += 1;

        if let Some(reason) = &self.device.transfer_failure {
            return Err(ImagingError::TransferFailed(reason.clone()));
        }

        Ok(AcquiredImage {
            format,
            bytes: self.device.image.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_is_one_based() {
        let service = MemoryImagingService::new()
            .with_device(MemoryDevice::camera("Cam"))
            .with_device(MemoryDevice::scanner("Flatbed"));

        let devices = service.enumerate_devices().unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].index, 1);
        assert_eq!(devices[1].index, 2);
        assert_eq!(devices[1].name, "Flatbed");
        assert!(devices[1].device_type.is_scanner());
    }

    #[test]
    fn test_transfer_reports_requested_format() {
        let service = MemoryImagingService::new()
            .with_device(MemoryDevice::scanner("A").with_image(vec![0xFF, 0xD8]));
        let devices = service.enumerate_devices().unwrap();
        let mut item = service.connect(&devices[0]).unwrap().scan_item().unwrap();

        let image = item.transfer(ImageFormat::Jpeg).unwrap();

        assert_eq!(image.format, ImageFormat::Jpeg);
        assert_eq!(image.bytes, vec![0xFF, 0xD8]);
        assert_eq!(service.transfer_count(), 1);
    }

    #[test]
    fn test_rejected_property_is_not_recorded() {
        let service = MemoryImagingService::new()
            .with_device(MemoryDevice::scanner("A").rejecting(PropertyId::Contrast));
        let devices = service.enumerate_devices().unwrap();
        let mut item = service.connect(&devices[0]).unwrap().scan_item().unwrap();

        assert!(item.set_property(PropertyId::Brightness, 10).is_ok());
        assert!(item.set_property(PropertyId::Contrast, 500).is_err());
        assert_eq!(service.property_writes(), vec![(PropertyId::Brightness, 10)]);
    }
}
