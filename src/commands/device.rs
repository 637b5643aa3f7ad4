//! Device resolution.

use crate::imaging::DeviceInfo;
use crate::utils::error::{ImagingError, ScanError};
use log::debug;

/// Pick the device a scan should use
///
/// **Public** - used by the scan command
///
/// # Arguments
/// * `devices` - Full enumeration, in service order
/// * `index` - Explicit 1-based index, or None for the first scanner
///
/// # Errors
/// * `ScanError::Imaging(DeviceIndexOutOfRange)` - explicit index names no device
/// * `ScanError::ScannerNotFound` - no scanner-type device in the list
///
/// An explicit index selects that entry whatever its device type.
pub fn resolve_device(devices: &[DeviceInfo], index: Option<i32>) -> Result<DeviceInfo, ScanError> {
    match index {
        Some(index) => usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| devices.get(i))
            .cloned()
            .ok_or(ScanError::Imaging(ImagingError::DeviceIndexOutOfRange {
                index,
                count: devices.len(),
            })),
        None => {
            let found = devices.iter().find(|d| d.device_type.is_scanner()).cloned();
            if let Some(device) = &found {
                debug!("Selected first scanner: {} ({})", device.index, device.name);
            }
            found.ok_or(ScanError::ScannerNotFound)
        }
    }
}

/// Scanner-type devices, in enumeration order
pub fn scanners(devices: &[DeviceInfo]) -> impl Iterator<Item = &DeviceInfo> {
    devices.iter().filter(|d| d.device_type.is_scanner())
}
