//! List command implementation.

use crate::commands::device::scanners;
use crate::imaging::ImagingService;
use crate::utils::error::ScanError;
use anyhow::{Context, Result};
use log::info;
use std::io::Write;

/// Print every scanner-type device with its enumeration index
///
/// **Public** - main entry point for `-listscanners`
///
/// # Arguments
/// * `service` - Imaging service to enumerate
/// * `out` - Destination for the listing (stdout in the CLI)
///
/// # Returns
/// Number of scanners printed
///
/// Indices are positions in the full enumeration, so they can be passed
/// straight to `-scanner`.
pub fn execute_list<S: ImagingService>(service: &S, out: &mut dyn Write) -> Result<usize> {
    writeln!(out, "Scanning for scanners")?;

    let devices = service
        .enumerate_devices()
        .map_err(ScanError::from)
        .context("Failed to enumerate devices")?;

    let mut count = 0;
    for device in scanners(&devices) {
        writeln!(out, " {} {}", device.index, device.name)?;
        count += 1;
    }

    info!("{} of {} devices are scanners", count, devices.len());
    Ok(count)
}
