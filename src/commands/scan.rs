//! Scan command implementation.
//!
//! The scan command:
//! 1. Enumerates devices
//! 2. Resolves the target device
//! 3. Connects and selects its scan item
//! 4. Applies capture settings
//! 5. Transfers a JPEG image
//! 6. Writes it to the output path

use crate::commands::device::resolve_device;
use crate::commands::models::ScanConfig;
use crate::commands::settings::apply_settings;
use crate::imaging::{ImageFormat, ImagingService, ScanDevice, ScanItem};
use crate::output::write_image;
use crate::utils::error::ScanError;
use anyhow::{Context, Result};
use log::{info, warn};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Encoding every scan is transferred in
pub const SCAN_FORMAT: ImageFormat = ImageFormat::Jpeg;

/// Execute the scan command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `config` - Parsed capture parameters
/// * `service` - Imaging service to acquire from
/// * `out` - Destination for progress lines (stdout in the CLI)
///
/// # Returns
/// Number of image bytes written
///
/// # Errors
/// * `ScanError::ScannerNotFound` when no scanner is present
/// * `ScanError::Imaging` for index out of range, connection, property and transfer failures
/// * `ScanError::Output` for file write errors
///
/// The transfer blocks for the whole physical scan and cannot be cancelled.
pub fn execute_scan<S: ImagingService>(
    config: &ScanConfig,
    service: &S,
    out: &mut dyn Write,
) -> Result<u64> {
    let start_time = Instant::now();

    let devices = service
        .enumerate_devices()
        .map_err(ScanError::from)
        .context("Failed to enumerate devices")?;
    let target = resolve_device(&devices, config.device_index)?;

    let device = service
        .connect(&target)
        .map_err(ScanError::from)
        .with_context(|| format!("Failed to connect to {}", target.name))?;
    let mut item = device
        .scan_item()
        .map_err(ScanError::from)
        .with_context(|| format!("Failed to open scan item of {}", target.name))?;

    apply_settings(&mut item, config)
        .map_err(ScanError::from)
        .context("Failed to apply scanner settings")?;

    writeln!(
        out,
        "Scanning with {} to {}",
        target.name,
        config.output_path.display()
    )?;
    writeln!(
        out,
        "  resolution: {}  image size: {},{}",
        config.resolution, config.width, config.height
    )?;

    let image = item
        .transfer(SCAN_FORMAT)
        .map_err(ScanError::from)
        .with_context(|| format!("Failed to acquire image from {}", target.name))?;

    if !has_extension_for(&config.output_path, image.format) {
        warn!(
            "Output {} does not end in .{}; the file will still contain {:?} data",
            config.output_path.display(),
            image.format.extension(),
            image.format
        );
    }

    let written = write_image(&image, &config.output_path)
        .map_err(ScanError::from)
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    info!(
        "Scan completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(written)
}

fn has_extension_for(path: &Path, format: ImageFormat) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    match format {
        ImageFormat::Jpeg => ext == "jpg" || ext == "jpeg",
    }
}
