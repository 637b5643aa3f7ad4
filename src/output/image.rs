//! Image file writer.
//!
//! Persists transferred image bytes, replacing any existing file.

use crate::imaging::AcquiredImage;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write an acquired image to a file
///
/// **Public** - main entry point for image output
///
/// # Arguments
/// * `image` - Encoded image returned by the transfer
/// * `output_path` - Destination file; an existing file is deleted first
///
/// # Returns
/// Number of bytes written
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, is a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - I/O error while deleting or writing
///
/// # Example
/// ```ignore
/// let image = item.transfer(ImageFormat::Jpeg)?;
/// write_image(&image, "scan.jpg")?;
/// ```
pub fn write_image(image: &AcquiredImage, output_path: impl AsRef<Path>) -> Result<u64, OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing image to: {}", output_path.display());

    check_destination(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Not atomic: a crash between delete and write leaves no file
    if output_path.exists() {
        debug!("Removing existing file: {}", output_path.display());
        std::fs::remove_file(output_path).map_err(OutputError::WriteFailed)?;
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;

    let mut writer = BufWriter::new(file);

    writer
        .write_all(&image.bytes)
        .map_err(OutputError::WriteFailed)?;

    writer.flush().map_err(OutputError::WriteFailed)?;

    let file_size = image.bytes.len() as u64;
    info!(
        "Image written successfully ({} bytes, {:.2} KB)",
        file_size,
        file_size as f64 / 1024.0
    );

    Ok(file_size)
}

/// The destination must name a file: not empty, not an existing directory
fn check_destination(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("no output file given".to_string()));
    }
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "{} is a directory",
            path.display()
        )));
    }
    Ok(())
}
