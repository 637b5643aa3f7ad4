//! Settings applier.

use crate::commands::models::ScanConfig;
use crate::imaging::{scan_properties, ScanItem};
use crate::utils::error::ImagingError;
use log::debug;

/// Write every capture setting onto the scan item
///
/// **Public** - used by the scan command before transfer
///
/// Stops at the first property the service rejects; values are not
/// range-checked here.
pub fn apply_settings<I: ScanItem>(item: &mut I, config: &ScanConfig) -> Result<(), ImagingError> {
    for (property, value) in scan_properties(config) {
        debug!("Applying {} = {}", property, value);
        item.set_property(property, value)?;
    }
    Ok(())
}
