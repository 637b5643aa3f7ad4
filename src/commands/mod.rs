//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the imaging service and output writer to perform user tasks.

pub mod device;
pub mod list;
pub mod models;
pub mod scan;
pub mod settings;

// Re-export main command functions
pub use device::resolve_device;
pub use list::execute_list;
pub use models::{Action, Invocation, ScanConfig};
pub use scan::execute_scan;
pub use settings::apply_settings;
