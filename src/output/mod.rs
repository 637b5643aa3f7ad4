//! Output writers for acquired images.
//!
//! The writer replaces whatever already sits at the output path.

pub mod image;

// Re-export main function
pub use image::write_image;
