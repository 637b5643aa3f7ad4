//! scanimage
//!
//! Acquire a single image from a flatbed scanner through the
//! operating system's imaging service.
//!
//! This crate provides the core implementation for the
//! `scanimage` CLI tool: argument parsing, device selection,
//! capture settings, transfer and output.
//!
//! ## Getting Started
//!
//! ```bash
//! scanimage -listscanners
//! scanimage -scanner 1 -resolution 300 -o page.jpg
//! ```

pub mod commands;
pub mod imaging;
pub mod output;
pub mod parser;
pub mod utils;
