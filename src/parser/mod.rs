//! Command-line parsing.
//!
//! This module handles:
//! - Recognising flags and their aliases
//! - Reading integer, path and color mode values
//! - Rejecting anything malformed before work starts

pub mod args;

// Re-export main functions
pub use args::{parse_args, parse_command_line};
