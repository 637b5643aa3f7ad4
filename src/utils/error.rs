//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::utils::config::{
    EXIT_FATAL, EXIT_SCANNER_NOT_FOUND, EXIT_USAGE, SCANNER_NOT_FOUND_MESSAGE, USAGE,
};
use std::io::Write;
use thiserror::Error;

/// Errors raised while reading the command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("help requested")]
    HelpRequested,

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid integer for {flag}: {value}")]
    InvalidInteger { flag: String, value: String },

    #[error("invalid color mode: {0}")]
    InvalidColorMode(String),
}

/// Errors raised by the imaging service (device enumeration, property writes, transfer)
#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("image acquisition is not supported on {0}")]
    Unsupported(String),

    #[error("no device at index {index} ({count} devices present)")]
    DeviceIndexOutOfRange { index: i32, count: usize },

    #[error("device {0} exposes no scan item")]
    NoScanItem(String),

    #[error("property {property} rejected value {value}: {reason}")]
    PropertyRejected {
        property: u32,
        value: i32,
        reason: String,
    },

    #[error("transfer failed: {0}")]
    TransferFailed(String),

    #[error("imaging service error: {0}")]
    Platform(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Outcome taxonomy for a whole invocation
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("{}", SCANNER_NOT_FOUND_MESSAGE)]
    ScannerNotFound,

    #[error(transparent)]
    Imaging(#[from] ImagingError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Pick the process exit code for a failed invocation
///
/// **Public** - used by main.rs as the single place the process exits
///
/// Walks the whole context chain, so errors wrapped with `.context(...)`
/// keep their exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        match cause.downcast_ref::<ScanError>() {
            Some(ScanError::Usage(_)) => return EXIT_USAGE,
            Some(ScanError::ScannerNotFound) => return EXIT_SCANNER_NOT_FOUND,
            _ => {}
        }
    }
    EXIT_FATAL
}

/// Print the message matching a failed invocation and return its exit code
///
/// **Public** - called by main.rs right before the process exits
///
/// # Arguments
/// * `err` - Failure of the whole invocation
/// * `out` - Receives the usage text or the not-found message (stdout in the CLI)
/// * `err_out` - Receives fatal error chains (stderr in the CLI)
///
/// Write failures are ignored; the exit code is all that is left to report.
pub fn report(err: &anyhow::Error, out: &mut dyn Write, err_out: &mut dyn Write) -> i32 {
    let code = exit_code_for(err);
    let _ = match code {
        EXIT_USAGE => writeln!(out, "{}", USAGE),
        EXIT_SCANNER_NOT_FOUND => writeln!(out, "{}", SCANNER_NOT_FOUND_MESSAGE),
        _ => writeln!(err_out, "Error: {:#}", err),
    };
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_usage() {
        let err = anyhow::Error::new(ScanError::from(UsageError::UnknownFlag("-q".to_string())));
        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }

    #[test]
    fn test_exit_code_output_failure_is_fatal() {
        let err = anyhow::Error::new(ScanError::from(OutputError::InvalidPath(
            "Path is empty".to_string(),
        )));
        assert_eq!(exit_code_for(&err), EXIT_FATAL);
    }

    #[test]
    fn test_exit_code_not_found_through_context() {
        let result: Result<(), ScanError> = Err(ScanError::ScannerNotFound);
        let err = result.context("Failed to resolve device").unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_SCANNER_NOT_FOUND);
    }

    #[test]
    fn test_exit_code_collaborator_failure_is_fatal() {
        let err = anyhow::Error::new(ImagingError::TransferFailed("paper jam".to_string()));
        assert_eq!(exit_code_for(&err), EXIT_FATAL);
    }
}
