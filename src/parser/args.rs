//! Flat single-dash flag parser.
//!
//! Flags are processed left to right and a repeated flag overwrites the
//! earlier value. The whole list is read before anything runs, so a bad
//! token anywhere rejects the invocation.

use crate::commands::models::{Action, Invocation, ScanConfig};
use crate::imaging::properties::ColorMode;
use crate::utils::config::FIRST_SCANNER_INDEX;
use crate::utils::error::{ScanError, UsageError};
use log::debug;
use std::path::PathBuf;

/// Parse command-line tokens (without the program name)
///
/// **Public** - typed parser, wrapped by `parse_command_line`
///
/// # Arguments
/// * `args` - Tokens in command-line order
///
/// # Returns
/// The requested action plus global switches
///
/// # Errors
/// * `UsageError::HelpRequested` - `-help` was given
/// * `UsageError::UnknownFlag` - token is not a recognised flag
/// * `UsageError::MissingValue` - flag needing a value was last
/// * `UsageError::InvalidInteger` - value is not a 32-bit integer
/// * `UsageError::InvalidColorMode` - color mode name or number not recognised
///
/// # Example
/// ```ignore
/// let invocation = parse_args(["-width", "500", "-o", "page.jpg"])?;
/// ```
pub fn parse_args<I, S>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tokens = args.into_iter().map(Into::into);
    let mut config = ScanConfig::default();
    let mut list = false;
    let mut verbose = false;

    while let Some(flag) = tokens.next() {
        match flag.as_str() {
            "-help" => return Err(UsageError::HelpRequested),
            "-l" | "-listscanners" => list = true,
            "-v" | "-verbose" => verbose = true,
            "-scanner" => {
                config.device_index =
                    Some(integer(&flag, &mut tokens)?).filter(|&i| i != FIRST_SCANNER_INDEX)
            }
            "-o" | "-outfile" => config.output_path = PathBuf::from(value(&flag, &mut tokens)?),
            "-x" => config.start_left = integer(&flag, &mut tokens)?,
            "-y" => config.start_top = integer(&flag, &mut tokens)?,
            "-w" | "-width" => config.width = integer(&flag, &mut tokens)?,
            "-h" | "-height" => config.height = integer(&flag, &mut tokens)?,
            "-r" | "-resolution" => config.resolution = integer(&flag, &mut tokens)?,
            "-c" | "-colormode" => {
                config.color_mode = value(&flag, &mut tokens)?.parse::<ColorMode>()?
            }
            "-brightness" => config.brightness_percent = integer(&flag, &mut tokens)?,
            "-contrast" => config.contrast_percent = integer(&flag, &mut tokens)?,
            _ => return Err(UsageError::UnknownFlag(flag.clone())),
        }
    }

    let action = if list {
        Action::ListScanners
    } else {
        debug!("Parsed scan configuration: {:?}", config);
        Action::Scan(config)
    };

    Ok(Invocation { action, verbose })
}

/// Parse the process command line for the top-level handler
///
/// **Public** - main entry point called from main.rs
///
/// Same as `parse_args`, with the failure lifted into `ScanError::Usage`.
pub fn parse_command_line<I, S>(args: I) -> Result<Invocation, ScanError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ok(parse_args(args)?)
}

/// Take the token following `flag`
fn value(flag: &str, tokens: &mut impl Iterator<Item = String>) -> Result<String, UsageError> {
    tokens
        .next()
        .ok_or_else(|| UsageError::MissingValue(flag.to_string()))
}

fn integer(flag: &str, tokens: &mut impl Iterator<Item = String>) -> Result<i32, UsageError> {
    let raw = value(flag, tokens)?;
    raw.trim()
        .parse::<i32>()
        .map_err(|_| UsageError::InvalidInteger {
            flag: flag.to_string(),
            value: raw,
        })
}
