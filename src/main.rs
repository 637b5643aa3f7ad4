//! scanimage CLI
//!
//! Lists scanners, or configures one and saves a single scan as JPEG.

use anyhow::{Context, Result};
use env_logger::Env;
use std::io;

use scanimage::commands::{execute_list, execute_scan, Action};
use scanimage::imaging::open_platform_service;
use scanimage::parser::parse_command_line;
use scanimage::utils::config::EXIT_SUCCESS;
use scanimage::utils::report;

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => report(&err, &mut io::stdout(), &mut io::stderr()),
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let invocation = parse_command_line(std::env::args().skip(1))?;

    // Setup logging
    let log_level = if invocation.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let service = open_platform_service().context("Failed to open imaging service")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Execute command
    match invocation.action {
        Action::ListScanners => {
            execute_list(&service, &mut out)?;
        }

        Action::Scan(config) => {
            execute_scan(&config, &service, &mut out)?;
        }
    }

    Ok(())
}
