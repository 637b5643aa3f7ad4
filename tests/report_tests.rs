use pretty_assertions::assert_eq;
use scanimage::commands::{execute_scan, ScanConfig};
use scanimage::imaging::memory::{MemoryDevice, MemoryImagingService};
use scanimage::parser::parse_command_line;
use scanimage::utils::config::{
    EXIT_FATAL, EXIT_SCANNER_NOT_FOUND, EXIT_USAGE, SCANNER_NOT_FOUND_MESSAGE, USAGE,
};
use scanimage::utils::{report, ScanError, UsageError};

/// Run the top-level handler and capture (exit code, stdout, stderr)
fn reported(err: &anyhow::Error) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err_out = Vec::new();
    let code = report(err, &mut out, &mut err_out);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err_out).unwrap(),
    )
}

fn usage_failure(args: &[&str]) -> anyhow::Error {
    anyhow::Error::from(parse_command_line(args.iter().copied()).unwrap_err())
}

#[test]
fn test_malformed_command_lines_print_usage() {
    let cases: [&[&str]; 5] = [
        &["-help"],
        &["-bogus"],
        &["-scanner", "abc"],
        &["-listscanners", "-help"],
        &["-width", "500", "-unknown", "-l"],
    ];

    for args in cases {
        let (code, out, err_out) = reported(&usage_failure(args));

        assert_eq!(code, EXIT_USAGE, "args: {:?}", args);
        assert_eq!(out, format!("{}\n", USAGE), "args: {:?}", args);
        assert_eq!(err_out, "", "args: {:?}", args);
    }
}

#[test]
fn test_parse_failure_is_a_usage_scan_error() {
    let err = parse_command_line(["-scanner"]).unwrap_err();

    assert!(matches!(
        err,
        ScanError::Usage(UsageError::MissingValue(ref flag)) if flag == "-scanner"
    ));
}

#[test]
fn test_scanner_not_found_message() {
    let temp_dir = tempfile::tempdir().unwrap();
    let service = MemoryImagingService::new().with_device(MemoryDevice::camera("Cam"));
    let config = ScanConfig {
        output_path: temp_dir.path().join("scan.jpg"),
        ..Default::default()
    };

    let err = execute_scan(&config, &service, &mut Vec::new()).unwrap_err();
    let (code, out, err_out) = reported(&err);

    assert_eq!(code, EXIT_SCANNER_NOT_FOUND);
    assert_eq!(out, format!("{}\n", SCANNER_NOT_FOUND_MESSAGE));
    assert_eq!(out, "Scanner not found\n");
    assert_eq!(err_out, "");
}

#[test]
fn test_fatal_failure_goes_to_stderr_with_context() {
    let temp_dir = tempfile::tempdir().unwrap();
    let service = MemoryImagingService::new()
        .with_device(MemoryDevice::scanner("Jammed").failing_transfer("paper jam"));
    let config = ScanConfig {
        output_path: temp_dir.path().join("scan.jpg"),
        ..Default::default()
    };

    let err = execute_scan(&config, &service, &mut Vec::new()).unwrap_err();
    let (code, out, err_out) = reported(&err);

    assert_eq!(code, EXIT_FATAL);
    assert_eq!(out, "");
    assert!(err_out.starts_with("Error: Failed to acquire image from Jammed"));
    assert!(err_out.contains("paper jam"));
}
