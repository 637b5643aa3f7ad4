use pretty_assertions::assert_eq;
use scanimage::commands::{Action, Invocation, ScanConfig};
use scanimage::imaging::ColorMode;
use scanimage::parser::parse_args;
use scanimage::utils::UsageError;
use std::path::PathBuf;

fn scan_config(args: &[&str]) -> ScanConfig {
    match parse_args(args.iter().copied()).unwrap().action {
        Action::Scan(config) => config,
        other => panic!("expected a scan, got {:?}", other),
    }
}

#[test]
fn test_no_args_uses_defaults() {
    let invocation = parse_args(Vec::<String>::new()).unwrap();

    assert_eq!(
        invocation,
        Invocation {
            action: Action::Scan(ScanConfig::default()),
            verbose: false,
        }
    );
}

#[test]
fn test_default_values() {
    let config = ScanConfig::default();

    assert_eq!(config.resolution, 150);
    assert_eq!(config.start_left, 0);
    assert_eq!(config.start_top, 0);
    assert_eq!(config.width, 1000);
    assert_eq!(config.height, 1518);
    assert_eq!(config.color_mode, ColorMode::Rgb);
    assert_eq!(config.device_index, None);
    assert_eq!(config.output_path, PathBuf::from("scan.jpg"));
}

#[test]
fn test_size_and_resolution() {
    let config = scan_config(&["-width", "500", "-height", "800", "-resolution", "300"]);

    assert_eq!(
        config,
        ScanConfig {
            width: 500,
            height: 800,
            resolution: 300,
            ..Default::default()
        }
    );
}

#[test]
fn test_short_aliases() {
    let config = scan_config(&["-w", "10", "-h", "20", "-r", "600", "-o", "out.jpg", "-c", "gray"]);

    assert_eq!(config.width, 10);
    assert_eq!(config.height, 20);
    assert_eq!(config.resolution, 600);
    assert_eq!(config.output_path, PathBuf::from("out.jpg"));
    assert_eq!(config.color_mode, ColorMode::Grayscale);
}

#[test]
fn test_offsets_and_levels() {
    let config = scan_config(&[
        "-x", "12", "-y", "34", "-brightness", "-20", "-contrast", "15", "-colormode", "3",
    ]);

    assert_eq!(config.start_left, 12);
    assert_eq!(config.start_top, 34);
    assert_eq!(config.brightness_percent, -20);
    assert_eq!(config.contrast_percent, 15);
    assert_eq!(config.color_mode, ColorMode::AutoColor);
}

#[test]
fn test_scanner_index() {
    let config = scan_config(&["-scanner", "2", "-outfile", "dir/page.jpg"]);

    assert_eq!(config.device_index, Some(2));
    assert_eq!(config.output_path, PathBuf::from("dir/page.jpg"));
}

#[test]
fn test_scanner_minus_one_means_first_found() {
    assert_eq!(scan_config(&["-scanner", "-1"]).device_index, None);
    assert_eq!(scan_config(&["-scanner", "3", "-scanner", "-1"]).device_index, None);
    assert_eq!(scan_config(&["-scanner", "-2"]).device_index, Some(-2));
}

#[test]
fn test_repeated_flag_last_wins() {
    let config = scan_config(&["-width", "100", "-w", "200", "-width", "300"]);
    assert_eq!(config.width, 300);
}

#[test]
fn test_list_scanners() {
    for flag in ["-listscanners", "-l"] {
        let invocation = parse_args([flag]).unwrap();
        assert_eq!(invocation.action, Action::ListScanners);
    }
}

#[test]
fn test_verbose() {
    assert!(parse_args(["-verbose"]).unwrap().verbose);
    assert!(parse_args(["-v", "-l"]).unwrap().verbose);
}

#[test]
fn test_help() {
    assert_eq!(parse_args(["-help"]), Err(UsageError::HelpRequested));
    assert_eq!(
        parse_args(["-width", "10", "-help", "-l"]),
        Err(UsageError::HelpRequested)
    );
}

#[test]
fn test_non_integer_scanner() {
    assert_eq!(
        parse_args(["-scanner", "abc"]),
        Err(UsageError::InvalidInteger {
            flag: "-scanner".to_string(),
            value: "abc".to_string(),
        })
    );
}

#[test]
fn test_unknown_flag() {
    assert_eq!(
        parse_args(["--width", "10"]),
        Err(UsageError::UnknownFlag("--width".to_string()))
    );
    assert_eq!(
        parse_args(["scan.jpg"]),
        Err(UsageError::UnknownFlag("scan.jpg".to_string()))
    );
}

#[test]
fn test_unknown_flag_after_list_still_fails() {
    assert_eq!(
        parse_args(["-listscanners", "-bogus"]),
        Err(UsageError::UnknownFlag("-bogus".to_string()))
    );
}

#[test]
fn test_missing_value() {
    assert_eq!(
        parse_args(["-resolution"]),
        Err(UsageError::MissingValue("-resolution".to_string()))
    );
    assert_eq!(
        parse_args(["-o"]),
        Err(UsageError::MissingValue("-o".to_string()))
    );
}

#[test]
fn test_invalid_color_mode() {
    assert_eq!(
        parse_args(["-colormode", "sepia"]),
        Err(UsageError::InvalidColorMode("sepia".to_string()))
    );
}
