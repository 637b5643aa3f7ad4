//! Configuration and constants for the CLI.

/// Default scan resolution in DPI
pub const DEFAULT_RESOLUTION: i32 = 150;

// A comic page is 10.125 x 6.625 inches, roughly 1003x1518 at 150 DPI
pub const DEFAULT_WIDTH: i32 = 1000;
pub const DEFAULT_HEIGHT: i32 = 1518;

/// `-scanner` value meaning "first scanner found", same as omitting the flag
pub const FIRST_SCANNER_INDEX: i32 = -1;

/// Default output file when `-outfile` is not given
pub const DEFAULT_OUTFILE: &str = "scan.jpg";

// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_SCANNER_NOT_FOUND: i32 = -1;
pub const EXIT_FATAL: i32 = 2;

/// Message printed when no scanner could be selected
pub const SCANNER_NOT_FOUND_MESSAGE: &str = "Scanner not found";

/// Usage text printed for `-help` and for any malformed command line
pub const USAGE: &str = "scanimage usage\n\n\
    \t-listscanners  (if provided we list, then bail)\n\
    \t-scanner id (default is first in the list)\n\
    \t-x x (0) offset \n\
    \t-y y (0) offst \n\
    \t-width x (1000)\n\
    \t-height y (1518)\n\
    \t-resolution r (150)\n\
    \t-colormode m (rgb) rgb|grayscale|monochrome|auto\n\
    \t-brightness b (0)\n\
    \t-contrast c (0)\n\
    \t-outfile fn (default is scan.jpg)\n\
    \t-verbose  (debug logging)\n\
    \t-help  (this message)";

// WIA scanner item property identifiers (wiadef.h)
pub const WIA_IPS_CUR_INTENT: u32 = 6146;
pub const WIA_IPS_XRES: u32 = 6147;
pub const WIA_IPS_YRES: u32 = 6148;
pub const WIA_IPS_XPOS: u32 = 6149;
pub const WIA_IPS_YPOS: u32 = 6150;
pub const WIA_IPS_XEXTENT: u32 = 6151;
pub const WIA_IPS_YEXTENT: u32 = 6152;
pub const WIA_IPS_BRIGHTNESS: u32 = 6154;
pub const WIA_IPS_CONTRAST: u32 = 6155;
