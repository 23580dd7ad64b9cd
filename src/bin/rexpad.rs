//! `rexpad` - interactive regular expression tester
//!
//! # Usage
//!
//! ```bash
//! rexpad
//! rexpad --light
//! ```
//!
//! Press Ctrl+C or Ctrl+Q to quit.

use rexpad::{App, ColorMode, ColorSupport, Error, Theme};
use std::ffi::OsString;

const HELP_TEXT: &str = "rexpad - interactive regular expression tester

USAGE:
    rexpad [OPTIONS]

OPTIONS:
    -h, --help       Print this help message and exit
    -V, --version    Print version and exit
    --light          Use the light color theme

KEYS:
    Tab / Shift+Tab  Cycle between the pattern, flags, and text panes
    Enter            Insert a newline (text pane only)
    Ctrl+C, Ctrl+Q   Quit

FLAGS:
    i   case-insensitive matching
    x   extended mode (whitespace in the pattern is ignored)
    m   dot also matches newline

The NO_COLOR environment variable disables colored output.
";

/// Configuration parsed from command-line arguments.
struct Config {
    light: bool,
}

/// Result of CLI parsing.
enum CliResult {
    Run(Config),
    Help,
    Version,
    Error(String),
}

fn parse_args<I>(args: I) -> CliResult
where
    I: IntoIterator<Item = OsString>,
{
    let mut config = Config { light: false };
    let mut args = args.into_iter();

    // Skip program name
    args.next();

    for arg in args {
        match arg.to_string_lossy().as_ref() {
            "-h" | "--help" => return CliResult::Help,
            "-V" | "--version" => return CliResult::Version,
            "--light" => config.light = true,
            other => return CliResult::Error(format!("Unknown option: {other}")),
        }
    }
    CliResult::Run(config)
}

fn main() {
    match parse_args(std::env::args_os()) {
        CliResult::Run(config) => {
            let theme = if config.light {
                Theme::light()
            } else {
                Theme::dark()
            };
            let color_mode = ColorMode::from(ColorSupport::detect());
            let mut app = App::new(theme, color_mode);
            match app.run() {
                Ok(()) => {}
                Err(Error::NotATty) => {
                    eprintln!("rexpad: stdin and stdout must be a terminal");
                    std::process::exit(1);
                }
                Err(err) => {
                    eprintln!("rexpad: {err}");
                    std::process::exit(1);
                }
            }
        }
        CliResult::Help => print!("{HELP_TEXT}"),
        CliResult::Version => println!("rexpad {}", env!("CARGO_PKG_VERSION")),
        CliResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(2);
        }
    }
}
