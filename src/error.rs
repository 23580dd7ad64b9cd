//! Error types for rexpad.
//!
//! These cover the terminal/IO setup surface only. Pattern problems
//! (empty, invalid, no matches) are session outcomes rendered in the
//! results pane, not errors; see [`crate::segment::SegmentError`].

use std::fmt;
use std::io;

/// Result type alias for rexpad operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for rexpad terminal operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal operations.
    Io(io::Error),
    /// Standard output is not attached to a terminal.
    NotATty,
    /// Terminal reported unusable dimensions (e.g., zero width/height).
    InvalidDimensions { width: u16, height: u16 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::NotATty => write!(f, "stdout is not a terminal"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid terminal dimensions: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
