//! `rexpad` - Interactive regular expression tester for the terminal
//!
//! Edit a pattern, its flags, and a test string side by side; the results
//! pane re-renders the test string on every keystroke with matches
//! highlighted. The segmentation core is a pure library function usable
//! without the terminal UI.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for color math
#![allow(clippy::module_name_repetitions)] // Allow SegmentStyle, KeyEvent etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer

pub mod ansi;
pub mod app;
pub mod color;
pub mod edit;
pub mod engine;
pub mod error;
pub mod event;
pub mod flags;
pub mod input;
pub mod segment;
pub mod style;
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod unicode;

// Re-export core types at crate root
pub use color::Rgb;
pub use engine::{CompileError, Engine, Matcher, RegexEngine};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use flags::{FLAG_ALPHABET, FlagSet, accepts_flag_char};
pub use segment::{
    MatchSpan, Segment, SegmentError, SegmentStyle, display_segments, reconstruct, segment,
    segment_with,
};
pub use style::{Style, TextAttributes};

// Re-export input types
pub use input::{Event, InputParser, KeyCode, KeyEvent, KeyModifiers};

// Re-export ANSI types
pub use ansi::{AnsiWriter, ColorMode};

// Re-export commonly used types
pub use app::{App, Control, Focus};
pub use terminal::{ColorSupport, RawModeGuard, enable_raw_mode, is_tty, terminal_size};
pub use theme::Theme;
