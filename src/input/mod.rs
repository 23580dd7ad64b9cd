//! Input parsing for terminal events.
//!
//! This module provides ANSI sequence parsing for keyboard, paste, and
//! resize events. It supports legacy VT sequences, CSI sequences with
//! modifiers, and bracketed paste. The session is keyboard-only, so mouse
//! protocols are not decoded; their sequences are skipped as unrecognized.

mod event;
mod keyboard;
mod parser;

pub use event::{Event, PasteEvent, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, ParseError, ParseResult};
