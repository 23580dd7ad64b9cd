//! ANSI sequence parser for terminal input.
//!
//! Parses raw bytes from the terminal into structured events. Supports:
//! - Standard VT sequences (arrows, function keys)
//! - CSI sequences with modifiers
//! - Bracketed paste mode
//! - XTWINOPS resize reports
//!
//! Mouse and focus sequences are not decoded; they surface as
//! [`ParseError::UnrecognizedSequence`] carrying the full sequence so the
//! caller can skip it.

// Parser has many match arms for different terminal sequences
#![allow(clippy::match_same_arms)]
// Self is used for consistency with other methods even when not needed
#![allow(clippy::unused_self)]
// Result wrapping is for consistency in the parsing API
#![allow(clippy::unnecessary_wraps)]

use crate::input::event::{Event, PasteEvent, ResizeEvent};
use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};

/// Error type for input parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer is empty.
    Empty,
    /// Incomplete escape sequence (need more bytes).
    Incomplete,
    /// Unrecognized escape sequence.
    ///
    /// Carries the full sequence bytes; skip that many bytes and continue.
    UnrecognizedSequence(Vec<u8>),
    /// Invalid UTF-8 in input.
    InvalidUtf8,
    /// Paste buffer exceeded maximum size limit.
    ///
    /// The paste was aborted because the incoming data exceeded
    /// [`MAX_PASTE_BUFFER_SIZE`], preventing unbounded memory growth from
    /// malformed input.
    PasteBufferOverflow,
    /// Invalid resize event format.
    ///
    /// The resize sequence (CSI 8;height;width t) contained non-numeric
    /// values for width or height.
    InvalidResizeFormat,
}

/// Result of parsing input.
pub type ParseResult = Result<(Event, usize), ParseError>;

/// Maximum size for paste buffer to prevent unbounded memory growth (10 MB).
pub const MAX_PASTE_BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// Parser state for multi-byte sequences.
///
/// The caller owns the byte buffer: on [`ParseError::Incomplete`] it keeps
/// the unconsumed bytes and retries with the same (grown) buffer once more
/// input arrives. The parser itself only remembers whether a bracketed
/// paste is in progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputParser {
    /// Whether we're in bracketed paste mode.
    in_paste: bool,
}

impl InputParser {
    /// Create a new input parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse bytes into an event.
    ///
    /// Returns the event and number of bytes consumed, or an error.
    /// Call repeatedly with the same buffer until `Err(ParseError::Empty)`
    /// or `Err(ParseError::Incomplete)` is returned.
    ///
    /// # Errors
    ///
    /// See [`ParseError`] for the failure cases; none are fatal.
    pub fn parse(&mut self, input: &[u8]) -> ParseResult {
        if input.is_empty() {
            return Err(ParseError::Empty);
        }

        // Handle bracketed paste mode
        if self.in_paste {
            return self.parse_paste(input);
        }

        let first = input[0];

        match first {
            // Escape sequence
            0x1b => self.parse_escape(input),
            // Control characters
            0x00 => Ok((KeyEvent::key(KeyCode::Null).into(), 1)),
            0x09 => Ok((KeyEvent::key(KeyCode::Tab).into(), 1)),
            0x0d => Ok((KeyEvent::key(KeyCode::Enter).into(), 1)),
            0x01..=0x1a => {
                // Ctrl+A through Ctrl+Z
                let c = (first - 1 + b'a') as char;
                Ok((
                    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CTRL).into(),
                    1,
                ))
            }
            0x7f => Ok((KeyEvent::key(KeyCode::Backspace).into(), 1)),
            // Regular characters (ASCII)
            0x20..=0x7e => Ok((KeyEvent::char(first as char).into(), 1)),
            // UTF-8 sequences
            0x80..=0xff => self.parse_utf8(input),
            _ => Ok((KeyEvent::char(first as char).into(), 1)),
        }
    }

    /// Parse an escape sequence.
    fn parse_escape(&mut self, input: &[u8]) -> ParseResult {
        if input.len() == 1 {
            // Could be just Escape or start of sequence
            return Err(ParseError::Incomplete);
        }

        match input[1] {
            // CSI sequence: ESC [
            b'[' => self.parse_csi(input),
            // SS3 sequence: ESC O (application-mode keys)
            b'O' => self.parse_ss3(input),
            // Alt+key: ESC <char>
            0x20..=0x7e => {
                let c = input[1] as char;
                Ok((KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT).into(), 2))
            }
            // Double escape
            0x1b => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
            _ => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
        }
    }

    /// Parse a CSI sequence (ESC [ ...).
    fn parse_csi(&mut self, input: &[u8]) -> ParseResult {
        if input.len() < 3 {
            return Err(ParseError::Incomplete);
        }

        // Find the final byte (0x40-0x7e)
        let mut end = 2;
        while end < input.len() {
            let b = input[end];
            if (0x40..=0x7e).contains(&b) {
                break;
            }
            end += 1;
        }

        if end >= input.len() {
            return Err(ParseError::Incomplete);
        }

        let final_byte = input[end];
        let params = &input[2..end];

        match final_byte {
            // Arrow keys and navigation
            b'A' => self.parse_modified_key(params, KeyCode::Up, end + 1),
            b'B' => self.parse_modified_key(params, KeyCode::Down, end + 1),
            b'C' => self.parse_modified_key(params, KeyCode::Right, end + 1),
            b'D' => self.parse_modified_key(params, KeyCode::Left, end + 1),
            b'H' => self.parse_modified_key(params, KeyCode::Home, end + 1),
            b'F' => self.parse_modified_key(params, KeyCode::End, end + 1),

            // Shift+Tab
            b'Z' => self.parse_modified_key(params, KeyCode::BackTab, end + 1),

            // Bracketed paste start: scan the remainder for the end marker
            // immediately so a paste delivered in one read parses in one call
            b'~' if params == b"200" => {
                self.in_paste = true;
                self.parse_paste(input)
            }

            // Tilde sequences: ESC [ <number> ~
            b'~' => self.parse_tilde_key(params, &input[..=end]),

            // Resize report (XTWINOPS)
            b't' => self.parse_resize(params, &input[..=end]),

            // Everything else (mouse, focus, private modes) is skipped
            _ => Err(ParseError::UnrecognizedSequence(input[..=end].to_vec())),
        }
    }

    /// Parse a key with modifiers from CSI params.
    fn parse_modified_key(&self, params: &[u8], base_key: KeyCode, consumed: usize) -> ParseResult {
        let modifiers = if params.is_empty() {
            KeyModifiers::empty()
        } else {
            self.parse_modifiers(params)?
        };
        Ok((KeyEvent::new(base_key, modifiers).into(), consumed))
    }

    /// Parse modifiers from CSI parameter bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUtf8`] if the parameter bytes are not
    /// valid UTF-8.
    fn parse_modifiers(&self, params: &[u8]) -> Result<KeyModifiers, ParseError> {
        // Format: 1;N where N encodes modifiers
        // N = 1 + (shift ? 1 : 0) + (alt ? 2 : 0) + (ctrl ? 4 : 0)
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let parts: Vec<&str> = s.split(';').collect();
        if parts.len() >= 2 {
            if let Ok(n) = parts[1].parse::<u8>() {
                let n = n.saturating_sub(1);
                let mut mods = KeyModifiers::empty();
                if n & 1 != 0 {
                    mods |= KeyModifiers::SHIFT;
                }
                if n & 2 != 0 {
                    mods |= KeyModifiers::ALT;
                }
                if n & 4 != 0 {
                    mods |= KeyModifiers::CTRL;
                }
                return Ok(mods);
            }
        }
        Ok(KeyModifiers::empty())
    }

    /// Parse tilde key sequences (Insert, Delete, Page Up/Down, F5+).
    ///
    /// `seq` is the full sequence so unrecognized keys report their true
    /// length for skipping.
    fn parse_tilde_key(&self, params: &[u8], seq: &[u8]) -> ParseResult {
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let parts: Vec<&str> = s.split(';').collect();
        let num: u8 = parts.first().and_then(|p| p.parse().ok()).unwrap_or(0);

        let modifiers = if parts.len() >= 2 {
            self.parse_modifiers(params)?
        } else {
            KeyModifiers::empty()
        };

        let code = match num {
            1 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            7 => KeyCode::Home,
            8 => KeyCode::End,
            11 => KeyCode::F(1),
            12 => KeyCode::F(2),
            13 => KeyCode::F(3),
            14 => KeyCode::F(4),
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            201 => {
                // Stray paste end marker without a matching start
                return Err(ParseError::UnrecognizedSequence(seq.to_vec()));
            }
            _ => return Err(ParseError::UnrecognizedSequence(seq.to_vec())),
        };

        Ok((KeyEvent::new(code, modifiers).into(), seq.len()))
    }

    /// Parse SS3 sequences (ESC O ...).
    fn parse_ss3(&mut self, input: &[u8]) -> ParseResult {
        if input.len() < 3 {
            return Err(ParseError::Incomplete);
        }

        let code = match input[2] {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'M' => KeyCode::Enter,
            _ => return Err(ParseError::UnrecognizedSequence(input[..3].to_vec())),
        };

        Ok((KeyEvent::key(code).into(), 3))
    }

    /// Parse resize report (CSI 8 ; height ; width t).
    ///
    /// Only handles XTWINOPS format. Other `t` reports (e.g., CSI 4 for
    /// pixel size) are returned as unrecognized.
    fn parse_resize(&self, params: &[u8], seq: &[u8]) -> ParseResult {
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let parts: Vec<&str> = s.split(';').collect();

        if parts.len() >= 3 && parts[0] == "8" {
            // Parse height and width, returning error on invalid values
            // rather than falling back to arbitrary defaults
            let height: u16 = parts[1]
                .parse()
                .map_err(|_| ParseError::InvalidResizeFormat)?;
            let width: u16 = parts[2]
                .parse()
                .map_err(|_| ParseError::InvalidResizeFormat)?;
            Ok((Event::Resize(ResizeEvent::new(width, height)), seq.len()))
        } else {
            Err(ParseError::UnrecognizedSequence(seq.to_vec()))
        }
    }

    /// Parse bracketed paste content.
    ///
    /// The paste buffer is limited to [`MAX_PASTE_BUFFER_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::PasteBufferOverflow`] if the paste data would
    /// exceed the maximum buffer size. The parser state is reset when this
    /// occurs.
    fn parse_paste(&mut self, input: &[u8]) -> ParseResult {
        // Start and end sequences for bracketed paste
        const START_SEQ: &[u8] = b"\x1b[200~";
        const END_SEQ: &[u8] = b"\x1b[201~";

        // The caller retries with the same buffer after Incomplete, so the
        // start sequence is still at the front on every call
        let content_start = if input.starts_with(START_SEQ) {
            START_SEQ.len()
        } else {
            0
        };
        let effective_input = &input[content_start..];

        if let Some(pos) = find_subsequence(effective_input, END_SEQ) {
            if pos > MAX_PASTE_BUFFER_SIZE {
                self.in_paste = false;
                return Err(ParseError::PasteBufferOverflow);
            }

            self.in_paste = false;
            let content = String::from_utf8_lossy(&effective_input[..pos]).into_owned();

            Ok((
                Event::Paste(PasteEvent::new(content)),
                content_start + pos + END_SEQ.len(),
            ))
        } else {
            if effective_input.len() > MAX_PASTE_BUFFER_SIZE {
                self.in_paste = false;
                return Err(ParseError::PasteBufferOverflow);
            }

            Err(ParseError::Incomplete)
        }
    }

    /// Parse a UTF-8 character sequence.
    fn parse_utf8(&self, input: &[u8]) -> ParseResult {
        let first = input[0];

        // Determine expected byte length
        let expected_len = if first & 0b1110_0000 == 0b1100_0000 {
            2
        } else if first & 0b1111_0000 == 0b1110_0000 {
            3
        } else if first & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            return Err(ParseError::InvalidUtf8);
        };

        if input.len() < expected_len {
            return Err(ParseError::Incomplete);
        }

        let s = std::str::from_utf8(&input[..expected_len]).map_err(|_| ParseError::InvalidUtf8)?;
        let c = s.chars().next().ok_or(ParseError::InvalidUtf8)?;

        Ok((KeyEvent::char(c).into(), expected_len))
    }

    /// Reset parser state, abandoning any paste in progress.
    pub fn clear(&mut self) {
        self.in_paste = false;
    }
}

/// Find the first occurrence of `needle` in `haystack`.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
