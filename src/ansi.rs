//! ANSI escape sequence generation.
//!
//! Sequence constants, SGR emitters for the supported color depths, and a
//! buffered writer that tracks terminal state to minimize escape output.

use crate::color::Rgb;
use crate::style::{Style, TextAttributes};
use crate::terminal::ColorSupport;
use std::io::{self, Write};

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Clear from cursor to end of line.
pub const CLEAR_LINE_RIGHT: &str = "\x1b[K";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Enable alternative screen buffer.
pub const ALT_SCREEN_ON: &str = "\x1b[?1049h";

/// Disable alternative screen buffer.
pub const ALT_SCREEN_OFF: &str = "\x1b[?1049l";

/// Enable bracketed paste mode.
pub const BRACKETED_PASTE_ON: &str = "\x1b[?2004h";

/// Disable bracketed paste mode.
pub const BRACKETED_PASTE_OFF: &str = "\x1b[?2004l";

/// Audible bell.
pub const BELL: &str = "\x07";

/// Save the window title on the terminal's title stack (XTWINOPS 22).
pub const TITLE_SAVE: &str = "\x1b[22;0t";

/// Restore the window title from the title stack (XTWINOPS 23).
pub const TITLE_RESTORE: &str = "\x1b[23;0t";

/// Set window title prefix.
pub const TITLE_PREFIX: &str = "\x1b]0;";

/// Set window title suffix.
pub const TITLE_SUFFIX: &str = "\x1b\\";

/// Generate a window title sequence (OSC 0).
#[must_use]
pub fn window_title(title: &str) -> String {
    format!("{TITLE_PREFIX}{title}{TITLE_SUFFIX}")
}

/// Color output mode for ANSI sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// True color (24-bit RGB).
    #[default]
    TrueColor,
    /// 256-color palette.
    Color256,
    /// 16-color (basic ANSI).
    Color16,
    /// No color output.
    NoColor,
}

impl From<ColorSupport> for ColorMode {
    fn from(support: ColorSupport) -> Self {
        match support {
            ColorSupport::TrueColor => Self::TrueColor,
            ColorSupport::Extended => Self::Color256,
            ColorSupport::Basic => Self::Color16,
            ColorSupport::None => Self::NoColor,
        }
    }
}

/// Write a u8 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u16 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u16_decimal(w: &mut impl Write, n: u16) -> io::Result<()> {
    // Fast paths for common small values (most cursor positions)
    if n < 10 {
        return w.write_all(&[b'0' + n as u8]);
    }
    if n < 100 {
        return w.write_all(&[b'0' + (n / 10) as u8, b'0' + (n % 10) as u8]);
    }

    // General case: build digits in reverse on stack
    let mut buf = [0u8; 5]; // max u16 is 65535 (5 digits)
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

/// Write SGR sequence for foreground color to a writer.
///
/// Uses direct byte writes to avoid `write!` formatting overhead on hot paths.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_fg_color(w: &mut impl Write, color: Rgb, mode: ColorMode) -> io::Result<()> {
    match mode {
        ColorMode::TrueColor => {
            let (r, g, b) = color.to_rgb_u8();
            w.write_all(b"\x1b[38;2;")?;
            write_u8_decimal(w, r)?;
            w.write_all(b";")?;
            write_u8_decimal(w, g)?;
            w.write_all(b";")?;
            write_u8_decimal(w, b)?;
            w.write_all(b"m")
        }
        ColorMode::Color256 => {
            let idx = color.to_256_color();
            w.write_all(b"\x1b[38;5;")?;
            write_u8_decimal(w, idx)?;
            w.write_all(b"m")
        }
        ColorMode::Color16 => {
            let idx = color.to_16_color();
            // ANSI 16 colors: 30-37 for normal, 90-97 for bright
            let code = if idx < 8 { 30 + idx } else { 90 + idx - 8 };
            w.write_all(b"\x1b[")?;
            write_u8_decimal(w, code)?;
            w.write_all(b"m")
        }
        ColorMode::NoColor => Ok(()),
    }
}

/// Write SGR sequence for background color to a writer.
///
/// Uses direct byte writes to avoid `write!` formatting overhead on hot paths.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_bg_color(w: &mut impl Write, color: Rgb, mode: ColorMode) -> io::Result<()> {
    match mode {
        ColorMode::TrueColor => {
            let (r, g, b) = color.to_rgb_u8();
            w.write_all(b"\x1b[48;2;")?;
            write_u8_decimal(w, r)?;
            w.write_all(b";")?;
            write_u8_decimal(w, g)?;
            w.write_all(b";")?;
            write_u8_decimal(w, b)?;
            w.write_all(b"m")
        }
        ColorMode::Color256 => {
            let idx = color.to_256_color();
            w.write_all(b"\x1b[48;5;")?;
            write_u8_decimal(w, idx)?;
            w.write_all(b"m")
        }
        ColorMode::Color16 => {
            let idx = color.to_16_color();
            // ANSI 16 colors: 40-47 for normal, 100-107 for bright
            let code = if idx < 8 { 40 + idx } else { 100 + idx - 8 };
            w.write_all(b"\x1b[")?;
            write_u8_decimal(w, code)?;
            w.write_all(b"m")
        }
        ColorMode::NoColor => Ok(()),
    }
}

/// Write SGR sequence for text attributes to a writer.
///
/// Uses a stack-allocated array to avoid heap allocation on every call.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_attributes(w: &mut impl Write, attrs: TextAttributes) -> io::Result<()> {
    // Stack-allocated array - max 8 attribute codes possible
    let mut codes: [&str; 8] = [""; 8];
    let mut count = 0;

    if attrs.contains(TextAttributes::BOLD) {
        codes[count] = "1";
        count += 1;
    }
    if attrs.contains(TextAttributes::DIM) {
        codes[count] = "2";
        count += 1;
    }
    if attrs.contains(TextAttributes::ITALIC) {
        codes[count] = "3";
        count += 1;
    }
    if attrs.contains(TextAttributes::UNDERLINE) {
        codes[count] = "4";
        count += 1;
    }
    if attrs.contains(TextAttributes::BLINK) {
        codes[count] = "5";
        count += 1;
    }
    if attrs.contains(TextAttributes::INVERSE) {
        codes[count] = "7";
        count += 1;
    }
    if attrs.contains(TextAttributes::HIDDEN) {
        codes[count] = "8";
        count += 1;
    }
    if attrs.contains(TextAttributes::STRIKETHROUGH) {
        codes[count] = "9";
        count += 1;
    }

    if count == 0 {
        Ok(())
    } else {
        w.write_all(b"\x1b[")?;
        for (i, code) in codes[..count].iter().enumerate() {
            if i > 0 {
                w.write_all(b";")?;
            }
            w.write_all(code.as_bytes())?;
        }
        w.write_all(b"m")
    }
}

/// Write cursor position sequence (0-indexed input, 1-indexed output).
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_cursor_position(w: &mut impl Write, row: u16, col: u16) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u16_decimal(w, row + 1)?;
    w.write_all(b";")?;
    write_u16_decimal(w, col + 1)?;
    w.write_all(b"H")
}

/// Buffered writer that tracks ANSI state to minimize escape sequences.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,

    // Color output mode
    color_mode: ColorMode,

    // Current state for delta encoding
    current_fg: Option<Rgb>,
    current_bg: Option<Rgb>,
    current_attrs: TextAttributes,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a new ANSI writer wrapping the given output.
    pub fn new(writer: W) -> Self {
        Self::with_color_mode(writer, ColorMode::TrueColor)
    }

    /// Create a new ANSI writer with specified color mode.
    pub fn with_color_mode(writer: W, color_mode: ColorMode) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            color_mode,
            current_fg: None,
            current_bg: None,
            current_attrs: TextAttributes::empty(),
        }
    }

    /// Get the current color output mode.
    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Write a raw string to the buffer.
    ///
    /// Bypasses state tracking; callers writing SGR sequences directly
    /// should follow up with [`Self::reset`].
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to a 0-indexed position.
    pub fn move_cursor(&mut self, row: u16, col: u16) {
        let _ = write_cursor_position(&mut self.buffer, row, col);
    }

    /// Set foreground color if different from current.
    pub fn set_fg(&mut self, color: Rgb) {
        if self.current_fg != Some(color) {
            let _ = write_fg_color(&mut self.buffer, color, self.color_mode);
            self.current_fg = Some(color);
        }
    }

    /// Set background color if different from current.
    pub fn set_bg(&mut self, color: Rgb) {
        if self.current_bg != Some(color) {
            let _ = write_bg_color(&mut self.buffer, color, self.color_mode);
            self.current_bg = Some(color);
        }
    }

    /// Set text attributes, only writing changes.
    pub fn set_attributes(&mut self, attrs: TextAttributes) {
        if self.current_attrs == attrs {
            return;
        }

        // Check what needs to be turned off
        let removed = self.current_attrs - attrs;
        if !removed.is_empty() {
            let mut codes: [&str; 7] = [""; 7];
            let mut count = 0;
            if removed.contains(TextAttributes::BOLD) || removed.contains(TextAttributes::DIM) {
                codes[count] = "22";
                count += 1;
            }
            if removed.contains(TextAttributes::ITALIC) {
                codes[count] = "23";
                count += 1;
            }
            if removed.contains(TextAttributes::UNDERLINE) {
                codes[count] = "24";
                count += 1;
            }
            if removed.contains(TextAttributes::BLINK) {
                codes[count] = "25";
                count += 1;
            }
            if removed.contains(TextAttributes::INVERSE) {
                codes[count] = "27";
                count += 1;
            }
            if removed.contains(TextAttributes::HIDDEN) {
                codes[count] = "28";
                count += 1;
            }
            if removed.contains(TextAttributes::STRIKETHROUGH) {
                codes[count] = "29";
                count += 1;
            }

            if count > 0 {
                self.buffer.extend_from_slice(b"\x1b[");
                for (i, code) in codes[..count].iter().enumerate() {
                    if i > 0 {
                        self.buffer.push(b';');
                    }
                    self.buffer.extend_from_slice(code.as_bytes());
                }
                self.buffer.push(b'm');
            }

            self.current_attrs -= removed;
        }

        // Apply new attributes
        let to_add = attrs - self.current_attrs;
        if !to_add.is_empty() {
            let _ = write_attributes(&mut self.buffer, to_add);
        }

        self.current_attrs = attrs;
    }

    /// Apply a style, resolving unset colors against the given defaults.
    pub fn apply_style(&mut self, style: Style, default_fg: Rgb, default_bg: Rgb) {
        self.set_attributes(style.attributes);
        self.set_fg(style.fg.unwrap_or(default_fg));
        self.set_bg(style.bg.unwrap_or(default_bg));
    }

    /// Reset all ANSI attributes and forget tracked state.
    pub fn reset(&mut self) {
        self.write_str(RESET);
        self.current_fg = None;
        self.current_bg = None;
        self.current_attrs = TextAttributes::empty();
    }

    /// Flush the buffer to the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Get a reference to the buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer without flushing.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }
}
