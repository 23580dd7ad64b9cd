//! Terminal state management.
//!
//! Raw mode handling via termios, size queries via ioctl, and color
//! support detection from the environment. Raw mode disables line
//! buffering and echo so input can be read byte by byte.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios functions.
//! These are necessary for low-level terminal control and cannot be avoided.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use crate::error::{Error, Result};
use std::env;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Saved terminal state for restoration.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl RawModeGuard {
    /// Enter raw mode on the given file descriptor.
    ///
    /// Returns a guard that will restore the terminal state when dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor does not refer to a terminal or
    /// the termios calls fail.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut raw = original;

        // Input modes: no break, no CR to NL, no parity check, no strip char,
        // no start/stop output control.
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);

        // Output modes: disable post processing
        raw.c_oflag &= !libc::OPOST;

        // Control modes: set 8 bit chars
        raw.c_cflag |= libc::CS8;

        // Local modes: echo off, canonical off, no extended functions,
        // no signal chars (^C, ^Z, etc)
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

        // Control characters: set minimal input to return, no timeout
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 1; // 100ms timeout for reads

        set_termios(fd, &raw)?;

        Ok(Self { fd, original })
    }

    /// Restore the original terminal state.
    fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.original)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Enter raw mode for stdin.
///
/// Returns a guard that restores the terminal when dropped.
///
/// # Errors
///
/// Returns an error if stdin is not a terminal or the termios calls fail.
pub fn enable_raw_mode() -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin())
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Get the terminal size as (columns, rows).
///
/// # Errors
///
/// Returns an error if the terminal size cannot be determined or if the
/// reported dimensions are zero (which would break layout arithmetic).
pub fn terminal_size() -> Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(Error::Io(io::Error::last_os_error()))
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(Error::InvalidDimensions {
            width: size.ws_col,
            height: size.ws_row,
        })
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Get termios attributes.
fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

/// Set termios attributes.
fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

/// Color support level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColorSupport {
    /// No color support.
    #[default]
    None,
    /// 16 colors (basic ANSI).
    Basic,
    /// 256 colors.
    Extended,
    /// True color (16 million colors).
    TrueColor,
}

impl ColorSupport {
    /// Detect color support from the environment.
    ///
    /// `NO_COLOR` (set and non-empty) disables color entirely; otherwise
    /// `COLORTERM` and `TERM` are consulted.
    #[must_use]
    pub fn detect() -> Self {
        let no_color = env::var("NO_COLOR").is_ok_and(|v| !v.is_empty());
        let term = env::var("TERM").unwrap_or_default();
        let colorterm = env::var("COLORTERM").unwrap_or_default();
        Self::classify(no_color, &term, &colorterm)
    }

    fn classify(no_color: bool, term: &str, colorterm: &str) -> Self {
        if no_color {
            return Self::None;
        }

        // Check for explicit true color support
        if colorterm.eq_ignore_ascii_case("truecolor") || colorterm.eq_ignore_ascii_case("24bit") {
            return Self::TrueColor;
        }

        // Check term for true color indicators
        if term.contains("256color") || term.contains("24bit") || term.contains("truecolor") {
            return Self::TrueColor;
        }

        // Known true color terminals
        let truecolor_terms = ["alacritty", "kitty", "wezterm", "ghostty"];
        if truecolor_terms.iter().any(|t| term.contains(t)) {
            return Self::TrueColor;
        }

        // 256 color
        if term.contains("256") {
            return Self::Extended;
        }

        // Basic color
        if term.starts_with("xterm") || term.starts_with("screen") || term.starts_with("vt100") {
            return Self::Basic;
        }

        // Assume basic color if TERM is set
        if !term.is_empty() {
            return Self::Basic;
        }

        Self::None
    }

    /// Check if true color is supported.
    #[must_use]
    pub fn has_true_color(&self) -> bool {
        *self >= Self::TrueColor
    }

    /// Check if 256 colors are supported.
    #[must_use]
    pub fn has_256_colors(&self) -> bool {
        *self >= Self::Extended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::unix::io::FromRawFd;

    // ============================================
    // TTY Detection Tests
    // ============================================

    #[test]
    fn test_is_tty_standard_streams() {
        // In CI, stdio might not be TTYs, but the calls must not panic
        let _ = is_tty(&io::stdin());
        let _ = is_tty(&io::stdout());
        let _ = is_tty(&io::stderr());
    }

    #[test]
    fn test_is_tty_pipe_returns_false() {
        let (read_fd, write_fd) = create_pipe().expect("Failed to create pipe");

        assert!(!is_tty(&read_fd), "Read end of pipe should not be TTY");
        assert!(!is_tty(&write_fd), "Write end of pipe should not be TTY");

        drop(read_fd);
        drop(write_fd);
    }

    #[test]
    fn test_is_tty_file_returns_false() {
        let file = tempfile::tempfile().expect("Failed to create temp file");
        assert!(!is_tty(&file), "Regular file should not be TTY");
    }

    #[test]
    fn test_is_tty_with_invalid_fd() {
        struct InvalidFd;
        impl AsRawFd for InvalidFd {
            fn as_raw_fd(&self) -> RawFd {
                -1
            }
        }

        assert!(!is_tty(&InvalidFd), "Invalid fd should not be TTY");
    }

    // ============================================
    // Terminal Size Tests
    // ============================================

    #[test]
    fn test_terminal_size_does_not_panic() {
        // This might fail in CI without a TTY, but should not panic
        let _ = terminal_size();
    }

    #[test]
    fn test_terminal_size_valid_dimensions() {
        // If terminal_size succeeds, dimensions should be reasonable
        if let Ok((cols, rows)) = terminal_size() {
            assert!(cols > 0, "Columns should be positive");
            assert!(rows > 0, "Rows should be positive");
            assert!(cols < 10000, "Columns should be reasonable");
            assert!(rows < 10000, "Rows should be reasonable");
        }
    }

    // ============================================
    // Termios Flag Tests
    // ============================================

    #[test]
    fn test_termios_input_flags_disabled() {
        let input_flags_to_disable =
            libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON;

        assert_ne!(input_flags_to_disable & libc::BRKINT, 0);
        assert_ne!(input_flags_to_disable & libc::ICRNL, 0);
        assert_ne!(input_flags_to_disable & libc::INPCK, 0);
        assert_ne!(input_flags_to_disable & libc::ISTRIP, 0);
        assert_ne!(input_flags_to_disable & libc::IXON, 0);
    }

    #[test]
    fn test_termios_local_flags_disabled() {
        let local_flags_to_disable = libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG;

        assert_ne!(local_flags_to_disable & libc::ECHO, 0);
        assert_ne!(local_flags_to_disable & libc::ICANON, 0);
        assert_ne!(local_flags_to_disable & libc::IEXTEN, 0);
        assert_ne!(local_flags_to_disable & libc::ISIG, 0);
    }

    #[test]
    fn test_termios_control_chars() {
        // VMIN and VTIME indices should be valid
        assert!(libc::VMIN < libc::NCCS);
        assert!(libc::VTIME < libc::NCCS);
    }

    // ============================================
    // RawModeGuard Tests
    // ============================================

    #[test]
    fn test_raw_mode_guard_new_on_pipe_fails() {
        let (read_fd, _write_fd) = create_pipe().expect("Failed to create pipe");
        let result = RawModeGuard::new(&read_fd);

        assert!(result.is_err(), "RawModeGuard should fail on pipe");
    }

    #[test]
    fn test_get_termios_on_pipe_fails() {
        let (read_fd, _write_fd) = create_pipe().expect("Failed to create pipe");
        let result = get_termios(read_fd.as_raw_fd());

        assert!(result.is_err(), "get_termios should fail on pipe");
    }

    #[test]
    fn test_set_termios_with_invalid_fd_fails() {
        let termios: libc::termios = unsafe { std::mem::zeroed() };
        let result = set_termios(-1, &termios);
        assert!(result.is_err(), "set_termios should fail on invalid fd");
    }

    // ============================================
    // Color Detection Tests
    // ============================================

    #[test]
    fn test_classify_no_color_wins() {
        let support = ColorSupport::classify(true, "xterm-256color", "truecolor");
        assert_eq!(support, ColorSupport::None);
    }

    #[test]
    fn test_classify_colorterm_truecolor() {
        assert_eq!(
            ColorSupport::classify(false, "xterm", "truecolor"),
            ColorSupport::TrueColor
        );
        assert_eq!(
            ColorSupport::classify(false, "xterm", "24bit"),
            ColorSupport::TrueColor
        );
    }

    #[test]
    fn test_classify_term_variants() {
        assert_eq!(
            ColorSupport::classify(false, "xterm-256color", ""),
            ColorSupport::TrueColor
        );
        assert_eq!(
            ColorSupport::classify(false, "alacritty", ""),
            ColorSupport::TrueColor
        );
        assert_eq!(
            ColorSupport::classify(false, "rxvt-256", ""),
            ColorSupport::Extended
        );
        assert_eq!(
            ColorSupport::classify(false, "xterm", ""),
            ColorSupport::Basic
        );
        assert_eq!(
            ColorSupport::classify(false, "vt100", ""),
            ColorSupport::Basic
        );
        assert_eq!(
            ColorSupport::classify(false, "dumb", ""),
            ColorSupport::Basic
        );
        assert_eq!(ColorSupport::classify(false, "", ""), ColorSupport::None);
    }

    #[test]
    fn test_color_support_ordering() {
        assert!(ColorSupport::TrueColor > ColorSupport::Extended);
        assert!(ColorSupport::Extended > ColorSupport::Basic);
        assert!(ColorSupport::Basic > ColorSupport::None);
    }

    #[test]
    fn test_color_support_queries() {
        assert!(ColorSupport::TrueColor.has_true_color());
        assert!(ColorSupport::TrueColor.has_256_colors());
        assert!(!ColorSupport::Extended.has_true_color());
        assert!(ColorSupport::Extended.has_256_colors());
        assert!(!ColorSupport::Basic.has_256_colors());
    }

    // ============================================
    // Helper Functions
    // ============================================

    /// Create a pipe and return both ends as Files for RAII cleanup
    fn create_pipe() -> io::Result<(File, File)> {
        let mut fds = [0i32; 2];
        let result = unsafe { libc::pipe(fds.as_mut_ptr()) };
        if result == -1 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: pipe() succeeded, so fds are valid
        let read_file = unsafe { File::from_raw_fd(fds[0]) };
        let write_file = unsafe { File::from_raw_fd(fds[1]) };
        Ok((read_file, write_file))
    }
}
