//! Application state and the interactive session loop.
//!
//! `App` owns the three editors and recomputes the match segments from
//! their full current values on every frame. There is no cached result
//! and no incremental update; a keystroke marks the frame dirty and the
//! next render re-runs the whole pipeline.

use std::io::{self, Read, Write};

use crate::ansi::{
    ALT_SCREEN_OFF, ALT_SCREEN_ON, AnsiWriter, BELL, BRACKETED_PASTE_OFF, BRACKETED_PASTE_ON,
    CLEAR_SCREEN, CURSOR_HIDE, CURSOR_HOME, CURSOR_SHOW, ColorMode, TITLE_RESTORE, TITLE_SAVE,
    window_title,
};
use crate::edit::{Field, TextArea};
use crate::engine::RegexEngine;
use crate::error::{Error, Result};
use crate::event::{LogLevel, RECOMPUTE_EVENT, emit_event, emit_log};
use crate::flags::{FlagSet, accepts_flag_char};
use crate::input::{Event, InputParser, KeyCode, KeyEvent, KeyModifiers, ParseError};
use crate::segment::{Segment, SegmentError, SegmentStyle, segment};
use crate::terminal;
use crate::theme::Theme;
use crate::ui::{self, Layout};

/// Which editor receives keystrokes. The results pane is read-only and
/// never focusable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Pattern,
    Flags,
    Text,
}

impl Focus {
    /// Next pane in Tab order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Pattern => Self::Flags,
            Self::Flags => Self::Text,
            Self::Text => Self::Pattern,
        }
    }

    /// Previous pane in Tab order.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Pattern => Self::Text,
            Self::Flags => Self::Pattern,
            Self::Text => Self::Flags,
        }
    }
}

/// Loop control returned from event dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Outcome of routing a key to an editor.
enum EditOutcome {
    Handled,
    Rejected,
    Ignored,
}

/// The interactive pattern tester.
pub struct App {
    pattern: Field,
    flags: Field,
    text: TextArea,
    focus: Focus,
    theme: Theme,
    engine: RegexEngine,
    color_mode: ColorMode,
    size: (u16, u16),
    dirty: bool,
    bell: bool,
}

impl App {
    /// Create an app with empty editors and focus on the pattern field.
    #[must_use]
    pub fn new(theme: Theme, color_mode: ColorMode) -> Self {
        Self {
            pattern: Field::new(),
            flags: Field::with_filter(accepts_flag_char),
            text: TextArea::new(),
            focus: Focus::Pattern,
            theme,
            engine: RegexEngine,
            color_mode,
            size: (0, 0),
            dirty: true,
            bell: false,
        }
    }

    /// Current pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.text()
    }

    /// Current flag text.
    #[must_use]
    pub fn flags(&self) -> &str {
        self.flags.text()
    }

    /// Current test text.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.text()
    }

    /// Currently focused pane.
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Whether the next loop iteration will repaint.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record a new terminal size and mark the frame dirty.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.dirty = true;
    }

    /// Dispatch one event.
    pub fn handle_event(&mut self, event: &Event) -> Control {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(resize) => {
                self.resize(resize.width, resize.height);
                Control::Continue
            }
            Event::Paste(paste) => {
                self.handle_paste(paste.content());
                Control::Continue
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Control {
        if key.is_ctrl_c() || key.matches(KeyCode::Char('q'), KeyModifiers::CTRL) {
            emit_log(LogLevel::Debug, "quit requested");
            return Control::Quit;
        }

        match key.code {
            KeyCode::Tab if !key.shift() => {
                self.focus = self.focus.next();
                self.dirty = true;
                return Control::Continue;
            }
            KeyCode::BackTab | KeyCode::Tab => {
                self.focus = self.focus.prev();
                self.dirty = true;
                return Control::Continue;
            }
            _ => {}
        }

        let page = self.page_rows();
        let outcome = match self.focus {
            Focus::Pattern => field_key(&mut self.pattern, key),
            Focus::Flags => field_key(&mut self.flags, key),
            Focus::Text => text_key(&mut self.text, key, page),
        };
        match outcome {
            EditOutcome::Handled => self.dirty = true,
            EditOutcome::Rejected => {
                self.bell = true;
                self.dirty = true;
            }
            EditOutcome::Ignored => {}
        }
        Control::Continue
    }

    fn handle_paste(&mut self, content: &str) {
        match self.focus {
            Focus::Pattern => {
                self.pattern.insert_str(content);
            }
            Focus::Flags => {
                let accepted = self.flags.insert_str(content);
                if accepted < content.chars().count() {
                    self.bell = true;
                }
            }
            Focus::Text => self.text.insert_str(content),
        }
        self.dirty = true;
    }

    /// Rows one `PageUp`/`PageDown` moves: the text pane's content height.
    fn page_rows(&self) -> usize {
        Layout::compute(self.size.0, self.size.1)
            .map_or(1, |layout| usize::from(layout.text.inner().height).max(1))
    }

    /// Repaint the whole screen from current state.
    ///
    /// Recomputes the match segments from the full current value of all
    /// three inputs, then paints every pane and the status bar.
    ///
    /// # Errors
    ///
    /// Returns any error from flushing the underlying writer.
    pub fn render<W: Write>(&mut self, w: &mut AnsiWriter<W>) -> io::Result<()> {
        let (width, height) = self.size;
        let Some(layout) = Layout::compute(width, height) else {
            ui::paint_too_small(w, &self.theme, width, height);
            w.flush()?;
            self.dirty = false;
            return Ok(());
        };

        let flag_set = FlagSet::from_text(self.flags.text());
        let text = self.text.text();
        let outcome = segment(&self.engine, self.pattern.text(), flag_set, &text);

        let mut match_count = 0usize;
        let (segments, summary) = match outcome {
            Ok(segments) => {
                match_count = segments
                    .iter()
                    .filter(|s| {
                        matches!(s.style, SegmentStyle::Match | SegmentStyle::ZeroWidthMatch)
                    })
                    .count();
                let summary = match match_count {
                    0 => String::from("no matches"),
                    1 => String::from("1 match"),
                    n => format!("{n} matches"),
                };
                (segments, summary)
            }
            Err(SegmentError::EmptyPattern) => (
                vec![Segment::new(
                    crate::segment::EMPTY_PATTERN_PROMPT,
                    SegmentStyle::NoMatches,
                )],
                String::new(),
            ),
            Err(SegmentError::InvalidPattern(_)) => (
                vec![Segment::new(
                    crate::segment::INVALID_PATTERN_PROMPT,
                    SegmentStyle::NoMatches,
                )],
                String::from("invalid pattern"),
            ),
        };

        ui::paint_field(
            w,
            &self.theme,
            layout.pattern,
            " Pattern ",
            &mut self.pattern,
            self.focus == Focus::Pattern,
        );
        ui::paint_field(
            w,
            &self.theme,
            layout.flags,
            " Flags ",
            &mut self.flags,
            self.focus == Focus::Flags,
        );
        ui::paint_textarea(
            w,
            &self.theme,
            layout.text,
            " Text ",
            &mut self.text,
            self.focus == Focus::Text,
        );
        ui::paint_results(w, &self.theme, layout.results, " Matches ", &segments);

        let right = concat!("Tab panes  Ctrl+C quit  rexpad ", env!("CARGO_PKG_VERSION"));
        ui::paint_status(w, &self.theme, layout.status_row, width, &summary, right);

        if self.bell {
            w.write_str(BELL);
            self.bell = false;
        }
        w.flush()?;

        emit_event(
            RECOMPUTE_EVENT,
            &format!(
                "{{\"pattern_len\":{},\"flags\":\"{}\",\"text_len\":{},\"matches\":{}}}",
                self.pattern.text().len(),
                self.flags.text(),
                text.len(),
                match_count
            ),
        );
        self.dirty = false;
        Ok(())
    }

    /// Run the interactive session on the process terminal.
    ///
    /// Enters raw mode, switches to the alternate screen with bracketed
    /// paste and a hidden cursor, and loops until a quit key. Terminal
    /// state is restored on all exit paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotATty`] when stdin or stdout is not a terminal,
    /// and any termios or IO error from the session itself.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        if !terminal::is_tty(&stdin) || !terminal::is_tty(&stdout) {
            return Err(Error::NotATty);
        }

        let guard = terminal::enable_raw_mode()?;
        let (width, height) = terminal::terminal_size()?;
        self.resize(width, height);

        let mut writer = AnsiWriter::with_color_mode(stdout.lock(), self.color_mode);
        setup(&mut writer)?;
        emit_log(LogLevel::Debug, "session started");

        let result = self.run_loop(&mut writer, stdin.lock());

        let restored = teardown(&mut writer);
        drop(guard);
        emit_log(LogLevel::Debug, "session ended");
        result.and(restored.map_err(Error::from))
    }

    fn run_loop<W: Write, R: Read>(&mut self, writer: &mut AnsiWriter<W>, mut input: R) -> Result<()> {
        let mut parser = InputParser::new();
        let mut pending: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];

        loop {
            if self.dirty {
                self.render(writer)?;
            }

            // Raw mode uses VMIN=0, VTIME=1: read returns 0 after an
            // idle tick, which doubles as the resize poll interval
            let n = input.read(&mut buf)?;
            if n == 0 {
                if pending.as_slice() == [0x1b] {
                    // Lone ESC with no continuation within the tick
                    pending.clear();
                    if self.handle_event(&KeyEvent::key(KeyCode::Esc).into()) == Control::Quit {
                        return Ok(());
                    }
                }
                self.poll_size()?;
                continue;
            }
            pending.extend_from_slice(&buf[..n]);

            while !pending.is_empty() {
                match parser.parse(&pending) {
                    Ok((event, consumed)) => {
                        pending.drain(..consumed);
                        if self.handle_event(&event) == Control::Quit {
                            return Ok(());
                        }
                    }
                    Err(ParseError::Incomplete) => break,
                    Err(ParseError::UnrecognizedSequence(seq)) => {
                        pending.drain(..seq.len().max(1));
                    }
                    Err(ParseError::PasteBufferOverflow) => {
                        emit_log(LogLevel::Warn, "paste dropped: size limit exceeded");
                        pending.clear();
                    }
                    Err(_) => {
                        pending.drain(..1);
                    }
                }
            }
        }
    }

    fn poll_size(&mut self) -> Result<()> {
        let (width, height) = terminal::terminal_size()?;
        if (width, height) != self.size {
            self.resize(width, height);
        }
        Ok(())
    }
}

/// Route a key to a single-line field.
fn field_key(field: &mut Field, key: &KeyEvent) -> EditOutcome {
    if key.ctrl() || key.alt() {
        return EditOutcome::Ignored;
    }
    match key.code {
        KeyCode::Char(c) => {
            if field.insert_char(c) {
                EditOutcome::Handled
            } else {
                EditOutcome::Rejected
            }
        }
        KeyCode::Backspace => {
            field.backspace();
            EditOutcome::Handled
        }
        KeyCode::Delete => {
            field.delete_forward();
            EditOutcome::Handled
        }
        KeyCode::Left => {
            field.move_left();
            EditOutcome::Handled
        }
        KeyCode::Right => {
            field.move_right();
            EditOutcome::Handled
        }
        KeyCode::Home => {
            field.move_home();
            EditOutcome::Handled
        }
        KeyCode::End => {
            field.move_end();
            EditOutcome::Handled
        }
        _ => EditOutcome::Ignored,
    }
}

/// Route a key to the multi-line text area.
fn text_key(area: &mut TextArea, key: &KeyEvent, page: usize) -> EditOutcome {
    if key.ctrl() || key.alt() {
        return EditOutcome::Ignored;
    }
    match key.code {
        KeyCode::Char(c) => {
            area.insert_char(c);
            EditOutcome::Handled
        }
        KeyCode::Enter => {
            area.insert_newline();
            EditOutcome::Handled
        }
        KeyCode::Backspace => {
            area.backspace();
            EditOutcome::Handled
        }
        KeyCode::Delete => {
            area.delete_forward();
            EditOutcome::Handled
        }
        KeyCode::Left => {
            area.move_left();
            EditOutcome::Handled
        }
        KeyCode::Right => {
            area.move_right();
            EditOutcome::Handled
        }
        KeyCode::Up => {
            area.move_up();
            EditOutcome::Handled
        }
        KeyCode::Down => {
            area.move_down();
            EditOutcome::Handled
        }
        KeyCode::Home => {
            area.move_to_line_start();
            EditOutcome::Handled
        }
        KeyCode::End => {
            area.move_to_line_end();
            EditOutcome::Handled
        }
        KeyCode::PageUp => {
            area.page_up(page);
            EditOutcome::Handled
        }
        KeyCode::PageDown => {
            area.page_down(page);
            EditOutcome::Handled
        }
        _ => EditOutcome::Ignored,
    }
}

fn setup<W: Write>(w: &mut AnsiWriter<W>) -> io::Result<()> {
    w.write_str(ALT_SCREEN_ON);
    w.write_str(BRACKETED_PASTE_ON);
    w.write_str(CURSOR_HIDE);
    w.write_str(TITLE_SAVE);
    w.write_str(&window_title("rexpad"));
    w.write_str(CLEAR_SCREEN);
    w.write_str(CURSOR_HOME);
    w.flush()
}

fn teardown<W: Write>(w: &mut AnsiWriter<W>) -> io::Result<()> {
    w.reset();
    w.write_str(TITLE_RESTORE);
    w.write_str(BRACKETED_PASTE_OFF);
    w.write_str(CURSOR_SHOW);
    w.write_str(ALT_SCREEN_OFF);
    w.flush()
}
