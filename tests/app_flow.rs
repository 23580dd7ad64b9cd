//! Scripted editing sessions driven through the raw byte pipeline.
//!
//! Feeds terminal byte streams through the input parser into the
//! application state machine, the way the session loop does, and checks
//! the resulting state and rendered frames. The terminal itself is the
//! only thing simulated; parser, events, editors, and renderer are all
//! the real pipeline.

use rexpad::input::ParseError;
use rexpad::{AnsiWriter, App, ColorMode, Control, InputParser, Theme};

/// A headless session: the app plus the parser-and-buffer drain protocol
/// the interactive loop runs on every read.
struct Session {
    app: App,
    parser: InputParser,
    pending: Vec<u8>,
}

impl Session {
    fn new() -> Self {
        let mut app = App::new(Theme::dark(), ColorMode::NoColor);
        app.resize(80, 24);
        Self {
            app,
            parser: InputParser::new(),
            pending: Vec::new(),
        }
    }

    /// Feed one "read" worth of bytes and drain every complete event.
    fn feed(&mut self, bytes: &[u8]) -> Control {
        self.pending.extend_from_slice(bytes);
        while !self.pending.is_empty() {
            match self.parser.parse(self.pending.as_slice()) {
                Ok((event, consumed)) => {
                    self.pending.drain(..consumed);
                    if self.app.handle_event(&event) == Control::Quit {
                        return Control::Quit;
                    }
                }
                Err(ParseError::Incomplete) => break,
                Err(ParseError::UnrecognizedSequence(seq)) => {
                    let skip = seq.len().max(1).min(self.pending.len());
                    self.pending.drain(..skip);
                }
                Err(ParseError::PasteBufferOverflow) => self.pending.clear(),
                Err(_) => {
                    self.pending.drain(..1);
                }
            }
        }
        Control::Continue
    }

    fn screen(&mut self) -> String {
        let mut w = AnsiWriter::with_color_mode(Vec::new(), ColorMode::NoColor);
        self.app.render(&mut w).expect("render succeeds");
        String::from_utf8_lossy(&w.into_inner()).into_owned()
    }
}

// ===== Keyboard Flow =====

#[test]
fn test_keystrokes_reach_focused_editor() {
    let mut s = Session::new();
    s.feed(b"an");
    assert_eq!(s.app.pattern(), "an");

    s.feed(b"\t");
    s.feed(b"i");
    assert_eq!(s.app.flags(), "i");

    s.feed(b"\t");
    s.feed(b"banana");
    assert_eq!(s.app.text(), "banana");
    assert_eq!(s.app.pattern(), "an");
}

#[test]
fn test_full_session_renders_match_summary() {
    let mut s = Session::new();
    let screen = s.screen();
    assert!(screen.contains("Please enter a regular expression to match against"));

    s.feed(b"an\t\tbanana");
    let screen = s.screen();
    assert!(screen.contains("2 matches"));
    assert!(screen.contains("banana"));
}

#[test]
fn test_arrow_keys_move_cursor() {
    let mut s = Session::new();
    s.feed(b"\t\tbana");
    s.feed(b"\x1b[D\x1b[D");
    s.feed(b"X");
    assert_eq!(s.app.text(), "baXna");
}

#[test]
fn test_home_key_moves_to_line_start() {
    let mut s = Session::new();
    s.feed(b"abc");
    s.feed(b"\x1b[H");
    s.feed(b"X");
    assert_eq!(s.app.pattern(), "Xabc");
}

#[test]
fn test_enter_inserts_newline_only_in_text() {
    let mut s = Session::new();
    s.feed(b"ab\rcd");
    assert_eq!(s.app.pattern(), "abcd");

    s.feed(b"\t\t");
    s.feed(b"ab\rcd");
    assert_eq!(s.app.text(), "ab\ncd");
}

#[test]
fn test_alt_key_does_not_edit() {
    let mut s = Session::new();
    s.feed(b"\x1bx");
    assert_eq!(s.app.pattern(), "");
}

// ===== Paste Flow =====

#[test]
fn test_paste_in_single_read() {
    let mut s = Session::new();
    s.feed(b"\t\t");
    s.feed(b"\x1b[200~hello[world]\x1b[201~");
    assert_eq!(s.app.text(), "hello[world]");
    assert_eq!(s.app.pattern(), "");
}

#[test]
fn test_paste_split_across_reads() {
    // Content arriving over several reads must come through exactly once
    let mut s = Session::new();
    s.feed(b"\t\t");
    s.feed(b"\x1b[200~line one\nline t");
    s.feed(b"wo");
    s.feed(b"\x1b[201~");
    assert_eq!(s.app.text(), "line one\nline two");
}

#[test]
fn test_paste_into_flags_is_filtered() {
    let mut s = Session::new();
    s.feed(b"\t");
    s.feed(b"\x1b[200~izm\x1b[201~");
    assert_eq!(s.app.flags(), "im");
}

#[test]
fn test_keystroke_after_paste_still_parses() {
    let mut s = Session::new();
    s.feed(b"\x1b[200~ab\x1b[201~c");
    assert_eq!(s.app.pattern(), "abc");
}

// ===== Resize and Control =====

#[test]
fn test_resize_report_flows_to_layout() {
    let mut s = Session::new();
    s.feed(b"\x1b[8;6;15t");
    let screen = s.screen();
    assert!(screen.contains("Terminal too small"));

    s.feed(b"\x1b[8;24;80t");
    let screen = s.screen();
    assert!(!screen.contains("Terminal too small"));
    assert!(screen.contains("Pattern"));
}

#[test]
fn test_ctrl_c_quits() {
    let mut s = Session::new();
    assert_eq!(s.feed(b"\x03"), Control::Quit);
}

#[test]
fn test_ctrl_q_quits() {
    let mut s = Session::new();
    assert_eq!(s.feed(b"\x11"), Control::Quit);
}

#[test]
fn test_mouse_bytes_are_skipped_whole() {
    let mut s = Session::new();
    s.feed(b"\x1b[<0;5;5Mabc");
    assert_eq!(s.app.pattern(), "abc");
}

#[test]
fn test_unknown_function_key_is_skipped_whole() {
    let mut s = Session::new();
    s.feed(b"\x1b[25~x");
    assert_eq!(s.app.pattern(), "x");
}
