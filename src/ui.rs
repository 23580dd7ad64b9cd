//! Screen layout and painting.
//!
//! Splits the terminal into four bordered panes (pattern, flags, text,
//! results) plus a one-row status bar, and paints each from current
//! application state. Painters do full-row overwrites, so no separate
//! clear pass is needed between frames.

use crate::ansi::{AnsiWriter, CLEAR_SCREEN, CURSOR_HOME};
use crate::edit::{Field, TextArea};
use crate::segment::Segment;
use crate::style::Style;
use crate::theme::Theme;
use crate::unicode::{display_width, grapheme_indices, graphemes, truncate_to_width};
use std::io::Write;

/// Minimum terminal width for the full layout.
pub const MIN_WIDTH: u16 = 20;

/// Minimum terminal height for the full layout.
pub const MIN_HEIGHT: u16 = 10;

/// Width of the flags pane, including its border.
const FLAGS_PANE_WIDTH: u16 = 11;

/// Box drawing characters (rounded corner set).
const TOP_LEFT: char = '╭';
const TOP_RIGHT: char = '╮';
const BOTTOM_LEFT: char = '╰';
const BOTTOM_RIGHT: char = '╯';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// Minimum free border columns around an embedded pane label.
const MIN_LABEL_SPACE: usize = 4;

/// A rectangular screen region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The content region inside a one-cell border.
    #[must_use]
    pub const fn inner(&self) -> Self {
        Self {
            x: self.x + 1,
            y: self.y + 1,
            width: self.width.saturating_sub(2),
            height: self.height.saturating_sub(2),
        }
    }
}

/// Pane placement for one terminal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub pattern: Rect,
    pub flags: Rect,
    pub text: Rect,
    pub results: Rect,
    pub status_row: u16,
}

impl Layout {
    /// Compute the layout for a terminal size.
    ///
    /// Returns `None` when the terminal is smaller than
    /// [`MIN_WIDTH`] x [`MIN_HEIGHT`]; the caller should fall back to
    /// [`paint_too_small`].
    #[must_use]
    pub fn compute(width: u16, height: u16) -> Option<Self> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return None;
        }

        let flags_width = FLAGS_PANE_WIDTH.min(width / 2);
        let pattern = Rect::new(0, 0, width - flags_width, 3);
        let flags = Rect::new(width - flags_width, 0, flags_width, 3);

        // Rows between the input row and the status bar, split between
        // the text pane and the results pane
        let body = height - 4;
        let text_height = body / 2;
        let text = Rect::new(0, 3, width, text_height);
        let results = Rect::new(0, 3 + text_height, width, body - text_height);

        Some(Self {
            pattern,
            flags,
            text,
            results,
            status_row: height - 1,
        })
    }
}

/// Skip `cols` display columns from the start of a string, grapheme-safe.
///
/// A wide grapheme straddling the boundary is skipped entirely.
fn skip_columns(s: &str, cols: usize) -> &str {
    if cols == 0 {
        return s;
    }
    let mut width = 0;
    for (idx, grapheme) in grapheme_indices(s) {
        if width >= cols {
            return &s[idx..];
        }
        width += display_width(grapheme);
    }
    ""
}

/// Draw a pane border with an embedded label.
fn draw_box<W: Write>(w: &mut AnsiWriter<W>, theme: &Theme, rect: Rect, label: &str, focused: bool) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }

    let border = Style::fg(theme.border(focused));
    w.apply_style(border, theme.foreground(), theme.background());

    let width = usize::from(rect.width);
    let fill = width - 2;

    // Top border with the label overlaid starting at column 2
    let mut top = String::with_capacity(width * 3);
    top.push(TOP_LEFT);
    let label_width = display_width(label);
    if label_width > 0 && width >= label_width + MIN_LABEL_SPACE {
        top.push(HORIZONTAL);
        top.push_str(label);
        for _ in 0..fill - 1 - label_width {
            top.push(HORIZONTAL);
        }
    } else {
        for _ in 0..fill {
            top.push(HORIZONTAL);
        }
    }
    top.push(TOP_RIGHT);
    w.move_cursor(rect.y, rect.x);
    w.write_str(&top);

    // Side borders
    for row in 1..rect.height - 1 {
        w.move_cursor(rect.y + row, rect.x);
        let mut s = String::new();
        s.push(VERTICAL);
        w.write_str(&s);
        w.move_cursor(rect.y + row, rect.x + rect.width - 1);
        w.write_str(&s);
    }

    // Bottom border
    let mut bottom = String::with_capacity(width * 3);
    bottom.push(BOTTOM_LEFT);
    for _ in 0..fill {
        bottom.push(HORIZONTAL);
    }
    bottom.push(BOTTOM_RIGHT);
    w.move_cursor(rect.y + rect.height - 1, rect.x);
    w.write_str(&bottom);
}

/// Write text padded with spaces to exactly `width` columns.
fn write_padded<W: Write>(w: &mut AnsiWriter<W>, text: &str, width: usize) {
    w.write_str(text);
    let used = display_width(text);
    for _ in used..width {
        w.write_str(" ");
    }
}

/// Paint the cursor cell: the grapheme at `rest`'s start, or a space.
fn paint_cursor_cell<W: Write>(
    w: &mut AnsiWriter<W>,
    theme: &Theme,
    row: u16,
    col: u16,
    rest: &str,
) {
    let grapheme = graphemes(rest).next().filter(|g| *g != "\n").unwrap_or(" ");
    let cursor = Style::fg(theme.background()).with_bg(theme.cursor());
    w.move_cursor(row, col);
    w.apply_style(cursor, theme.foreground(), theme.background());
    w.write_str(grapheme);
}

/// Paint a single-line input pane.
pub fn paint_field<W: Write>(
    w: &mut AnsiWriter<W>,
    theme: &Theme,
    rect: Rect,
    label: &str,
    field: &mut Field,
    focused: bool,
) {
    draw_box(w, theme, rect, label, focused);

    let inner = rect.inner();
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let width = usize::from(inner.width);

    field.scroll_to_cursor(width);
    let (visible, cursor_col) = field.view(width);

    w.move_cursor(inner.y, inner.x);
    w.apply_style(
        Style::fg(theme.foreground()),
        theme.foreground(),
        theme.background(),
    );
    write_padded(w, visible, width);

    if focused && cursor_col < width {
        let rest = &field.text()[field.cursor()..];
        paint_cursor_cell(
            w,
            theme,
            inner.y,
            inner.x + u16::try_from(cursor_col).unwrap_or(u16::MAX),
            rest,
        );
    }
}

/// Paint the multi-line text pane.
pub fn paint_textarea<W: Write>(
    w: &mut AnsiWriter<W>,
    theme: &Theme,
    rect: Rect,
    label: &str,
    area: &mut TextArea,
    focused: bool,
) {
    draw_box(w, theme, rect, label, focused);

    let inner = rect.inner();
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let width = usize::from(inner.width);
    let height = usize::from(inner.height);

    area.scroll_to_cursor(height);
    let cursor = area.cursor();
    let cursor_line = area.line(cursor.row).unwrap_or_default();
    let prefix: String = cursor_line.chars().take(cursor.col).collect();
    let cursor_vis_col = display_width(&prefix);

    // Shift all rows horizontally when the cursor runs past the pane
    let shift = if focused && cursor_vis_col >= width {
        cursor_vis_col + 1 - width
    } else {
        0
    };

    let text_style = Style::fg(theme.foreground());
    for vis_row in 0..height {
        let row = area.scroll_row() + vis_row;
        let line = area.line(row);
        w.move_cursor(inner.y + u16::try_from(vis_row).unwrap_or(u16::MAX), inner.x);
        w.apply_style(text_style, theme.foreground(), theme.background());
        match line {
            Some(line) => {
                let (visible, _) = truncate_to_width(skip_columns(&line, shift), width);
                write_padded(w, visible, width);
            }
            None => write_padded(w, "", width),
        }
    }

    if focused {
        let cursor_row = cursor.row - area.scroll_row();
        let col = cursor_vis_col - shift;
        if cursor_row < height && col < width {
            let byte = cursor_line
                .char_indices()
                .nth(cursor.col)
                .map_or(cursor_line.len(), |(idx, _)| idx);
            paint_cursor_cell(
                w,
                theme,
                inner.y + u16::try_from(cursor_row).unwrap_or(u16::MAX),
                inner.x + u16::try_from(col).unwrap_or(u16::MAX),
                &cursor_line[byte..],
            );
        }
    }
}

/// Paint the results pane from styled segments.
///
/// Segments flow left to right with wrapping at the pane edge; newlines in
/// segment text start a new row. Content past the last row is dropped.
pub fn paint_results<W: Write>(
    w: &mut AnsiWriter<W>,
    theme: &Theme,
    rect: Rect,
    label: &str,
    segments: &[Segment<'_>],
) {
    draw_box(w, theme, rect, label, false);

    let inner = rect.inner();
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let width = usize::from(inner.width);
    let height = usize::from(inner.height);

    // Clear the content region first; segment runs then overwrite it
    let blank = Style::fg(theme.foreground());
    for row in 0..inner.height {
        w.move_cursor(inner.y + row, inner.x);
        w.apply_style(blank, theme.foreground(), theme.background());
        write_padded(w, "", width);
    }

    let mut row = 0usize;
    let mut col = 0usize;
    w.move_cursor(inner.y, inner.x);

    for segment in segments {
        let style = theme.style_for(segment.style);
        w.apply_style(style, theme.foreground(), theme.background());

        for grapheme in graphemes(segment.text) {
            if row >= height {
                return;
            }
            if grapheme == "\n" {
                row += 1;
                col = 0;
                if row < height {
                    w.move_cursor(
                        inner.y + u16::try_from(row).unwrap_or(u16::MAX),
                        inner.x,
                    );
                }
                continue;
            }
            let gw = display_width(grapheme);
            if col + gw > width {
                row += 1;
                col = 0;
                if row >= height {
                    return;
                }
                w.move_cursor(
                    inner.y + u16::try_from(row).unwrap_or(u16::MAX),
                    inner.x,
                );
            }
            w.write_str(grapheme);
            col += gw;
        }
    }
}

/// Paint the status bar: left-aligned summary, right-aligned hints.
pub fn paint_status<W: Write>(
    w: &mut AnsiWriter<W>,
    theme: &Theme,
    row: u16,
    width: u16,
    left: &str,
    right: &str,
) {
    let width = usize::from(width);
    w.move_cursor(row, 0);
    w.apply_style(theme.status(), theme.foreground(), theme.background());

    let (left_text, left_width) = truncate_to_width(left, width);
    let remaining = width - left_width;
    let (right_text, right_width) = truncate_to_width(right, remaining);

    w.write_str(left_text);
    for _ in 0..remaining - right_width {
        w.write_str(" ");
    }
    w.write_str(right_text);
}

/// Paint the fallback message for undersized terminals.
pub fn paint_too_small<W: Write>(w: &mut AnsiWriter<W>, theme: &Theme, width: u16, height: u16) {
    w.write_str(CLEAR_SCREEN);
    w.write_str(CURSOR_HOME);
    w.apply_style(
        Style::fg(theme.foreground()),
        theme.foreground(),
        theme.background(),
    );
    let message = format!("Terminal too small (need {MIN_WIDTH}x{MIN_HEIGHT})");
    let row = height / 2;
    w.move_cursor(row, 0);
    let (visible, _) = truncate_to_width(&message, usize::from(width));
    w.write_str(visible);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::ColorMode;
    use crate::segment::SegmentStyle;

    fn render_to_string(paint: impl FnOnce(&mut AnsiWriter<Vec<u8>>)) -> String {
        let mut w = AnsiWriter::with_color_mode(Vec::new(), ColorMode::NoColor);
        paint(&mut w);
        String::from_utf8_lossy(w.buffer()).into_owned()
    }

    // ============================================
    // Layout Tests
    // ============================================

    #[test]
    fn test_layout_tiles_the_terminal() {
        let layout = Layout::compute(80, 24).expect("80x24 fits");

        assert_eq!(layout.pattern.x, 0);
        assert_eq!(layout.pattern.y, 0);
        assert_eq!(layout.flags.x + layout.flags.width, 80);
        assert_eq!(
            layout.pattern.width + layout.flags.width,
            80,
            "input row spans the terminal"
        );

        assert_eq!(layout.text.y, 3);
        assert_eq!(layout.results.y, layout.text.y + layout.text.height);
        assert_eq!(
            layout.results.y + layout.results.height,
            23,
            "results end above the status row"
        );
        assert_eq!(layout.status_row, 23);
    }

    #[test]
    fn test_layout_minimum_size() {
        assert!(Layout::compute(MIN_WIDTH, MIN_HEIGHT).is_some());
        assert!(Layout::compute(MIN_WIDTH - 1, MIN_HEIGHT).is_none());
        assert!(Layout::compute(MIN_WIDTH, MIN_HEIGHT - 1).is_none());
        assert!(Layout::compute(0, 0).is_none());
    }

    #[test]
    fn test_layout_panes_never_degenerate() {
        for width in MIN_WIDTH..120 {
            for height in MIN_HEIGHT..50 {
                let layout = Layout::compute(width, height).expect("size fits");
                assert!(layout.text.height >= 3, "{width}x{height}");
                assert!(layout.results.height >= 3, "{width}x{height}");
                assert!(layout.pattern.width >= 2, "{width}x{height}");
                assert!(layout.flags.width >= 2, "{width}x{height}");
            }
        }
    }

    #[test]
    fn test_rect_inner() {
        let rect = Rect::new(2, 3, 10, 5);
        let inner = rect.inner();
        assert_eq!(inner, Rect::new(3, 4, 8, 3));

        let tiny = Rect::new(0, 0, 1, 1);
        assert_eq!(tiny.inner().width, 0);
    }

    // ============================================
    // Painting Tests
    // ============================================

    #[test]
    fn test_draw_box_contains_label_and_corners() {
        let theme = Theme::dark();
        let output = render_to_string(|w| {
            draw_box(w, &theme, Rect::new(0, 0, 20, 3), " Pattern ", false);
        });

        assert!(output.contains('╭'));
        assert!(output.contains('╮'));
        assert!(output.contains('╰'));
        assert!(output.contains('╯'));
        assert!(output.contains(" Pattern "));
    }

    #[test]
    fn test_draw_box_omits_label_when_too_narrow() {
        let theme = Theme::dark();
        let output = render_to_string(|w| {
            draw_box(w, &theme, Rect::new(0, 0, 6, 3), " Pattern ", false);
        });

        assert!(!output.contains("Pattern"));
        assert!(output.contains('╭'));
    }

    #[test]
    fn test_paint_field_shows_text() {
        let theme = Theme::dark();
        let mut field = Field::new();
        field.set_text("ban.na");

        let output = render_to_string(|w| {
            paint_field(w, &theme, Rect::new(0, 0, 20, 3), " Pattern ", &mut field, false);
        });

        assert!(output.contains("ban.na"));
    }

    #[test]
    fn test_paint_textarea_shows_visible_lines() {
        let theme = Theme::dark();
        let mut area = TextArea::with_text("first\nsecond\nthird");

        let output = render_to_string(|w| {
            paint_textarea(w, &theme, Rect::new(0, 0, 20, 4), " Text ", &mut area, false);
        });

        // Two content rows: first two lines visible, third scrolled out
        assert!(output.contains("first"));
        assert!(output.contains("second"));
        assert!(!output.contains("third"));
    }

    #[test]
    fn test_paint_results_writes_segment_text() {
        let theme = Theme::dark();
        let segments = vec![
            Segment::new("ab ", SegmentStyle::NonMatch),
            Segment::new("cd", SegmentStyle::Match),
        ];

        let output = render_to_string(|w| {
            paint_results(w, &theme, Rect::new(0, 0, 20, 4), " Matches ", &segments);
        });

        assert!(output.contains("ab "));
        assert!(output.contains("cd"));
    }

    #[test]
    fn test_paint_results_respects_newlines() {
        let theme = Theme::dark();
        let segments = vec![Segment::new("a\nb", SegmentStyle::NonMatch)];

        let output = render_to_string(|w| {
            paint_results(w, &theme, Rect::new(0, 0, 10, 4), " Matches ", &segments);
        });

        // Both halves painted despite the newline inside the segment
        assert!(output.contains('a'));
        assert!(output.contains('b'));
    }

    #[test]
    fn test_paint_status_left_and_right() {
        let theme = Theme::dark();
        let output = render_to_string(|w| {
            paint_status(w, &theme, 23, 40, "3 matches", "Tab next pane");
        });

        assert!(output.contains("3 matches"));
        assert!(output.contains("Tab next pane"));
    }

    #[test]
    fn test_paint_too_small_message() {
        let theme = Theme::dark();
        let output = render_to_string(|w| {
            paint_too_small(w, &theme, 15, 5);
        });

        assert!(output.contains("Terminal too small"));
    }

    // ============================================
    // Helper Tests
    // ============================================

    #[test]
    fn test_skip_columns() {
        assert_eq!(skip_columns("abcdef", 0), "abcdef");
        assert_eq!(skip_columns("abcdef", 2), "cdef");
        assert_eq!(skip_columns("abcdef", 6), "");
        assert_eq!(skip_columns("abcdef", 10), "");

        // Wide char straddling the skip point is dropped whole
        assert_eq!(skip_columns("a漢b", 2), "b");
    }
}
