//! Editable input state for the three panes.
//!
//! [`Field`] is a single-line input with a byte-offset cursor that moves
//! by grapheme cluster. [`TextArea`] is a multi-line buffer backed by a
//! rope with a char-offset cursor in a row/col model.
//!
//! Neither type renders anything; the UI layer reads their state each
//! frame.

use crate::unicode::{display_width, next_boundary, prev_boundary, truncate_to_width};
use ropey::Rope;

/// Per-character input filter for a [`Field`].
///
/// Receives the current text and the candidate character; returning
/// `false` rejects the insertion. Only character insertion is filtered,
/// so navigation and deletion always work regardless of the filter.
pub type CharFilter = fn(current: &str, c: char) -> bool;

/// Single-line text input.
#[derive(Clone, Debug, Default)]
pub struct Field {
    text: String,
    /// Byte offset of the cursor, always on a grapheme boundary.
    cursor: usize,
    /// Byte offset of the leftmost visible grapheme.
    scroll: usize,
    filter: Option<CharFilter>,
}

impl Field {
    /// Create an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty field with an input filter.
    #[must_use]
    pub fn with_filter(filter: CharFilter) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    /// Get the field content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check whether the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the cursor byte offset.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the content, moving the cursor to the end.
    ///
    /// The filter is not applied; this is for programmatic initialization.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
        self.scroll = 0;
    }

    /// Insert a character at the cursor.
    ///
    /// Returns `false` if the character was rejected: control characters
    /// and newlines never enter a single-line field, and the filter (if
    /// any) can reject further.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        if let Some(filter) = self.filter {
            if !filter(&self.text, c) {
                return false;
            }
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Insert a string at the cursor, filtering each character.
    ///
    /// Returns the number of characters accepted. Rejected characters are
    /// skipped rather than aborting the whole insertion, so pasting text
    /// with stray newlines still inserts the printable remainder.
    pub fn insert_str(&mut self, s: &str) -> usize {
        let mut accepted = 0;
        for c in s.chars() {
            if self.insert_char(c) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Delete the grapheme before the cursor.
    ///
    /// Returns `true` if anything was removed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = prev_boundary(&self.text, self.cursor);
        self.text.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    /// Delete the grapheme after the cursor.
    ///
    /// Returns `true` if anything was removed.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let end = next_boundary(&self.text, self.cursor);
        self.text.drain(self.cursor..end);
        true
    }

    /// Move the cursor one grapheme left.
    pub fn move_left(&mut self) {
        self.cursor = prev_boundary(&self.text, self.cursor);
    }

    /// Move the cursor one grapheme right.
    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = next_boundary(&self.text, self.cursor);
        }
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Adjust horizontal scroll so the cursor is within `width` columns.
    pub fn scroll_to_cursor(&mut self, width: usize) {
        if width == 0 {
            self.scroll = self.cursor;
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
            return;
        }
        // Leave one column free so the cursor cell itself is visible
        while display_width(&self.text[self.scroll..self.cursor]) >= width {
            self.scroll = next_boundary(&self.text, self.scroll);
        }
    }

    /// Get the visible slice and the cursor's display column within it.
    ///
    /// Call [`Self::scroll_to_cursor`] first so the cursor is in view.
    #[must_use]
    pub fn view(&self, width: usize) -> (&str, usize) {
        let (visible, _) = truncate_to_width(&self.text[self.scroll..], width);
        let cursor_col = display_width(&self.text[self.scroll..self.cursor]);
        (visible, cursor_col)
    }
}

/// Cursor position in a [`TextArea`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Character offset in the buffer.
    pub offset: usize,
    /// Line number (0-indexed).
    pub row: usize,
    /// Column number (0-indexed, in chars).
    pub col: usize,
}

/// Multi-line text buffer with cursor and vertical scrolling.
#[derive(Clone, Debug, Default)]
pub struct TextArea {
    rope: Rope,
    cursor: Cursor,
    /// First visible row.
    scroll_row: usize,
}

impl TextArea {
    /// Create an empty text area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text area with initial content, cursor at the start.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
            scroll_row: 0,
        }
    }

    /// Get the full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Check whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of lines in the buffer.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get a line's text without its trailing newline.
    #[must_use]
    pub fn line(&self, row: usize) -> Option<String> {
        let line = self.rope.get_line(row)?;
        let mut s = line.to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    /// Get the current cursor position.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// First visible row after the last scroll adjustment.
    #[must_use]
    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    /// Insert a character at the cursor.
    ///
    /// Control characters other than tab are ignored; newlines go through
    /// [`Self::insert_newline`].
    pub fn insert_char(&mut self, c: char) {
        if c.is_control() && c != '\t' {
            return;
        }
        self.rope.insert_char(self.cursor.offset, c);
        self.cursor.offset += 1;
        self.update_cursor_position();
    }

    /// Insert a line break at the cursor.
    pub fn insert_newline(&mut self) {
        self.rope.insert_char(self.cursor.offset, '\n');
        self.cursor.offset += 1;
        self.update_cursor_position();
    }

    /// Insert a string at the cursor.
    ///
    /// Line endings are normalized to `\n`; control characters other than
    /// newline and tab are dropped.
    pub fn insert_str(&mut self, text: &str) {
        let mut cleaned = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    cleaned.push('\n');
                }
                '\n' | '\t' => cleaned.push(c),
                c if c.is_control() => {}
                c => cleaned.push(c),
            }
        }
        if cleaned.is_empty() {
            return;
        }
        self.rope.insert(self.cursor.offset, &cleaned);
        self.cursor.offset += cleaned.chars().count();
        self.update_cursor_position();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor.offset == 0 {
            return;
        }
        let start = self.cursor.offset - 1;
        self.rope.remove(start..self.cursor.offset);
        self.cursor.offset = start;
        self.update_cursor_position();
    }

    /// Delete the character after the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor.offset >= self.rope.len_chars() {
            return;
        }
        self.rope.remove(self.cursor.offset..self.cursor.offset + 1);
        self.update_cursor_position();
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        if self.cursor.offset > 0 {
            self.cursor.offset -= 1;
            self.update_cursor_position();
        }
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor.offset < self.rope.len_chars() {
            self.cursor.offset += 1;
            self.update_cursor_position();
        }
    }

    /// Move cursor up one line, clamping the column to the target line.
    pub fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.update_cursor_from_row_col();
        }
    }

    /// Move cursor down one line, clamping the column to the target line.
    pub fn move_down(&mut self) {
        if self.cursor.row + 1 < self.rope.len_lines() {
            self.cursor.row += 1;
            self.update_cursor_from_row_col();
        }
    }

    /// Move cursor to start of the current line.
    pub fn move_to_line_start(&mut self) {
        self.cursor.col = 0;
        self.update_cursor_from_row_col();
    }

    /// Move cursor to end of the current line.
    pub fn move_to_line_end(&mut self) {
        self.cursor.col = self.line_len(self.cursor.row);
        self.update_cursor_from_row_col();
    }

    /// Move cursor up by a page.
    pub fn page_up(&mut self, rows: usize) {
        self.cursor.row = self.cursor.row.saturating_sub(rows.max(1));
        self.update_cursor_from_row_col();
    }

    /// Move cursor down by a page.
    pub fn page_down(&mut self, rows: usize) {
        let last = self.rope.len_lines().saturating_sub(1);
        self.cursor.row = (self.cursor.row + rows.max(1)).min(last);
        self.update_cursor_from_row_col();
    }

    /// Adjust vertical scroll so the cursor is within `height` rows.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        if height == 0 {
            self.scroll_row = self.cursor.row;
            return;
        }
        if self.cursor.row < self.scroll_row {
            self.scroll_row = self.cursor.row;
        } else if self.cursor.row >= self.scroll_row + height {
            self.scroll_row = self.cursor.row + 1 - height;
        }
    }

    /// Character length of a line excluding its trailing newline.
    fn line_len(&self, row: usize) -> usize {
        self.rope.get_line(row).map_or(0, |line| {
            let line_chars = line.len_chars();
            let has_newline = line_chars > 0 && line.char(line_chars - 1) == '\n';
            if has_newline {
                line_chars - 1
            } else {
                line_chars
            }
        })
    }

    fn update_cursor_position(&mut self) {
        self.cursor.offset = self.cursor.offset.min(self.rope.len_chars());
        self.cursor.row = self.rope.char_to_line(self.cursor.offset);
        let line_start = self.rope.line_to_char(self.cursor.row);
        self.cursor.col = self.cursor.offset.saturating_sub(line_start);
    }

    fn update_cursor_from_row_col(&mut self) {
        let line_start = self.rope.line_to_char(self.cursor.row);
        self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
        self.cursor.offset = line_start + self.cursor.col;
    }
}
