//! Display width and grapheme helpers for the editors and renderer.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
#[must_use]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Display width of a character in terminal columns.
///
/// Includes a fast path for ASCII printable characters (0x20-0x7E), which
/// are always width 1 and are the most common case.
#[inline]
#[must_use]
pub fn display_width_char(c: char) -> usize {
    // Fast path: ASCII printable characters are always width 1
    if c.is_ascii() && (' '..='~').contains(&c) {
        return 1;
    }
    // Control characters have width 0
    if c < ' ' {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Iterate over grapheme clusters in a string.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Iterate over grapheme clusters with byte indices.
pub fn grapheme_indices(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.grapheme_indices(true)
}

/// Byte offset of the grapheme boundary before `offset`.
///
/// Returns 0 when `offset` is at or before the first boundary. `offset`
/// must lie on a char boundary of `s`.
#[must_use]
pub fn prev_boundary(s: &str, offset: usize) -> usize {
    let mut prev = 0;
    for (idx, _) in s.grapheme_indices(true) {
        if idx >= offset {
            break;
        }
        prev = idx;
    }
    prev
}

/// Byte offset of the grapheme boundary after `offset`.
///
/// Returns `s.len()` when `offset` is at or past the last boundary.
#[must_use]
pub fn next_boundary(s: &str, offset: usize) -> usize {
    for (idx, g) in s.grapheme_indices(true) {
        if idx >= offset {
            return idx + g.len();
        }
    }
    s.len()
}

/// Truncate a string to at most `max_width` columns, on a grapheme
/// boundary. Returns the truncated slice and its width.
#[must_use]
pub fn truncate_to_width(s: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    let mut end = 0;
    for (idx, g) in s.grapheme_indices(true) {
        let w = display_width(g);
        if width + w > max_width {
            return (&s[..idx], width);
        }
        width += w;
        end = idx + g.len();
    }
    (&s[..end], width)
}
