//! Match segmentation: turning pattern + flags + text into styled runs.
//!
//! This is the core of rexpad. [`segment`] compiles the pattern and walks
//! the match offsets left to right, interleaving unmatched gaps with
//! matched runs; [`display_segments`] additionally folds the empty-pattern
//! and invalid-pattern outcomes into renderable prompt segments so the
//! results pane always has something to show.
//!
//! Everything here is pure: no terminal types, no caching, a fresh
//! computation per call.

use crate::engine::{CompileError, Engine, Matcher};
use crate::flags::FlagSet;
use std::fmt;

/// One match's half-open byte range `[start, end)` within the test text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    /// Create a span from byte offsets.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether this is a zero-width match (`start == end`).
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Matched length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }
}

/// Display style attached to one run of results output.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SegmentStyle {
    /// Text between matches, shown as-is.
    NonMatch,
    /// Text covered by a match.
    Match,
    /// Placeholder for a match of zero width.
    ZeroWidthMatch,
    /// Prompts and the no-matches status marker.
    NoMatches,
}

impl SegmentStyle {
    /// Number of styles, for fixed-size lookup tables.
    pub const COUNT: usize = 4;

    /// Stable index into a per-style table.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        match self {
            Self::NonMatch => 0,
            Self::Match => 1,
            Self::ZeroWidthMatch => 2,
            Self::NoMatches => 3,
        }
    }
}

/// A run of results text tagged with a display style.
///
/// For `NonMatch` and `Match` the text borrows from the test string; for
/// `ZeroWidthMatch` it is the placeholder glyph and for `NoMatches` one of
/// the status strings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub style: SegmentStyle,
}

impl<'a> Segment<'a> {
    /// Create a segment.
    #[must_use]
    pub const fn new(text: &'a str, style: SegmentStyle) -> Self {
        Self { text, style }
    }
}

/// Glyph standing in for a zero-width match so it stays visible.
pub const ZERO_WIDTH_PLACEHOLDER: &str = " ";

/// Prompt shown while the pattern field is blank.
pub const EMPTY_PATTERN_PROMPT: &str = "Please enter a regular expression to match against";

/// Prompt shown when the pattern does not compile.
pub const INVALID_PATTERN_PROMPT: &str = "Invalid regex";

/// Status marker appended when a valid pattern matches nothing.
pub const NO_MATCHES_MARKER: &str = "No matches";

/// Why segmentation produced no match walk.
///
/// Both cases are session outcomes, not failures: the caller renders them
/// as prompts (see [`display_segments`]) and the program carries on.
#[derive(Debug)]
pub enum SegmentError {
    /// The pattern field is blank. Distinct from a compilation failure.
    EmptyPattern,
    /// The pattern does not compile under the current flags.
    InvalidPattern(CompileError),
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "no pattern supplied"),
            Self::InvalidPattern(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SegmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyPattern => None,
            Self::InvalidPattern(e) => Some(e),
        }
    }
}

/// Compile `pattern` under `flags` and segment `text` with it.
///
/// # Errors
///
/// [`SegmentError::EmptyPattern`] for a blank pattern,
/// [`SegmentError::InvalidPattern`] when compilation fails. Both are
/// recoverable outcomes rendered by [`display_segments`].
pub fn segment<'a, E: Engine>(
    engine: &E,
    pattern: &str,
    flags: FlagSet,
    text: &'a str,
) -> Result<Vec<Segment<'a>>, SegmentError> {
    if pattern.is_empty() {
        return Err(SegmentError::EmptyPattern);
    }
    let matcher = engine
        .compile(pattern, flags)
        .map_err(SegmentError::InvalidPattern)?;
    Ok(segment_with(&matcher, text))
}

/// Segment `text` with an already-compiled matcher.
///
/// Zero matches yield the whole text as one `NonMatch` run followed by the
/// `NoMatches` marker. Otherwise gaps and matches interleave, with empty
/// gaps omitted and zero-width matches represented by the placeholder.
/// Concatenating every non-placeholder, non-marker run reproduces `text`.
pub fn segment_with<'a, M: Matcher>(matcher: &M, text: &'a str) -> Vec<Segment<'a>> {
    let spans = matcher.find_spans(text);

    if spans.is_empty() {
        let mut out = Vec::with_capacity(2);
        if !text.is_empty() {
            out.push(Segment::new(text, SegmentStyle::NonMatch));
        }
        out.push(Segment::new(NO_MATCHES_MARKER, SegmentStyle::NoMatches));
        return out;
    }

    let mut out = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            out.push(Segment::new(&text[cursor..span.start], SegmentStyle::NonMatch));
        }
        if span.is_empty() {
            out.push(Segment::new(ZERO_WIDTH_PLACEHOLDER, SegmentStyle::ZeroWidthMatch));
        } else {
            out.push(Segment::new(&text[span.start..span.end], SegmentStyle::Match));
        }
        cursor = span.end;
    }
    if cursor < text.len() {
        out.push(Segment::new(&text[cursor..], SegmentStyle::NonMatch));
    }
    out
}

/// Segment for display: outcome errors become prompt segments.
///
/// This is the function the interactive session calls on every edit. The
/// engine's diagnostic for an invalid pattern is deliberately not shown;
/// callers wanting it use [`segment`] directly.
#[must_use]
pub fn display_segments<'a, E: Engine>(
    engine: &E,
    pattern: &str,
    flags: FlagSet,
    text: &'a str,
) -> Vec<Segment<'a>> {
    match segment(engine, pattern, flags, text) {
        Ok(segments) => segments,
        Err(SegmentError::EmptyPattern) => {
            vec![Segment::new(EMPTY_PATTERN_PROMPT, SegmentStyle::NoMatches)]
        }
        Err(SegmentError::InvalidPattern(_)) => {
            vec![Segment::new(INVALID_PATTERN_PROMPT, SegmentStyle::NoMatches)]
        }
    }
}

/// Reassemble the test text from a segment sequence.
///
/// Placeholder and status runs contribute nothing. Used by tests and
/// available to callers as the inverse of [`segment_with`].
#[must_use]
pub fn reconstruct(segments: &[Segment<'_>]) -> String {
    segments
        .iter()
        .filter(|s| matches!(s.style, SegmentStyle::NonMatch | SegmentStyle::Match))
        .map(|s| s.text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RegexEngine;

    /// Matcher returning a fixed span list regardless of input.
    struct Scripted(Vec<MatchSpan>);

    impl Matcher for Scripted {
        fn find_spans(&self, _text: &str) -> Vec<MatchSpan> {
            self.0.clone()
        }
    }

    fn run<'a>(pattern: &str, flags: FlagSet, text: &'a str) -> Vec<Segment<'a>> {
        display_segments(&RegexEngine, pattern, flags, text)
    }

    #[test]
    fn test_interleaves_matches_and_gaps() {
        let got = run("a", FlagSet::empty(), "banana");
        assert_eq!(
            got,
            vec![
                Segment::new("b", SegmentStyle::NonMatch),
                Segment::new("a", SegmentStyle::Match),
                Segment::new("n", SegmentStyle::NonMatch),
                Segment::new("a", SegmentStyle::Match),
                Segment::new("n", SegmentStyle::NonMatch),
                Segment::new("a", SegmentStyle::Match),
            ]
        );
    }

    #[test]
    fn test_segment_walk_snapshot() {
        let got = run("an", FlagSet::empty(), "banana");
        insta::assert_debug_snapshot!(got, @r#"
        [
            Segment {
                text: "b",
                style: NonMatch,
            },
            Segment {
                text: "an",
                style: Match,
            },
            Segment {
                text: "an",
                style: Match,
            },
            Segment {
                text: "a",
                style: NonMatch,
            },
        ]
        "#);
    }

    #[test]
    fn test_empty_pattern_prompts() {
        let got = run("", FlagSet::empty(), "anything at all");
        assert_eq!(
            got,
            vec![Segment::new(EMPTY_PATTERN_PROMPT, SegmentStyle::NoMatches)]
        );

        let err = segment(&RegexEngine, "", FlagSet::empty(), "x")
            .expect_err("empty pattern is an outcome");
        assert!(matches!(err, SegmentError::EmptyPattern));
    }

    #[test]
    fn test_invalid_pattern_prompts() {
        let got = run("(", FlagSet::empty(), "abc");
        assert_eq!(
            got,
            vec![Segment::new(INVALID_PATTERN_PROMPT, SegmentStyle::NoMatches)]
        );

        // The diagnostic stays available on the error value
        let err = segment(&RegexEngine, "(", FlagSet::empty(), "abc")
            .expect_err("unbalanced group is an outcome");
        match err {
            SegmentError::InvalidPattern(e) => assert!(!e.message().is_empty()),
            SegmentError::EmptyPattern => panic!("wrong outcome"),
        }
    }

    #[test]
    fn test_no_matches_keeps_text() {
        let got = run("z", FlagSet::empty(), "abc");
        assert_eq!(
            got,
            vec![
                Segment::new("abc", SegmentStyle::NonMatch),
                Segment::new(NO_MATCHES_MARKER, SegmentStyle::NoMatches),
            ]
        );
    }

    #[test]
    fn test_no_matches_on_empty_text() {
        let got = run("z", FlagSet::empty(), "");
        assert_eq!(
            got,
            vec![Segment::new(NO_MATCHES_MARKER, SegmentStyle::NoMatches)]
        );
    }

    #[test]
    fn test_zero_width_matches_interleave() {
        let got = run("x*", FlagSet::empty(), "ab");
        assert_eq!(
            got,
            vec![
                Segment::new(ZERO_WIDTH_PLACEHOLDER, SegmentStyle::ZeroWidthMatch),
                Segment::new("a", SegmentStyle::NonMatch),
                Segment::new(ZERO_WIDTH_PLACEHOLDER, SegmentStyle::ZeroWidthMatch),
                Segment::new("b", SegmentStyle::NonMatch),
                Segment::new(ZERO_WIDTH_PLACEHOLDER, SegmentStyle::ZeroWidthMatch),
            ]
        );
    }

    #[test]
    fn test_adjacent_matches_have_no_gap() {
        let got = run("a", FlagSet::empty(), "aa");
        assert_eq!(
            got,
            vec![
                Segment::new("a", SegmentStyle::Match),
                Segment::new("a", SegmentStyle::Match),
            ]
        );
    }

    #[test]
    fn test_match_at_ends() {
        let got = run("ab", FlagSet::empty(), "abxab");
        assert_eq!(
            got,
            vec![
                Segment::new("ab", SegmentStyle::Match),
                Segment::new("x", SegmentStyle::NonMatch),
                Segment::new("ab", SegmentStyle::Match),
            ]
        );
    }

    #[test]
    fn test_whole_text_match() {
        let got = run(".*", FlagSet::empty(), "abc");
        assert_eq!(got[0], Segment::new("abc", SegmentStyle::Match));
    }

    #[test]
    fn test_multibyte_slicing() {
        let got = run("ü", FlagSet::empty(), "grün");
        assert_eq!(
            got,
            vec![
                Segment::new("gr", SegmentStyle::NonMatch),
                Segment::new("ü", SegmentStyle::Match),
                Segment::new("n", SegmentStyle::NonMatch),
            ]
        );
    }

    #[test]
    fn test_scripted_matcher_alternation() {
        // Spans touching both ends and each other
        let text = "abcdef";
        let spans = vec![MatchSpan::new(0, 2), MatchSpan::new(2, 4), MatchSpan::new(5, 6)];
        let got = segment_with(&Scripted(spans), text);
        assert_eq!(
            got,
            vec![
                Segment::new("ab", SegmentStyle::Match),
                Segment::new("cd", SegmentStyle::Match),
                Segment::new("e", SegmentStyle::NonMatch),
                Segment::new("f", SegmentStyle::Match),
            ]
        );
    }

    #[test]
    fn test_reconstruct() {
        let text = "one two one";
        let got = run("one", FlagSet::empty(), text);
        assert_eq!(reconstruct(&got), text);

        let zw = run("x*", FlagSet::empty(), "ab");
        assert_eq!(reconstruct(&zw), "ab");

        let none = run("zzz", FlagSet::empty(), "ab");
        assert_eq!(reconstruct(&none), "ab");
    }

    #[test]
    fn test_flags_reach_the_engine() {
        let got = run("a", FlagSet::IGNORE_CASE, "BANANA");
        assert_eq!(
            got.iter().filter(|s| s.style == SegmentStyle::Match).count(),
            3
        );
    }
}
