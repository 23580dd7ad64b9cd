//! Property-based tests for the segmentation invariants.
//!
//! Uses proptest to verify the walk invariants across arbitrary text and a
//! range of generated patterns.

use proptest::prelude::*;
use rexpad::{
    FlagSet, MatchSpan, Matcher, RegexEngine, Segment, SegmentStyle, reconstruct, segment,
    segment_with,
};

// ============================================================================
// Strategies
// ============================================================================

/// Arbitrary printable text including newlines.
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,\\n]{0,80}"
}

/// Patterns guaranteed to compile: literal fragments of a small alphabet.
fn literal_pattern() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

/// Flag text drawn from the recognized alphabet.
fn flag_text() -> impl Strategy<Value = String> {
    "[ixm]{0,3}"
}

/// A scripted matcher driven by a span list, for invariants that must hold
/// for any well-formed matcher output.
struct FixedSpans(Vec<MatchSpan>);

impl Matcher for FixedSpans {
    fn find_spans(&self, _text: &str) -> Vec<MatchSpan> {
        self.0.clone()
    }
}

/// A sorted list of disjoint non-empty spans within `len` bytes of ASCII.
fn disjoint_spans(len: usize) -> impl Strategy<Value = Vec<MatchSpan>> {
    prop::collection::vec((0..=len, 1..=4usize), 0..6).prop_map(move |raw| {
        let mut spans = Vec::new();
        let mut cursor = 0;
        for (start, width) in raw {
            let start = start.max(cursor);
            let end = (start + width).min(len);
            if start >= end {
                continue;
            }
            spans.push(MatchSpan::new(start, end));
            cursor = end;
        }
        spans
    })
}

// ============================================================================
// Reconstruction Properties
// ============================================================================

proptest! {
    /// Concatenating NonMatch and Match slices reproduces the text exactly.
    #[test]
    fn reconstruction_is_exact(pattern in literal_pattern(), text in text_strategy()) {
        let segments = segment(&RegexEngine, &pattern, FlagSet::empty(), &text)
            .expect("literal patterns always compile");
        prop_assert_eq!(reconstruct(&segments), text);
    }

    /// Reconstruction holds under every flag combination.
    #[test]
    fn reconstruction_holds_under_flags(
        pattern in literal_pattern(),
        flags in flag_text(),
        text in text_strategy(),
    ) {
        let segments = segment(&RegexEngine, &pattern, FlagSet::from_text(&flags), &text)
            .expect("literal patterns always compile");
        prop_assert_eq!(reconstruct(&segments), text);
    }

    /// Reconstruction holds for arbitrary well-formed span lists, not just
    /// ones the regex engine happens to produce.
    #[test]
    fn reconstruction_holds_for_any_matcher(spans_seed in disjoint_spans(40)) {
        let text = "q".repeat(40);
        let matcher = FixedSpans(spans_seed);
        let segments = segment_with(&matcher, &text);
        prop_assert_eq!(reconstruct(&segments), text);
    }
}

// ============================================================================
// Shape Properties
// ============================================================================

proptest! {
    /// Zero matches produce exactly one NonMatch over the whole text plus
    /// the marker (the NonMatch is omitted for empty text).
    #[test]
    fn no_match_shape(text in text_strategy()) {
        // A pattern that can never match the generated alphabet
        let segments = segment(&RegexEngine, "ZZZTOP!", FlagSet::empty(), &text)
            .expect("literal pattern compiles");

        let last = segments.last().expect("marker always present");
        prop_assert_eq!(last.style, SegmentStyle::NoMatches);
        if text.is_empty() {
            prop_assert_eq!(segments.len(), 1);
        } else {
            prop_assert_eq!(segments.len(), 2);
            prop_assert_eq!(segments[0].text, text.as_str());
            prop_assert_eq!(segments[0].style, SegmentStyle::NonMatch);
        }
    }

    /// A gap segment appears iff the gap between neighboring matches (or a
    /// text boundary) is non-empty: no empty NonMatch runs, and no two
    /// adjacent NonMatch runs.
    #[test]
    fn gaps_are_nonempty_and_separated(
        pattern in literal_pattern(),
        text in text_strategy(),
    ) {
        let segments = segment(&RegexEngine, &pattern, FlagSet::empty(), &text)
            .expect("literal patterns always compile");

        for pair in segments.windows(2) {
            prop_assert!(
                !(pair[0].style == SegmentStyle::NonMatch
                    && pair[1].style == SegmentStyle::NonMatch),
                "adjacent gaps must be merged"
            );
        }
        for seg in &segments {
            if seg.style == SegmentStyle::NonMatch {
                prop_assert!(!seg.text.is_empty(), "gap segments are never empty");
            }
        }
    }

    /// An empty-matching pattern over ASCII text of length n yields exactly
    /// n + 1 placeholders interleaved with single-char gaps.
    #[test]
    fn zero_width_interleaving(text in "[a-z]{0,40}") {
        let segments = segment(&RegexEngine, "x{0}", FlagSet::empty(), &text)
            .expect("empty-width pattern compiles");

        let placeholders = segments
            .iter()
            .filter(|s| s.style == SegmentStyle::ZeroWidthMatch)
            .count();
        prop_assert_eq!(placeholders, text.chars().count() + 1);

        for seg in &segments {
            match seg.style {
                SegmentStyle::ZeroWidthMatch => prop_assert_eq!(seg.text, " "),
                SegmentStyle::NonMatch => prop_assert_eq!(seg.text.len(), 1),
                other => prop_assert!(false, "unexpected style {:?}", other),
            }
        }
    }

    /// Segment styles never include the marker when matches exist.
    #[test]
    fn marker_excluded_when_matched(text in "[ab]{1,40}") {
        let segments = segment(&RegexEngine, "a", FlagSet::empty(), &text)
            .expect("pattern compiles");

        let has_match = segments.iter().any(|s| s.style == SegmentStyle::Match);
        let has_marker = segments.iter().any(|s| s.style == SegmentStyle::NoMatches);
        prop_assert!(has_match != has_marker, "marker iff no matches");
    }
}

// ============================================================================
// Ordering Properties
// ============================================================================

proptest! {
    /// Walking the segments left to right reproduces the text in order:
    /// every content segment's slice appears at the cursor position.
    #[test]
    fn segments_are_ordered_and_contiguous(
        pattern in literal_pattern(),
        text in text_strategy(),
    ) {
        let segments = segment(&RegexEngine, &pattern, FlagSet::empty(), &text)
            .expect("literal patterns always compile");

        let mut cursor = 0;
        for seg in &segments {
            match seg.style {
                SegmentStyle::NonMatch | SegmentStyle::Match => {
                    prop_assert_eq!(&text[cursor..cursor + seg.text.len()], seg.text);
                    cursor += seg.text.len();
                }
                _ => {}
            }
        }
        prop_assert_eq!(cursor, text.len(), "walk covers the whole text");
    }
}

// ============================================================================
// Helper Sanity
// ============================================================================

#[test]
fn fixed_spans_reconstruction_example() {
    let matcher = FixedSpans(vec![MatchSpan::new(2, 4), MatchSpan::new(6, 8)]);
    let segments: Vec<Segment<'_>> = segment_with(&matcher, "qqqqqqqqqq");
    assert_eq!(reconstruct(&segments), "qqqqqqqqqq");
}
