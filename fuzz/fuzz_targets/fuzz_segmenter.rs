//! Fuzz target for match segmentation.
//!
//! Stresses the segmenter with arbitrary patterns, flag text, and test
//! text, checking that it never panics and that successful runs uphold
//! the reconstruction invariant.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rexpad::{FlagSet, RegexEngine, SegmentStyle, reconstruct, segment};

/// Structured input for segmenter fuzzing.
#[derive(Arbitrary, Debug)]
struct SegmenterInput {
    pattern: String,
    flags: String,
    text: String,
}

fuzz_target!(|input: SegmenterInput| {
    // Cap sizes so a single case cannot stall the fuzzer on pathological
    // compilations or giant scans
    let pattern: String = input.pattern.chars().take(64).collect();
    let text: String = input.text.chars().take(4096).collect();
    let flags = FlagSet::from_text(&input.flags);

    let Ok(segments) = segment(&RegexEngine, &pattern, flags, &text) else {
        // Empty or invalid patterns are expected outcomes, not crashes
        return;
    };

    // Concatenating the gap and match runs must reproduce the text exactly
    assert_eq!(reconstruct(&segments), text);

    // Match runs never carry empty text; zero-width matches use the
    // placeholder instead
    for seg in &segments {
        if seg.style == SegmentStyle::Match {
            assert!(!seg.text.is_empty());
        }
        if seg.style == SegmentStyle::ZeroWidthMatch {
            assert_eq!(seg.text, " ");
        }
    }
});
