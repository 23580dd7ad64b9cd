//! Pattern compilation and matching.
//!
//! The segmenter reaches the regex machinery through the [`Engine`] and
//! [`Matcher`] traits, so tests can drive it with a scripted matcher and
//! the matching backend stays swappable. [`RegexEngine`] is the default
//! implementation on top of the `regex` crate.

use crate::flags::FlagSet;
use crate::segment::MatchSpan;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// A compiled pattern capable of scanning text for matches.
pub trait Matcher {
    /// All non-overlapping matches in `text`, ordered by start offset.
    ///
    /// Implementations must guarantee forward progress: a zero-length match
    /// never repeats at the same offset, so spans are strictly increasing
    /// in `start`.
    fn find_spans(&self, text: &str) -> Vec<MatchSpan>;
}

/// Compiles pattern text under a set of flags into a [`Matcher`].
pub trait Engine: Send + Sync {
    /// The matcher type this engine produces.
    type Matcher: Matcher;

    /// Compile `pattern` under `flags`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the pattern is not valid syntax.
    fn compile(&self, pattern: &str, flags: FlagSet) -> Result<Self::Matcher, CompileError>;
}

/// Pattern compilation failure.
///
/// Carries the backend's diagnostic for library callers; the interactive
/// session renders only a generic message.
#[derive(Clone, Debug)]
pub struct CompileError {
    message: String,
}

impl CompileError {
    /// Wrap a diagnostic message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The backend's diagnostic text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern failed to compile: {}", self.message)
    }
}

impl std::error::Error for CompileError {}

impl From<regex::Error> for CompileError {
    fn from(e: regex::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// The default engine, backed by the `regex` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexEngine;

impl Engine for RegexEngine {
    type Matcher = CompiledPattern;

    fn compile(&self, pattern: &str, flags: FlagSet) -> Result<CompiledPattern, CompileError> {
        // `m` is "dot matches newline" here, not per-line anchors
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(flags.contains(FlagSet::IGNORE_CASE))
            .ignore_whitespace(flags.contains(FlagSet::EXTENDED))
            .dot_matches_new_line(flags.contains(FlagSet::DOT_MATCHES_NEWLINE))
            .build()?;
        Ok(CompiledPattern { regex })
    }
}

/// A pattern compiled by [`RegexEngine`].
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    regex: Regex,
}

impl Matcher for CompiledPattern {
    fn find_spans(&self, text: &str) -> Vec<MatchSpan> {
        // find_iter already skips past empty matches, so the forward
        // progress guarantee holds by construction
        self.regex
            .find_iter(text)
            .map(|m| MatchSpan::new(m.start(), m.end()))
            .collect()
    }
}
