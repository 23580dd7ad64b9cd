//! Pattern flags and the flags-field input rule.
//!
//! The flags field accepts a small alphabet of single-character modifiers.
//! [`FlagSet`] is the parsed form handed to the engine;
//! [`accepts_flag_char`] is the rule the field's input filter enforces so
//! the engine never sees a duplicate or unrecognized flag.

use bitflags::bitflags;
use std::fmt;

/// Characters the flags field recognizes, in canonical display order.
pub const FLAG_ALPHABET: &str = "ixm";

bitflags! {
    /// Modifiers altering match semantics.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct FlagSet: u8 {
        /// `i`: case-insensitive matching.
        const IGNORE_CASE = 0x01;
        /// `x`: extended (free-spacing) pattern syntax.
        const EXTENDED = 0x02;
        /// `m`: `.` also matches newline.
        const DOT_MATCHES_NEWLINE = 0x04;
    }
}

impl FlagSet {
    /// Look up the flag named by one alphabet character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'i' => Some(Self::IGNORE_CASE),
            'x' => Some(Self::EXTENDED),
            'm' => Some(Self::DOT_MATCHES_NEWLINE),
            _ => None,
        }
    }

    /// Parse the flags field's text.
    ///
    /// Unrecognized characters are ignored. The input filter keeps them out
    /// of the field in the first place, so this only matters for values
    /// arriving through the library API.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        text.chars()
            .filter_map(Self::from_char)
            .fold(Self::empty(), |acc, f| acc | f)
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in FLAG_ALPHABET.chars() {
            // from_char covers the whole alphabet
            if Self::from_char(c).is_some_and(|flag| self.contains(flag)) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Input rule for the flags field.
///
/// A typed character is accepted only if it names a flag that is not
/// already present in the field. Navigation and editing keys are handled
/// by the field itself and never reach this rule.
#[must_use]
pub fn accepts_flag_char(current: &str, c: char) -> bool {
    FlagSet::from_char(c).is_some() && !current.contains(c)
}
