//! Themes: the fixed per-segment style table plus UI chrome colors.
//!
//! The four result styles are looked up through [`Theme::style_for`] from an
//! immutable table built once at startup. [`Theme::light`] keeps the classic
//! palette (highlights on a white page); [`Theme::dark`] is the default for
//! dark terminals.

use crate::color::Rgb;
use crate::segment::SegmentStyle;
use crate::style::Style;

/// Visual theme for the session: result styles and chrome.
#[derive(Clone, Debug)]
pub struct Theme {
    name: String,
    styles: [Style; SegmentStyle::COUNT],

    background: Rgb,
    foreground: Rgb,
    border: Rgb,
    border_focused: Rgb,
    label: Style,
    status: Style,
    hint: Style,
    cursor: Rgb,
}

impl Theme {
    /// Create a theme with neutral defaults; use the `with_*` setters to
    /// fill it in.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            styles: [Style::NONE; SegmentStyle::COUNT],
            background: Rgb::BLACK,
            foreground: Rgb::WHITE,
            border: Rgb::from_rgb_u8(120, 120, 120),
            border_focused: Rgb::WHITE,
            label: Style::NONE,
            status: Style::NONE,
            hint: Style::dim(),
            cursor: Rgb::WHITE,
        }
    }

    /// Theme name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Style for one segment kind.
    #[must_use]
    pub const fn style_for(&self, style: SegmentStyle) -> Style {
        self.styles[style.as_usize()]
    }

    /// Pane background color.
    #[must_use]
    pub const fn background(&self) -> Rgb {
        self.background
    }

    /// Default text color.
    #[must_use]
    pub const fn foreground(&self) -> Rgb {
        self.foreground
    }

    /// Border color, keyed by whether the pane has focus.
    #[must_use]
    pub const fn border(&self, focused: bool) -> Rgb {
        if focused { self.border_focused } else { self.border }
    }

    /// Pane label style.
    #[must_use]
    pub const fn label(&self) -> Style {
        self.label
    }

    /// Status bar style.
    #[must_use]
    pub const fn status(&self) -> Style {
        self.status
    }

    /// Key-hint style (dimmed part of the status bar).
    #[must_use]
    pub const fn hint(&self) -> Style {
        self.hint
    }

    /// Cursor color for the focused editor.
    #[must_use]
    pub const fn cursor(&self) -> Rgb {
        self.cursor
    }

    /// Builder-style segment style setter.
    #[must_use]
    pub fn with_style(mut self, kind: SegmentStyle, style: Style) -> Self {
        self.styles[kind.as_usize()] = style;
        self
    }

    /// Builder-style background setter.
    #[must_use]
    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    /// Builder-style foreground setter.
    #[must_use]
    pub fn with_foreground(mut self, color: Rgb) -> Self {
        self.foreground = color;
        self
    }

    /// Builder-style border color setter.
    #[must_use]
    pub fn with_border(mut self, color: Rgb) -> Self {
        self.border = color;
        self
    }

    /// Builder-style focused border color setter.
    #[must_use]
    pub fn with_border_focused(mut self, color: Rgb) -> Self {
        self.border_focused = color;
        self
    }

    /// Builder-style label style setter.
    #[must_use]
    pub fn with_label(mut self, style: Style) -> Self {
        self.label = style;
        self
    }

    /// Builder-style status bar style setter.
    #[must_use]
    pub fn with_status(mut self, style: Style) -> Self {
        self.status = style;
        self
    }

    /// Builder-style hint style setter.
    #[must_use]
    pub fn with_hint(mut self, style: Style) -> Self {
        self.hint = style;
        self
    }

    /// Builder-style cursor color setter.
    #[must_use]
    pub fn with_cursor(mut self, color: Rgb) -> Self {
        self.cursor = color;
        self
    }

    /// Dark theme, the default on startup.
    #[must_use]
    pub fn dark() -> Self {
        let background = Rgb::from_hex("#282a36").unwrap();
        let foreground = Rgb::from_hex("#f8f8f2").unwrap();
        let comment = Rgb::from_hex("#6272a4").unwrap();
        let cyan = Rgb::from_hex("#8be9fd").unwrap();
        let yellow = Rgb::from_hex("#f1fa8c").unwrap();
        let red = Rgb::from_hex("#ff5555").unwrap();
        let purple = Rgb::from_hex("#bd93f9").unwrap();
        let status_bg = Rgb::from_hex("#44475a").unwrap();

        Self::new("Dark")
            .with_background(background)
            .with_foreground(foreground)
            .with_border(comment)
            .with_border_focused(cyan)
            .with_label(Style::fg(purple).with_bold())
            .with_status(Style::fg(foreground).with_bg(status_bg))
            .with_hint(Style::fg(comment).with_bg(status_bg))
            .with_cursor(foreground)
            .with_style(SegmentStyle::NonMatch, Style::fg(foreground))
            .with_style(
                SegmentStyle::Match,
                Style::fg(background).with_bg(yellow),
            )
            .with_style(
                SegmentStyle::ZeroWidthMatch,
                Style::fg(foreground).with_bg(comment),
            )
            .with_style(SegmentStyle::NoMatches, Style::fg(red).with_bold())
    }

    /// Light theme preserving the classic palette: black text on a white
    /// page, matches on light grey, zero-width matches in reverse video,
    /// prompts in red.
    #[must_use]
    pub fn light() -> Self {
        let light_grey = Rgb::from_rgb_u8(192, 192, 192);
        let border = Rgb::from_rgb_u8(128, 128, 128);
        let status_bg = Rgb::from_rgb_u8(224, 224, 224);
        let accent = Rgb::from_rgb_u8(0, 0, 215);

        Self::new("Light")
            .with_background(Rgb::WHITE)
            .with_foreground(Rgb::BLACK)
            .with_border(border)
            .with_border_focused(accent)
            .with_label(Style::fg(Rgb::BLACK).with_bold())
            .with_status(Style::fg(Rgb::BLACK).with_bg(status_bg))
            .with_hint(Style::fg(border).with_bg(status_bg))
            .with_cursor(Rgb::BLACK)
            .with_style(
                SegmentStyle::NonMatch,
                Style::fg(Rgb::BLACK).with_bg(Rgb::WHITE),
            )
            .with_style(
                SegmentStyle::Match,
                Style::fg(Rgb::BLACK).with_bg(light_grey),
            )
            .with_style(
                SegmentStyle::ZeroWidthMatch,
                Style::fg(Rgb::WHITE).with_bg(Rgb::BLACK),
            )
            .with_style(
                SegmentStyle::NoMatches,
                Style::fg(Rgb::RED).with_bg(Rgb::WHITE),
            )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_table_fully_populated() {
        for theme in [Theme::dark(), Theme::light()] {
            for kind in [
                SegmentStyle::NonMatch,
                SegmentStyle::Match,
                SegmentStyle::ZeroWidthMatch,
                SegmentStyle::NoMatches,
            ] {
                assert!(
                    !theme.style_for(kind).is_empty(),
                    "{} theme missing {kind:?}",
                    theme.name()
                );
            }
        }
    }

    #[test]
    fn test_light_keeps_classic_palette() {
        let theme = Theme::light();

        let non_match = theme.style_for(SegmentStyle::NonMatch);
        assert_eq!(non_match.fg, Some(Rgb::BLACK));
        assert_eq!(non_match.bg, Some(Rgb::WHITE));

        let matched = theme.style_for(SegmentStyle::Match);
        assert_eq!(matched.bg, Some(Rgb::from_rgb_u8(192, 192, 192)));

        let zero_width = theme.style_for(SegmentStyle::ZeroWidthMatch);
        assert_eq!(zero_width.fg, Some(Rgb::WHITE));
        assert_eq!(zero_width.bg, Some(Rgb::BLACK));

        let prompt = theme.style_for(SegmentStyle::NoMatches);
        assert_eq!(prompt.fg, Some(Rgb::RED));
    }

    #[test]
    fn test_border_follows_focus() {
        let theme = Theme::dark();
        assert_ne!(theme.border(true), theme.border(false));
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default().name(), "Dark");
    }
}
