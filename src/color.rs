//! RGB color type with terminal palette conversions.
//!
//! This module provides the [`Rgb`] type, which represents colors using
//! floating-point components. It supports:
//!
//! - **Color creation**: From f32/u8 components or hex strings
//! - **Color conversion**: To 256-color and 16-color terminal palettes
//!
//! # Examples
//!
//! ```
//! use rexpad::Rgb;
//!
//! let red = Rgb::RED;
//! let custom = Rgb::from_hex("#1a1a2e").unwrap();
//!
//! // Convert to terminal palette
//! let ansi_256 = red.to_256_color();
//! ```

use std::fmt;

/// RGB color with f32 components in range [0.0, 1.0].
///
/// Colors are stored as floating-point values; terminal output converts to
/// the appropriate format (true color, 256-color, or 16-color) based on the
/// active [`ColorMode`](crate::ansi::ColorMode).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// White.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Red.
    pub const RED: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };

    /// Green.
    pub const GREEN: Self = Self {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };

    /// Blue.
    pub const BLUE: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };

    /// Create a new color from f32 components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from u8 components.
    #[must_use]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }

    /// Parse a hex color string (e.g., "#FF0000" or "FF0000").
    ///
    /// Supports 3-char (#RGB) and 6-char (#RRGGBB) formats.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::from_rgb_u8(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::from_rgb_u8(r, g, b))
            }
            _ => None,
        }
    }

    /// Convert to u8 RGB tuple, clamping values to [0, 255].
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        let to_u8 = |value: f32| (value * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Convert to nearest 256-color palette index.
    ///
    /// Uses the 6x6x6 color cube (colors 16-231) or grayscale ramp (232-255)
    /// depending on which provides the closest match.
    #[must_use]
    pub fn to_256_color(self) -> u8 {
        let (r, g, b) = self.to_rgb_u8();

        // Check if grayscale would be a better match
        let gray = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
        let is_grayscale = (i16::from(r) - i16::from(gray)).abs() < 10
            && (i16::from(g) - i16::from(gray)).abs() < 10
            && (i16::from(b) - i16::from(gray)).abs() < 10;

        if is_grayscale {
            // Grayscale ramp: 24 levels, 10 apart, starting at 8
            let gray_idx = (u16::from(gray) * 24 / 256) as u8;
            return 232 + gray_idx.min(23);
        }

        // 6x6x6 color cube (colors 16-231)
        let ri = Self::nearest_cube_index(r);
        let gi = Self::nearest_cube_index(g);
        let bi = Self::nearest_cube_index(b);

        16 + 36 * ri + 6 * gi + bi
    }

    /// Find the nearest index in the 6x6x6 cube for a component value.
    ///
    /// The cube values are [0, 95, 135, 175, 215, 255] with boundaries
    /// at midpoints: 48, 115, 155, 195, 235.
    #[inline]
    fn nearest_cube_index(val: u8) -> u8 {
        if val < 48 {
            0
        } else if val < 115 {
            1
        } else if val < 155 {
            2
        } else if val < 195 {
            3
        } else if val < 235 {
            4
        } else {
            5
        }
    }

    /// Convert to nearest 16-color (basic ANSI) palette index.
    ///
    /// Returns a value 0-15 for the standard ANSI colors:
    /// 0-7: black, red, green, yellow, blue, magenta, cyan, white (normal)
    /// 8-15: bright versions of the above
    #[must_use]
    pub fn to_16_color(self) -> u8 {
        let (r, g, b) = self.to_rgb_u8();
        let r = i32::from(r);
        let g = i32::from(g);
        let b = i32::from(b);

        // Standard ANSI palette (approximate values)
        #[rustfmt::skip]
        const PALETTE: [(i32, i32, i32); 16] = [
            (0, 0, 0),       // 0 Black
            (128, 0, 0),     // 1 Red
            (0, 128, 0),     // 2 Green
            (128, 128, 0),   // 3 Yellow
            (0, 0, 128),     // 4 Blue
            (128, 0, 128),   // 5 Magenta
            (0, 128, 128),   // 6 Cyan
            (192, 192, 192), // 7 White
            (128, 128, 128), // 8 Bright Black
            (255, 0, 0),     // 9 Bright Red
            (0, 255, 0),     // 10 Bright Green
            (255, 255, 0),   // 11 Bright Yellow
            (0, 0, 255),     // 12 Bright Blue
            (255, 0, 255),   // 13 Bright Magenta
            (0, 255, 255),   // 14 Bright Cyan
            (255, 255, 255), // 15 Bright White
        ];

        let mut best_idx = 0;
        let mut min_dist = i32::MAX;

        for (i, &(pr, pg, pb)) in PALETTE.iter().enumerate() {
            let dr = r - pr;
            let dg = g - pg;
            let db = b - pb;
            // Squared Euclidean distance
            let dist = dr * dr + dg * dg + db * db;

            if dist < min_dist {
                min_dist = dist;
                best_idx = i;
            }
        }

        best_idx as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb_u8();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}
