//! Colour type, hex parsing, and RGB/HSL conversions.
//!
//! There are two flavours of hex handling here:
//! - [`Colour::from_hex`] is strict and returns an error for malformed input.
//! - [`hex_to_rgb`] and friends are lenient: they normalise short forms and
//!   fall back to black instead of failing, which is what the colour picker
//!   and swatch inputs want.

use std::fmt;
use std::str::FromStr;

use palette::{Hsl as PaletteHsl, IntoColor, Srgb};

use crate::error::{EditError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        let digits = hex
            .chars()
            .map(parse_hex_digit)
            .collect::<Result<Vec<u8>>>()?;

        match digits.as_slice() {
            [r, g, b] => Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b)),
            [r, g, b, a] => Ok(Self::new(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Self::new(
                r1 << 4 | r2,
                g1 << 4 | g2,
                b1 << 4 | b2,
                a1 << 4 | a2,
            )),
            _ => Err(EditError::Parse {
                message: format!("Invalid hex colour: {}", s),
                help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
            }),
        }
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from an RGBA array.
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// The same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl FromStr for Colour {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// A colour in HSL space.
///
/// Hue is in degrees, saturation and lightness are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }
}

/// Normalise a lenient hex string to `#RRGGBB`.
///
/// Two digits repeat three times (`ab` -> `#ABABAB`), three digits repeat
/// twice (`abc` -> `#ABCABC`). Anything else falls back to `#000000`.
pub fn normalize_hex(input: &str) -> String {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

    let expanded = match hex.len() {
        2 => hex.repeat(3),
        3 => hex.repeat(2),
        6 => hex.to_string(),
        _ => String::new(),
    };

    if expanded.len() == 6 && expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        format!("#{}", expanded.to_ascii_uppercase())
    } else {
        tracing::warn!(input, "malformed hex colour, falling back to black");
        "#000000".to_string()
    }
}

/// Lenient hex to opaque RGB.
pub fn hex_to_rgb(input: &str) -> Colour {
    // normalize_hex only ever yields a valid 6-digit string
    Colour::from_hex(&normalize_hex(input)).unwrap_or(Colour::BLACK)
}

/// Format the RGB channels as `#RRGGBB`, ignoring alpha.
pub fn rgb_to_hex(colour: Colour) -> String {
    format!("#{:02X}{:02X}{:02X}", colour.r, colour.g, colour.b)
}

/// Convert RGB to HSL.
///
/// Hue is wrapped to `[0, 360)`; all three components are rounded to the
/// nearest integer.
pub fn rgb_to_hsl(colour: Colour) -> Hsl {
    let rgb: Srgb<f32> = Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    );
    let hsl: PaletteHsl = rgb.into_color();

    let hue = hsl.hue.into_positive_degrees().round() % 360.0;
    Hsl::new(
        hue,
        (hsl.saturation * 100.0).round(),
        (hsl.lightness * 100.0).round(),
    )
}

/// Convert HSL to an opaque RGB colour.
///
/// Hue wraps, saturation and lightness clamp to `[0, 100]`, channels are
/// rounded and clamped to `[0, 255]`.
pub fn hsl_to_rgb(hsl: Hsl) -> Colour {
    let hue = hsl.h.rem_euclid(360.0);
    let saturation = hsl.s.clamp(0.0, 100.0) / 100.0;
    let lightness = hsl.l.clamp(0.0, 100.0) / 100.0;

    let rgb: Srgb<f32> = PaletteHsl::new(hue, saturation, lightness).into_color();
    Colour::rgb(
        unit_to_channel(rgb.red),
        unit_to_channel(rgb.green),
        unit_to_channel(rgb.blue),
    )
}

/// Lenient hex to HSL.
pub fn hex_to_hsl(input: &str) -> Hsl {
    rgb_to_hsl(hex_to_rgb(input))
}

fn unit_to_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| EditError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#1a1a2e").unwrap();
        assert_eq!(c, Colour::rgb(0x1a, 0x1a, 0x2e));
    }

    #[test]
    fn test_from_hex_short_forms() {
        assert_eq!(Colour::from_hex("#ABC").unwrap(), Colour::rgb(0xAA, 0xBB, 0xCC));
        assert_eq!(Colour::from_hex("#F008").unwrap(), Colour::new(255, 0, 0, 0x88));
        assert_eq!(Colour::from_hex("FF000080").unwrap(), Colour::new(255, 0, 0, 128));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Colour::rgb(255, 0, 0)), "#FF0000");
        assert_eq!(format!("{}", Colour::new(255, 0, 0, 128)), "#FF000080");
    }

    #[test]
    fn test_normalize_hex_lengths() {
        assert_eq!(normalize_hex("ab"), "#ABABAB");
        assert_eq!(normalize_hex("#abc"), "#ABCABC");
        assert_eq!(normalize_hex("#00ff7f"), "#00FF7F");
    }

    #[test]
    fn test_normalize_hex_fallback() {
        assert_eq!(normalize_hex(""), "#000000");
        assert_eq!(normalize_hex("#1234"), "#000000");
        assert_eq!(normalize_hex("zzzzzz"), "#000000");
        assert_eq!(hex_to_rgb("not a colour"), Colour::BLACK);
    }

    #[test]
    fn test_hex_round_trip_is_stable() {
        for input in ["7f", "#0af", "c0ffee", "#123456", "bad"] {
            let once = hex_to_rgb(input);
            let twice = hex_to_rgb(&rgb_to_hex(once));
            assert_eq!(once, twice, "input {input}");
        }
    }

    #[test]
    fn test_rgb_to_hsl_primaries() {
        assert_eq!(rgb_to_hsl(Colour::rgb(255, 0, 0)), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Colour::rgb(0, 255, 0)), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Colour::rgb(0, 0, 255)), Hsl::new(240.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Colour::WHITE), Hsl::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn test_rgb_to_hsl_rounds() {
        // #336699 is 210deg, 50%, 40%
        assert_eq!(hex_to_hsl("#336699"), Hsl::new(210.0, 50.0, 40.0));
    }

    #[test]
    fn test_hsl_to_rgb_wraps_and_clamps() {
        assert_eq!(hsl_to_rgb(Hsl::new(360.0, 100.0, 50.0)), Colour::rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(-120.0, 100.0, 50.0)), Colour::rgb(0, 0, 255));
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 250.0, 150.0)), Colour::WHITE);
    }
}
