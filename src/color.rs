//! Node color parsing.
//!
//! Category colors arrive as CSS hex strings (`#RGB`, `#RGBA`, `#RRGGBB`,
//! `#RRGGBBAA`). Digits are decoded with arithmetic instead of an if/else
//! chain per character; validity is checked once for the whole string.

use crate::error::ColorError;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha scaled by `k` (0..=1).
    pub fn faded(self, k: f32) -> Self {
        Self {
            a: (self.a as f32 * k.clamp(0.0, 1.0)).round() as u8,
            ..self
        }
    }
}

impl std::str::FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

/// Hex character → 4-bit value; 0xFF marks a non-hex byte.
#[inline(always)]
fn hex_digit(b: u8) -> u8 {
    let is_digit = (b.wrapping_sub(b'0') < 10) as u8;
    let is_lower = (b.wrapping_sub(b'a') < 6) as u8;
    let is_upper = (b.wrapping_sub(b'A') < 6) as u8;
    let valid = is_digit | is_lower | is_upper;

    let value = is_digit
        .wrapping_mul(b.wrapping_sub(b'0'))
        .wrapping_add(is_lower.wrapping_mul(b.wrapping_sub(b'a').wrapping_add(10)))
        .wrapping_add(is_upper.wrapping_mul(b.wrapping_sub(b'A').wrapping_add(10)));

    // valid → value, invalid → 0xFF
    value | (valid.wrapping_sub(1))
}

/// Parse a CSS hex color.
pub fn parse_hex_color(s: &str) -> Result<Rgba, ColorError> {
    let s = s.trim();
    let Some(hex) = s.strip_prefix('#') else {
        return Err(ColorError::MissingHash(s.to_owned()));
    };

    let digits: Vec<u8> = hex.bytes().map(hex_digit).collect();
    if digits.iter().any(|&d| d == 0xFF) {
        return Err(ColorError::BadDigit(s.to_owned()));
    }

    let short = |d: u8| d << 4 | d;
    let byte = |hi: u8, lo: u8| hi << 4 | lo;

    match digits.as_slice() {
        &[r, g, b] => Ok(Rgba::opaque(short(r), short(g), short(b))),
        &[r, g, b, a] => Ok(Rgba {
            r: short(r),
            g: short(g),
            b: short(b),
            a: short(a),
        }),
        &[r1, r0, g1, g0, b1, b0] => Ok(Rgba::opaque(byte(r1, r0), byte(g1, g0), byte(b1, b0))),
        &[r1, r0, g1, g0, b1, b0, a1, a0] => Ok(Rgba {
            r: byte(r1, r0),
            g: byte(g1, g0),
            b: byte(b1, b0),
            a: byte(a1, a0),
        }),
        _ => Err(ColorError::BadLength(s.to_owned())),
    }
}
