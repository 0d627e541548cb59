//! Color handling and the fixed heat-map palette.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// The fixed 9-color palette, cold to hot. Order matters: bucket `i` of the
/// quantize scale maps to `PALETTE[i]`.
pub const PALETTE: [&str; 9] = [
    "#2c7bb6", "#00a6ca", "#00ccbc", "#90eb9d", "#ffff8c", "#f9d057", "#f29e2e", "#e76818",
    "#d7191c",
];

/// Color value in RGBA format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn white() -> Self {
        Self::opaque(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::opaque(0, 0, 0)
    }

    /// Parse a `#rrggbb` hex color string.
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ChartError::InvalidColor(hex.to_string()));
        }

        let parse = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ChartError::InvalidColor(hex.to_string()))
        };
        let r = parse(&digits[0..2])?;
        let g = parse(&digits[2..4])?;
        let b = parse(&digits[4..6])?;

        Ok(Self::opaque(r, g, b))
    }

    /// Format as a lowercase `#rrggbb` string (alpha is not represented).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
