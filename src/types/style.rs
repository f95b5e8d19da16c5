//! Grid-line style data carried by the layout and emitted with line segments.

use serde::{Deserialize, Serialize};

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse from a hex string (`#RRGGBB` or `#RRGGBBAA`, `#` optional).
    /// Returns None if the format is invalid.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
                let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
                let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
                Some(Self::opaque(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
                let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
                let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
                let a = u8::from_str_radix(hex.get(6..8)?, 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Convert to a hex string (`#RRGGBB`, or `#RRGGBBAA` when translucent).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Stroke width and color of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderStyle {
    pub width: f32,
    pub color: Rgba,
}

impl BorderStyle {
    /// Create a border style.
    pub const fn new(width: f32, color: Rgba) -> Self {
        Self { width, color }
    }
}

impl Default for BorderStyle {
    fn default() -> Self {
        // 1px light gray, the usual spreadsheet grid line
        Self::new(1.0, Rgba::opaque(0xE0, 0xE0, 0xE0))
    }
}

/// How grid lines are drawn between cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridStyle {
    /// No grid lines; a resolve pass emits no line segments.
    None,
    /// Solid lines drawn in the intercell gaps.
    Solid(BorderStyle),
}

impl Default for GridStyle {
    fn default() -> Self {
        GridStyle::Solid(BorderStyle::default())
    }
}

impl GridStyle {
    /// Solid style with the default border.
    pub fn solid() -> Self {
        GridStyle::Solid(BorderStyle::default())
    }

    /// True when grid lines are disabled.
    pub fn is_none(&self) -> bool {
        matches!(self, GridStyle::None)
    }

    /// The border style, if lines are drawn.
    pub fn border(&self) -> Option<BorderStyle> {
        match self {
            GridStyle::None => None,
            GridStyle::Solid(border) => Some(*border),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6() {
        let c = Rgba::from_hex("#FF8040").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (255, 128, 64, 255));
    }

    #[test]
    fn test_from_hex_8() {
        let c = Rgba::from_hex("FF804080").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (255, 128, 64, 128));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Rgba::from_hex("#FFF").is_none());
        assert!(Rgba::from_hex("not a color").is_none());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgba::opaque(255, 0, 0).to_hex(), "#FF0000");
        assert_eq!(Rgba::new(255, 0, 0, 128).to_hex(), "#FF000080");
    }

    #[test]
    fn test_default_style_is_solid() {
        let style = GridStyle::default();
        assert!(!style.is_none());
        let border = style.border().unwrap();
        assert_eq!(border.width, 1.0);
    }
}
