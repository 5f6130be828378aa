//! Font and paragraph specifications
//!
//! Measurements are stored in HWPUNIT (1 pt = 100 units) so that every
//! specification is `Eq + Hash` and can serve directly as a registry key.

use std::fmt;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use md2hwpx_ast::Alignment;

/// A length or font size in HWPUNIT (1/100 pt)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct HwpUnit(pub i32);

impl HwpUnit {
    /// Zero length
    pub const ZERO: HwpUnit = HwpUnit(0);

    /// Convert points to HWPUNIT
    pub fn from_pt(points: f64) -> Self {
        HwpUnit((points * 100.0).round() as i32)
    }

    /// Value in points
    pub fn as_pt(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Add for HwpUnit {
    type Output = HwpUnit;

    fn add(self, rhs: HwpUnit) -> HwpUnit {
        HwpUnit(self.0 + rhs.0)
    }
}

impl Mul<i32> for HwpUnit {
    type Output = HwpUnit;

    fn mul(self, rhs: i32) -> HwpUnit {
        HwpUnit(self.0 * rhs)
    }
}

impl fmt::Display for HwpUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black, the default text color
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Character formatting of a text run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font for Hangul (and other CJK) text
    pub hangul: String,
    /// Font for Latin text
    pub latin: String,
    /// Font size
    pub size: HwpUnit,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    /// Text color
    pub color: Rgb,
    /// Shading behind the text, if any
    pub background: Option<Rgb>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            hangul: "맑은 고딕".to_string(),
            latin: "Times New Roman".to_string(),
            size: HwpUnit::from_pt(10.0),
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            color: Rgb::BLACK,
            background: None,
        }
    }
}

impl FontSpec {
    /// Create a plain font from its two face names and a point size
    pub fn new(hangul: impl Into<String>, latin: impl Into<String>, size_pt: f64) -> Self {
        Self {
            hangul: hangul.into(),
            latin: latin.into(),
            size: HwpUnit::from_pt(size_pt),
            ..Self::default()
        }
    }

    /// Copy this specification and apply `overrides` to the copy
    ///
    /// ```
    /// use md2hwpx_hwpx::FontSpec;
    ///
    /// let body = FontSpec::default();
    /// let strong = body.derive(|f| f.bold = true);
    /// assert!(strong.bold);
    /// assert!(!body.bold);
    /// ```
    pub fn derive(&self, overrides: impl FnOnce(&mut FontSpec)) -> FontSpec {
        let mut derived = self.clone();
        overrides(&mut derived);
        derived
    }
}

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParaAlign {
    Left,
    Center,
    Right,
    #[default]
    Justify,
}

impl ParaAlign {
    /// OWPML `horizontal` attribute value
    pub fn as_owpml(self) -> &'static str {
        match self {
            ParaAlign::Left => "LEFT",
            ParaAlign::Center => "CENTER",
            ParaAlign::Right => "RIGHT",
            ParaAlign::Justify => "JUSTIFY",
        }
    }
}

impl From<Alignment> for ParaAlign {
    fn from(align: Alignment) -> Self {
        match align {
            Alignment::Left => ParaAlign::Left,
            Alignment::Center => ParaAlign::Center,
            Alignment::Right => ParaAlign::Right,
        }
    }
}

/// Paragraph layout
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParaSpec {
    pub align: ParaAlign,
    /// First-line indent (negative for a hanging indent)
    pub indent: HwpUnit,
    pub left_margin: HwpUnit,
    pub right_margin: HwpUnit,
    /// Line spacing as a percentage of the font height
    pub line_spacing: u32,
    pub space_before: HwpUnit,
    pub space_after: HwpUnit,
}

impl Default for ParaSpec {
    fn default() -> Self {
        Self {
            align: ParaAlign::Justify,
            indent: HwpUnit::ZERO,
            left_margin: HwpUnit::ZERO,
            right_margin: HwpUnit::ZERO,
            line_spacing: 160,
            space_before: HwpUnit::ZERO,
            space_after: HwpUnit::from_pt(6.0),
        }
    }
}

impl ParaSpec {
    /// Copy this specification and apply `overrides` to the copy
    pub fn derive(&self, overrides: impl FnOnce(&mut ParaSpec)) -> ParaSpec {
        let mut derived = self.clone();
        overrides(&mut derived);
        derived
    }
}

/// A named pair of character and paragraph formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDef {
    pub font: FontSpec,
    pub para: ParaSpec,
}

impl StyleDef {
    pub fn new(font: FontSpec, para: ParaSpec) -> Self {
        Self { font, para }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hwp_unit_conversion() {
        assert_eq!(HwpUnit::from_pt(10.0), HwpUnit(1000));
        assert_eq!(HwpUnit::from_pt(10.5), HwpUnit(1050));
        assert_eq!(HwpUnit::from_pt(-10.0), HwpUnit(-1000));
        assert_eq!(HwpUnit(950).as_pt(), 9.5);
        assert_eq!(HwpUnit(2000) + HwpUnit::from_pt(20.0) * 2, HwpUnit(6000));
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::from_hex("#0563C1"), Some(Rgb(0x05, 0x63, 0xC1)));
        assert_eq!(Rgb::from_hex("f5f5f5"), Some(Rgb(0xF5, 0xF5, 0xF5)));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
        assert_eq!(Rgb(0x05, 0x63, 0xC1).to_string(), "#0563C1");
    }

    #[test]
    fn test_derive_without_overrides_is_equal() {
        let font = FontSpec::new("바탕", "Times New Roman", 11.0);
        assert_eq!(font.derive(|_| {}), font);
        let para = ParaSpec::default();
        assert_eq!(para.derive(|_| {}), para);
    }

    #[test]
    fn test_derive_leaves_original_untouched() {
        let body = FontSpec::default();
        let link = body.derive(|f| {
            f.underline = true;
            f.color = Rgb(0x05, 0x63, 0xC1);
        });
        assert!(link.underline);
        assert!(!body.underline);
        assert_eq!(body.color, Rgb::BLACK);
        assert_eq!(link.size, body.size);
    }

    #[test]
    fn test_para_defaults() {
        let para = ParaSpec::default();
        assert_eq!(para.align, ParaAlign::Justify);
        assert_eq!(para.line_spacing, 160);
        assert_eq!(para.space_after, HwpUnit(600));
    }

    #[test]
    fn test_align_mapping() {
        assert_eq!(ParaAlign::from(Alignment::Center).as_owpml(), "CENTER");
        assert_eq!(ParaAlign::Justify.as_owpml(), "JUSTIFY");
        assert_eq!(ParaAlign::Left.as_owpml(), "LEFT");
    }
}
