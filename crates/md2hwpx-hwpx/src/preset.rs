//! Built-in style presets
//!
//! A preset maps every semantic style name to a concrete [`StyleDef`].
//! Four presets ship with the crate; the one chosen for a conversion is
//! immutable for its lifetime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HwpxError;
use crate::style::{FontSpec, HwpUnit, ParaAlign, ParaSpec, Rgb, StyleDef};

/// Names of the built-in presets, in listing order
pub const PRESET_NAMES: [&str; 4] = ["default", "academic", "business", "minimal"];

/// One of the built-in presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    /// Sans-serif body, justified
    #[default]
    Default,
    /// Serif body with wide spacing
    Academic,
    /// Compact, left aligned
    Business,
    /// Tight spacing, light accents
    Minimal,
}

impl PresetName {
    /// All presets in listing order
    pub const ALL: [PresetName; 4] = [
        PresetName::Default,
        PresetName::Academic,
        PresetName::Business,
        PresetName::Minimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetName::Default => "default",
            PresetName::Academic => "academic",
            PresetName::Business => "business",
            PresetName::Minimal => "minimal",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = HwpxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| HwpxError::unknown_preset(s))
    }
}

/// Semantic style names understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleName {
    /// `heading_1` .. `heading_6`
    Heading(u8),
    Body,
    CodeBlock,
    InlineCode,
    Blockquote,
    TableHeader,
    TableBody,
    ListItem,
    Footnote,
    HorizontalRule,
}

impl StyleName {
    /// Heading style for `level`, clamped to 1..=6
    pub fn heading(level: u8) -> Self {
        StyleName::Heading(level.clamp(1, 6))
    }

    /// Every recognized name, headings first
    pub fn all() -> Vec<StyleName> {
        let mut names: Vec<StyleName> = (1..=6).map(StyleName::Heading).collect();
        names.extend([
            StyleName::Body,
            StyleName::CodeBlock,
            StyleName::InlineCode,
            StyleName::Blockquote,
            StyleName::TableHeader,
            StyleName::TableBody,
            StyleName::ListItem,
            StyleName::Footnote,
            StyleName::HorizontalRule,
        ]);
        names
    }

    /// Parse a semantic name such as `heading_2` or `table_body`
    pub fn parse(name: &str) -> Option<StyleName> {
        if let Some(level) = name.strip_prefix("heading_") {
            return match level.parse::<u8>() {
                Ok(level @ 1..=6) => Some(StyleName::Heading(level)),
                _ => None,
            };
        }
        let style = match name {
            "body" => StyleName::Body,
            "code_block" => StyleName::CodeBlock,
            "inline_code" => StyleName::InlineCode,
            "blockquote" => StyleName::Blockquote,
            "table_header" => StyleName::TableHeader,
            "table_body" => StyleName::TableBody,
            "list_item" => StyleName::ListItem,
            "footnote" => StyleName::Footnote,
            "horizontal_rule" => StyleName::HorizontalRule,
            _ => return None,
        };
        Some(style)
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleName::Heading(level) => write!(f, "heading_{level}"),
            StyleName::Body => f.write_str("body"),
            StyleName::CodeBlock => f.write_str("code_block"),
            StyleName::InlineCode => f.write_str("inline_code"),
            StyleName::Blockquote => f.write_str("blockquote"),
            StyleName::TableHeader => f.write_str("table_header"),
            StyleName::TableBody => f.write_str("table_body"),
            StyleName::ListItem => f.write_str("list_item"),
            StyleName::Footnote => f.write_str("footnote"),
            StyleName::HorizontalRule => f.write_str("horizontal_rule"),
        }
    }
}

/// The full set of styles making up one preset
#[derive(Debug, Clone, PartialEq)]
struct StyleSet {
    headings: [StyleDef; 6],
    body: StyleDef,
    code_block: StyleDef,
    inline_code: StyleDef,
    blockquote: StyleDef,
    table_header: StyleDef,
    table_body: StyleDef,
    list_item: StyleDef,
    footnote: StyleDef,
    horizontal_rule: StyleDef,
}

/// Per-level heading metrics in points: size, space before, space after
struct HeadingScale {
    sizes: [f64; 6],
    before: [f64; 6],
    after: [f64; 6],
}

impl HeadingScale {
    fn build(&self, body_font: &FontSpec, body_para: &ParaSpec) -> [StyleDef; 6] {
        std::array::from_fn(|i| {
            StyleDef::new(
                body_font.derive(|f| {
                    f.size = HwpUnit::from_pt(self.sizes[i]);
                    f.bold = true;
                }),
                body_para.derive(|p| {
                    p.align = ParaAlign::Left;
                    p.space_before = HwpUnit::from_pt(self.before[i]);
                    p.space_after = HwpUnit::from_pt(self.after[i]);
                }),
            )
        })
    }
}

fn pt(points: f64) -> HwpUnit {
    HwpUnit::from_pt(points)
}

fn code_font(latin: &str, size_pt: f64, color: Rgb, background: Rgb) -> FontSpec {
    FontSpec {
        color,
        background: Some(background),
        ..FontSpec::new("D2Coding", latin, size_pt)
    }
}

fn code_para(line_spacing: u32, space: f64) -> ParaSpec {
    ParaSpec {
        align: ParaAlign::Left,
        line_spacing,
        space_before: pt(space),
        space_after: pt(space),
        ..ParaSpec::default()
    }
}

fn table_styles(body_font: &FontSpec, body_para: &ParaSpec, size_pt: f64, space: f64) -> (StyleDef, StyleDef) {
    let header = StyleDef::new(
        body_font.derive(|f| {
            f.bold = true;
            f.size = pt(size_pt);
        }),
        body_para.derive(|p| {
            p.align = ParaAlign::Center;
            p.space_before = pt(space);
            p.space_after = pt(space);
        }),
    );
    let body = StyleDef::new(
        body_font.derive(|f| f.size = pt(size_pt)),
        body_para.derive(|p| {
            p.align = ParaAlign::Left;
            p.space_before = pt(space);
            p.space_after = pt(space);
        }),
    );
    (header, body)
}

const INLINE_CODE_COLOR: Rgb = Rgb(0x33, 0x33, 0x33);
const INLINE_CODE_SHADE: Rgb = Rgb(0xF0, 0xF0, 0xF0);
const CODE_BLOCK_SHADE: Rgb = Rgb(0xF5, 0xF5, 0xF5);

fn default_styles() -> StyleSet {
    let body_font = FontSpec::new("맑은 고딕", "Times New Roman", 10.0);
    let body_para = ParaSpec {
        align: ParaAlign::Justify,
        line_spacing: 160,
        space_after: pt(6.0),
        ..ParaSpec::default()
    };
    let headings = HeadingScale {
        sizes: [22.0, 18.0, 14.0, 12.0, 11.0, 10.0],
        before: [16.0, 14.0, 12.0, 10.0, 8.0, 6.0],
        after: [10.0, 8.0, 6.0, 6.0, 4.0, 4.0],
    }
    .build(&body_font, &body_para);
    let (table_header, table_body) = table_styles(&body_font, &body_para, 9.0, 2.0);

    StyleSet {
        headings,
        code_block: StyleDef::new(
            code_font("Consolas", 9.0, Rgb::BLACK, CODE_BLOCK_SHADE),
            code_para(150, 4.0),
        ),
        inline_code: StyleDef::new(
            code_font("Consolas", 9.0, INLINE_CODE_COLOR, INLINE_CODE_SHADE),
            body_para.clone(),
        ),
        blockquote: StyleDef::new(
            body_font.derive(|f| f.italic = true),
            body_para.derive(|p| {
                p.left_margin = pt(20.0);
                p.space_before = pt(4.0);
                p.space_after = pt(4.0);
            }),
        ),
        table_header,
        table_body,
        list_item: StyleDef::new(
            body_font.clone(),
            body_para.derive(|p| {
                p.left_margin = pt(20.0);
                p.indent = pt(-10.0);
            }),
        ),
        footnote: StyleDef::new(
            body_font.derive(|f| f.size = pt(8.0)),
            body_para.derive(|p| {
                p.line_spacing = 140;
                p.space_after = pt(2.0);
            }),
        ),
        horizontal_rule: StyleDef::new(
            body_font.derive(|f| f.size = pt(2.0)),
            body_para.derive(|p| {
                p.space_before = pt(8.0);
                p.space_after = pt(8.0);
            }),
        ),
        body: StyleDef::new(body_font, body_para),
    }
}

fn academic_styles() -> StyleSet {
    let body_font = FontSpec::new("바탕", "Times New Roman", 11.0);
    let body_para = ParaSpec {
        line_spacing: 200,
        space_after: pt(8.0),
        ..ParaSpec::default()
    };
    let headings = HeadingScale {
        sizes: [24.0, 20.0, 16.0, 13.0, 12.0, 11.0],
        before: [20.0, 16.0, 14.0, 12.0, 10.0, 8.0],
        after: [12.0, 10.0, 8.0, 8.0, 6.0, 6.0],
    }
    .build(&body_font, &body_para);
    let (table_header, table_body) = table_styles(&body_font, &body_para, 10.0, 3.0);

    StyleSet {
        headings,
        code_block: StyleDef::new(
            code_font("Courier New", 9.5, Rgb::BLACK, CODE_BLOCK_SHADE),
            code_para(160, 6.0),
        ),
        inline_code: StyleDef::new(
            code_font("Courier New", 9.5, INLINE_CODE_COLOR, INLINE_CODE_SHADE),
            body_para.clone(),
        ),
        blockquote: StyleDef::new(
            body_font.derive(|f| f.italic = true),
            body_para.derive(|p| {
                p.left_margin = pt(24.0);
                p.space_before = pt(6.0);
                p.space_after = pt(6.0);
            }),
        ),
        table_header,
        table_body,
        list_item: StyleDef::new(
            body_font.clone(),
            body_para.derive(|p| {
                p.left_margin = pt(24.0);
                p.indent = pt(-12.0);
            }),
        ),
        footnote: StyleDef::new(
            body_font.derive(|f| f.size = pt(9.0)),
            body_para.derive(|p| {
                p.line_spacing = 150;
                p.space_after = pt(3.0);
            }),
        ),
        horizontal_rule: StyleDef::new(body_font.clone(), body_para.clone()),
        body: StyleDef::new(body_font, body_para),
    }
}

fn business_styles() -> StyleSet {
    let body_font = FontSpec::new("맑은 고딕", "Arial", 10.0);
    let body_para = ParaSpec {
        align: ParaAlign::Left,
        line_spacing: 150,
        space_after: pt(4.0),
        ..ParaSpec::default()
    };
    let headings = HeadingScale {
        sizes: [20.0, 16.0, 13.0, 11.0, 10.5, 10.0],
        before: [14.0, 12.0, 10.0, 8.0, 6.0, 6.0],
        after: [8.0, 6.0, 4.0, 4.0, 4.0, 4.0],
    }
    .build(&body_font, &body_para);
    let (table_header, table_body) = table_styles(&body_font, &body_para, 9.0, 2.0);

    StyleSet {
        headings,
        code_block: StyleDef::new(
            code_font("Consolas", 9.0, Rgb::BLACK, CODE_BLOCK_SHADE),
            code_para(140, 4.0),
        ),
        inline_code: StyleDef::new(
            code_font("Consolas", 9.0, INLINE_CODE_COLOR, INLINE_CODE_SHADE),
            body_para.clone(),
        ),
        blockquote: StyleDef::new(
            body_font.derive(|f| {
                f.italic = true;
                f.color = Rgb(0x55, 0x55, 0x55);
            }),
            body_para.derive(|p| {
                p.left_margin = pt(16.0);
                p.space_before = pt(4.0);
                p.space_after = pt(4.0);
            }),
        ),
        table_header,
        table_body,
        list_item: StyleDef::new(
            body_font.clone(),
            body_para.derive(|p| {
                p.left_margin = pt(18.0);
                p.indent = pt(-9.0);
            }),
        ),
        footnote: StyleDef::new(
            body_font.derive(|f| f.size = pt(8.0)),
            body_para.derive(|p| {
                p.line_spacing = 130;
                p.space_after = pt(2.0);
            }),
        ),
        horizontal_rule: StyleDef::new(body_font.clone(), body_para.clone()),
        body: StyleDef::new(body_font, body_para),
    }
}

fn minimal_styles() -> StyleSet {
    let body_font = FontSpec::new("나눔고딕", "Helvetica Neue", 10.0);
    let body_para = ParaSpec {
        align: ParaAlign::Left,
        line_spacing: 145,
        space_after: pt(3.0),
        ..ParaSpec::default()
    };
    let headings = HeadingScale {
        sizes: [18.0, 15.0, 12.5, 11.0, 10.5, 10.0],
        before: [12.0, 10.0, 8.0, 6.0, 4.0, 4.0],
        after: [6.0, 5.0, 4.0, 3.0, 3.0, 3.0],
    }
    .build(&body_font, &body_para);
    let (table_header, table_body) = table_styles(&body_font, &body_para, 9.0, 1.0);

    StyleSet {
        headings,
        code_block: StyleDef::new(
            code_font("Menlo", 9.0, Rgb::BLACK, Rgb(0xFA, 0xFA, 0xFA)),
            code_para(140, 3.0),
        ),
        inline_code: StyleDef::new(
            code_font("Menlo", 9.0, INLINE_CODE_COLOR, INLINE_CODE_SHADE),
            body_para.clone(),
        ),
        blockquote: StyleDef::new(
            body_font.derive(|f| {
                f.italic = true;
                f.color = Rgb(0x66, 0x66, 0x66);
            }),
            body_para.derive(|p| {
                p.left_margin = pt(14.0);
                p.space_before = pt(3.0);
                p.space_after = pt(3.0);
            }),
        ),
        table_header,
        table_body,
        list_item: StyleDef::new(
            body_font.clone(),
            body_para.derive(|p| {
                p.left_margin = pt(16.0);
                p.indent = pt(-8.0);
            }),
        ),
        footnote: StyleDef::new(
            body_font.derive(|f| f.size = pt(8.0)),
            body_para.derive(|p| {
                p.line_spacing = 130;
                p.space_after = pt(2.0);
            }),
        ),
        horizontal_rule: StyleDef::new(body_font.clone(), body_para.clone()),
        body: StyleDef::new(body_font, body_para),
    }
}

/// Style lookup for one preset
///
/// # Example
///
/// ```
/// use md2hwpx_hwpx::{StyleManager, StyleName};
///
/// let styles = StyleManager::new("academic")?;
/// let heading = styles.style(StyleName::heading(1));
/// assert!(heading.font.bold);
/// assert_eq!(styles.get_style("no_such_style"), styles.body());
/// # Ok::<(), md2hwpx_hwpx::HwpxError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleManager {
    preset: PresetName,
    styles: StyleSet,
}

impl Default for StyleManager {
    fn default() -> Self {
        Self::from_preset(PresetName::Default)
    }
}

impl StyleManager {
    /// Load a preset by name
    pub fn new(preset: &str) -> Result<Self, HwpxError> {
        Ok(Self::from_preset(preset.parse()?))
    }

    /// Load a preset
    pub fn from_preset(preset: PresetName) -> Self {
        let styles = match preset {
            PresetName::Default => default_styles(),
            PresetName::Academic => academic_styles(),
            PresetName::Business => business_styles(),
            PresetName::Minimal => minimal_styles(),
        };
        Self { preset, styles }
    }

    /// The preset this manager was built from
    pub fn preset(&self) -> PresetName {
        self.preset
    }

    /// Look up a style; heading levels outside 1..=6 are clamped
    pub fn style(&self, name: StyleName) -> &StyleDef {
        let s = &self.styles;
        match name {
            StyleName::Heading(level) => &s.headings[usize::from(level.clamp(1, 6)) - 1],
            StyleName::Body => &s.body,
            StyleName::CodeBlock => &s.code_block,
            StyleName::InlineCode => &s.inline_code,
            StyleName::Blockquote => &s.blockquote,
            StyleName::TableHeader => &s.table_header,
            StyleName::TableBody => &s.table_body,
            StyleName::ListItem => &s.list_item,
            StyleName::Footnote => &s.footnote,
            StyleName::HorizontalRule => &s.horizontal_rule,
        }
    }

    /// Look up a style by semantic name, falling back to `body`
    pub fn get_style(&self, name: &str) -> &StyleDef {
        StyleName::parse(name)
            .map(|style| self.style(style))
            .unwrap_or(&self.styles.body)
    }

    pub fn body(&self) -> &StyleDef {
        &self.styles.body
    }

    pub fn inline_code_font(&self) -> &FontSpec {
        &self.styles.inline_code.font
    }

    /// Sorted semantic names available in every preset
    pub fn style_names(&self) -> Vec<String> {
        let mut names: Vec<String> = StyleName::all().iter().map(ToString::to_string).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_roundtrip() {
        for name in PRESET_NAMES {
            let preset: PresetName = name.parse().unwrap();
            assert_eq!(preset.as_str(), name);
        }
        assert!("fancy".parse::<PresetName>().is_err());
    }

    #[test]
    fn test_unknown_preset_fails_construction() {
        let err = StyleManager::new("nonexistent").unwrap_err();
        assert!(err.to_string().contains("Unknown preset 'nonexistent'"));
    }

    #[test]
    fn test_default_body() {
        let styles = StyleManager::default();
        let body = styles.body();
        assert_eq!(body.font.hangul, "맑은 고딕");
        assert_eq!(body.font.latin, "Times New Roman");
        assert_eq!(body.font.size, HwpUnit(1000));
        assert_eq!(body.para.align, ParaAlign::Justify);
        assert_eq!(body.para.line_spacing, 160);
    }

    #[test]
    fn test_default_headings() {
        let styles = StyleManager::default();
        let h1 = styles.style(StyleName::heading(1));
        assert_eq!(h1.font.size, HwpUnit(2200));
        assert!(h1.font.bold);
        assert_eq!(h1.para.align, ParaAlign::Left);
        assert_eq!(h1.para.space_before, HwpUnit(1600));
        assert_eq!(h1.para.space_after, HwpUnit(1000));
        let h6 = styles.style(StyleName::heading(6));
        assert_eq!(h6.font.size, HwpUnit(1000));
    }

    #[test]
    fn test_heading_levels_clamped() {
        let styles = StyleManager::default();
        assert_eq!(styles.style(StyleName::heading(0)), styles.style(StyleName::Heading(1)));
        assert_eq!(styles.style(StyleName::Heading(9)), styles.style(StyleName::Heading(6)));
    }

    #[test]
    fn test_get_style_fallback_to_body() {
        let styles = StyleManager::default();
        assert_eq!(styles.get_style("unknown"), styles.body());
        assert_eq!(styles.get_style("heading_7"), styles.body());
        assert_eq!(styles.get_style("heading_2"), styles.style(StyleName::Heading(2)));
    }

    #[test]
    fn test_code_styles() {
        let styles = StyleManager::default();
        let code = styles.style(StyleName::CodeBlock);
        assert_eq!(code.font.latin, "Consolas");
        assert_eq!(code.font.background, Some(Rgb(0xF5, 0xF5, 0xF5)));
        assert_eq!(code.para.line_spacing, 150);
        assert_eq!(code.para.space_after, HwpUnit(400));
        let inline = styles.inline_code_font();
        assert_eq!(inline.color, Rgb(0x33, 0x33, 0x33));
    }

    #[test]
    fn test_academic_preset() {
        let styles = StyleManager::new("academic").unwrap();
        assert_eq!(styles.preset(), PresetName::Academic);
        assert_eq!(styles.body().font.hangul, "바탕");
        assert_eq!(styles.body().para.line_spacing, 200);
        assert_eq!(styles.style(StyleName::heading(1)).font.size, HwpUnit(2400));
        assert_eq!(styles.style(StyleName::CodeBlock).font.size, HwpUnit(950));
        assert_eq!(styles.style(StyleName::ListItem).para.indent, HwpUnit(-1200));
    }

    #[test]
    fn test_business_preset() {
        let styles = StyleManager::new("business").unwrap();
        assert_eq!(styles.body().font.latin, "Arial");
        assert_eq!(styles.body().para.align, ParaAlign::Left);
        assert_eq!(styles.style(StyleName::heading(5)).font.size, HwpUnit(1050));
        assert_eq!(
            styles.style(StyleName::Blockquote).font.color,
            Rgb(0x55, 0x55, 0x55)
        );
    }

    #[test]
    fn test_minimal_preset() {
        let minimal = StyleManager::new("minimal").unwrap();
        assert_eq!(minimal.body().font.hangul, "나눔고딕");
        assert_eq!(minimal.style(StyleName::heading(3)).font.size, HwpUnit(1250));
    }

    #[test]
    fn test_only_default_preset_has_own_rule_style() {
        let default = StyleManager::default();
        assert_eq!(default.style(StyleName::HorizontalRule).font.size, HwpUnit(200));
        assert_ne!(default.style(StyleName::HorizontalRule), default.body());
        for preset in [PresetName::Academic, PresetName::Business, PresetName::Minimal] {
            let styles = StyleManager::from_preset(preset);
            assert_eq!(styles.style(StyleName::HorizontalRule), styles.body(), "{preset}");
        }
    }

    #[test]
    fn test_style_name_parse_and_display() {
        for name in StyleName::all() {
            assert_eq!(StyleName::parse(&name.to_string()), Some(name));
        }
        assert_eq!(StyleName::parse("heading_0"), None);
        assert_eq!(StyleName::parse("Body"), None);
    }

    #[test]
    fn test_style_names_sorted() {
        let names = StyleManager::default().style_names();
        assert_eq!(names.len(), 15);
        assert_eq!(names.first().map(String::as_str), Some("blockquote"));
    }
}
