//! Style registry
//!
//! Deduplicates character and paragraph formatting seen during one render and
//! hands out dense IDs in first-seen order. The position of an entry in
//! [`StyleRegistry::character_styles`] or [`StyleRegistry::paragraph_styles`]
//! is the ID the content part refers to.

use std::collections::HashMap;

use crate::style::{FontSpec, ParaSpec};

/// Per-render table of fonts, character properties and paragraph properties
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    fonts: Vec<String>,
    font_ids: HashMap<String, usize>,
    chars: Vec<FontSpec>,
    char_ids: HashMap<FontSpec, usize>,
    paras: Vec<ParaSpec>,
    para_ids: HashMap<ParaSpec, usize>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font face name, returning its index
    pub fn register_font_name(&mut self, name: &str) -> usize {
        if let Some(&id) = self.font_ids.get(name) {
            return id;
        }
        let id = self.fonts.len();
        self.fonts.push(name.to_string());
        self.font_ids.insert(name.to_string(), id);
        id
    }

    /// Register character formatting (and both of its face names)
    pub fn register_character_style(&mut self, font: &FontSpec) -> usize {
        if let Some(&id) = self.char_ids.get(font) {
            return id;
        }
        self.register_font_name(&font.hangul);
        self.register_font_name(&font.latin);
        let id = self.chars.len();
        self.chars.push(font.clone());
        self.char_ids.insert(font.clone(), id);
        id
    }

    /// Register paragraph formatting
    pub fn register_paragraph_style(&mut self, para: &ParaSpec) -> usize {
        if let Some(&id) = self.para_ids.get(para) {
            return id;
        }
        let id = self.paras.len();
        self.paras.push(para.clone());
        self.para_ids.insert(para.clone(), id);
        id
    }

    /// Font face names in index order
    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    /// Character properties in ID order
    pub fn character_styles(&self) -> &[FontSpec] {
        &self.chars
    }

    /// Paragraph properties in ID order
    pub fn paragraph_styles(&self) -> &[ParaSpec] {
        &self.paras
    }

    /// Index of a registered font face, 0 when unknown
    pub fn font_index(&self, name: &str) -> usize {
        self.font_ids.get(name).copied().unwrap_or(0)
    }

    /// Whether nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.paras.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{HwpUnit, ParaAlign, Rgb};

    #[test]
    fn test_ids_are_dense_in_first_seen_order() {
        let mut registry = StyleRegistry::new();
        let body = FontSpec::default();
        let bold = body.derive(|f| f.bold = true);
        let italic = body.derive(|f| f.italic = true);

        assert_eq!(registry.register_character_style(&body), 0);
        assert_eq!(registry.register_character_style(&bold), 1);
        assert_eq!(registry.register_character_style(&italic), 2);
        assert_eq!(registry.character_styles(), &[body, bold, italic]);
    }

    #[test]
    fn test_equal_specs_share_an_id() {
        let mut registry = StyleRegistry::new();
        let link = FontSpec::default().derive(|f| {
            f.underline = true;
            f.color = Rgb(0x05, 0x63, 0xC1);
        });
        let first = registry.register_character_style(&link);
        let again = registry.register_character_style(&link.derive(|_| {}));
        assert_eq!(first, again);
        assert_eq!(registry.character_styles().len(), 1);
    }

    #[test]
    fn test_char_registration_registers_font_names() {
        let mut registry = StyleRegistry::new();
        registry.register_character_style(&FontSpec::new("바탕", "Arial", 10.0));
        registry.register_character_style(&FontSpec::new("D2Coding", "Arial", 9.0));
        assert_eq!(registry.fonts(), &["바탕", "Arial", "D2Coding"]);
        assert_eq!(registry.font_index("Arial"), 1);
        assert_eq!(registry.font_index("D2Coding"), 2);
        assert_eq!(registry.font_index("missing"), 0);
    }

    #[test]
    fn test_paragraph_dedup() {
        let mut registry = StyleRegistry::new();
        let body = ParaSpec::default();
        let centered = body.derive(|p| p.align = ParaAlign::Center);
        let indented = body.derive(|p| p.left_margin = HwpUnit::from_pt(20.0));

        assert_eq!(registry.register_paragraph_style(&body), 0);
        assert_eq!(registry.register_paragraph_style(&centered), 1);
        assert_eq!(registry.register_paragraph_style(&body), 0);
        assert_eq!(registry.register_paragraph_style(&indented), 2);
        assert_eq!(registry.paragraph_styles().len(), 3);
    }

    #[test]
    fn test_font_names_register_once() {
        let mut registry = StyleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.register_font_name("맑은 고딕"), 0);
        assert_eq!(registry.register_font_name("맑은 고딕"), 0);
        assert_eq!(registry.fonts().len(), 1);
        assert!(registry.is_empty());
    }
}
