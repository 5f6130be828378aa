//! `Contents/header.xml`: the style dictionary
//!
//! Serializes the registry into font faces, character properties and
//! paragraph properties, framed by the fixed border fills, tab stops,
//! numbering and default style every HWPX header carries. List position is
//! the ID: entry `n` of each list is written with `id="n"`.

use crate::constants::{NAMESPACES, NS_HWPUNITCHAR, PAGE_BORDER_FILL, TABLE_BORDER_FILL, TEXT_BORDER_FILL};
use crate::error::Result;
use crate::registry::StyleRegistry;
use crate::style::{FontSpec, ParaSpec};
use crate::xml::{Tag, XmlWriter};

const LANGS: [&str; 7] = ["HANGUL", "LATIN", "HANJA", "JAPANESE", "OTHER", "SYMBOL", "USER"];
const SCRIPT_ATTRS: [&str; 7] = ["hangul", "latin", "hanja", "japanese", "other", "symbol", "user"];

pub(crate) fn header_xml(registry: &StyleRegistry) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open(
        Tag::new("hh:head")
            .attrs(NAMESPACES)
            .attrs(&[("version", "1.5"), ("secCnt", "1")]),
    )?;
    xml.empty(Tag::new("hh:beginNum").attrs(&[
        ("page", "1"),
        ("footnote", "1"),
        ("endnote", "1"),
        ("pic", "1"),
        ("tbl", "1"),
        ("equation", "1"),
    ]))?;

    xml.open(Tag::new("hh:refList"))?;
    write_fontfaces(&mut xml, registry.fonts())?;
    write_border_fills(&mut xml)?;
    write_char_properties(&mut xml, registry)?;
    write_tab_properties(&mut xml)?;
    write_numberings(&mut xml)?;
    write_para_properties(&mut xml, registry.paragraph_styles())?;
    write_styles(&mut xml)?;
    xml.close("hh:refList")?;

    xml.open(Tag::new("hh:compatibleDocument").attr("targetProgram", "HWP201X"))?;
    xml.empty(Tag::new("hh:layoutCompatibility"))?;
    xml.close("hh:compatibleDocument")?;

    xml.open(Tag::new("hh:docOption"))?;
    xml.empty(Tag::new("hh:linkinfo").attrs(&[
        ("path", ""),
        ("pageInherit", "0"),
        ("footnoteInherit", "0"),
    ]))?;
    xml.close("hh:docOption")?;

    xml.leaf(Tag::new("hh:metaTag"), r#"{"name":""}"#)?;
    xml.empty(Tag::new("hh:trackchageConfig").attr("flags", 56))?;
    xml.close("hh:head")?;
    Ok(xml.into_bytes())
}

fn write_fontfaces(xml: &mut XmlWriter, fonts: &[String]) -> Result<()> {
    xml.open(Tag::new("hh:fontfaces").attr("itemCnt", LANGS.len()))?;
    for lang in LANGS {
        xml.open(
            Tag::new("hh:fontface")
                .attr("lang", lang)
                .attr("fontCnt", fonts.len()),
        )?;
        for (id, face) in fonts.iter().enumerate() {
            xml.open(
                Tag::new("hh:font")
                    .attr("id", id)
                    .attr("face", face)
                    .attrs(&[("type", "TTF"), ("isEmbedded", "0")]),
            )?;
            xml.empty(Tag::new("hh:typeInfo").attrs(&[
                ("familyType", "FCAT_GOTHIC"),
                ("weight", "6"),
                ("proportion", "4"),
                ("contrast", "0"),
                ("strokeVariation", "1"),
                ("armStyle", "1"),
                ("letterform", "1"),
                ("midline", "1"),
                ("xHeight", "1"),
            ]))?;
            xml.close("hh:font")?;
        }
        xml.close("hh:fontface")?;
    }
    xml.close("hh:fontfaces")
}

fn write_border_fill(xml: &mut XmlWriter, id: u32, border: (&str, &str), fill: bool) -> Result<()> {
    let (kind, width) = border;
    xml.open(Tag::new("hh:borderFill").attr("id", id).attrs(&[
        ("threeD", "0"),
        ("shadow", "0"),
        ("centerLine", "NONE"),
        ("breakCellSeparateLine", "0"),
    ]))?;
    for name in ["hh:slash", "hh:backSlash"] {
        xml.empty(Tag::new(name).attrs(&[("type", "NONE"), ("Crooked", "0"), ("isCounter", "0")]))?;
    }
    for name in ["hh:leftBorder", "hh:rightBorder", "hh:topBorder", "hh:bottomBorder"] {
        xml.empty(Tag::new(name).attrs(&[("type", kind), ("width", width), ("color", "#000000")]))?;
    }
    xml.empty(Tag::new("hh:diagonal").attrs(&[
        ("type", "SOLID"),
        ("width", "0.1 mm"),
        ("color", "#000000"),
    ]))?;
    if fill {
        xml.open(Tag::new("hc:fillBrush"))?;
        xml.empty(Tag::new("hc:winBrush").attrs(&[
            ("faceColor", "none"),
            ("hatchColor", "#999999"),
            ("alpha", "0"),
        ]))?;
        xml.close("hc:fillBrush")?;
    }
    xml.close("hh:borderFill")
}

fn write_border_fills(xml: &mut XmlWriter) -> Result<()> {
    xml.open(Tag::new("hh:borderFills").attr("itemCnt", 3))?;
    write_border_fill(xml, PAGE_BORDER_FILL, ("NONE", "0.1 mm"), false)?;
    write_border_fill(xml, TEXT_BORDER_FILL, ("NONE", "0.1 mm"), true)?;
    write_border_fill(xml, TABLE_BORDER_FILL, ("SOLID", "0.12 mm"), false)?;
    xml.close("hh:borderFills")
}

/// An element with the same value for all seven scripts
fn per_script<'a>(name: &'a str, value: &str) -> Tag<'a> {
    SCRIPT_ATTRS
        .iter()
        .fold(Tag::new(name), |tag, script| tag.attr(script, value))
}

fn write_char_pr(xml: &mut XmlWriter, id: usize, font: &FontSpec, registry: &StyleRegistry) -> Result<()> {
    let shade = font
        .background
        .map_or_else(|| "none".to_string(), |color| color.to_string());
    xml.open(
        Tag::new("hh:charPr")
            .attr("id", id)
            .attr("height", font.size)
            .attr("textColor", font.color)
            .attr("shadeColor", shade)
            .attrs(&[("useFontSpace", "0"), ("useKerning", "0"), ("symMark", "NONE")])
            .attr("borderFillIDRef", TEXT_BORDER_FILL),
    )?;

    let hangul = registry.font_index(&font.hangul);
    let latin = registry.font_index(&font.latin);
    xml.empty(
        Tag::new("hh:fontRef")
            .attr("hangul", hangul)
            .attr("latin", latin)
            .attr("hanja", hangul)
            .attr("japanese", hangul)
            .attr("other", latin)
            .attr("symbol", latin)
            .attr("user", latin),
    )?;
    if font.bold {
        xml.empty(Tag::new("hh:bold"))?;
    }
    if font.italic {
        xml.empty(Tag::new("hh:italic"))?;
    }
    xml.empty(per_script("hh:ratio", "100"))?;
    xml.empty(per_script("hh:spacing", "0"))?;
    xml.empty(per_script("hh:relSz", "100"))?;
    xml.empty(per_script("hh:offset", "0"))?;

    let underline = if font.underline { "BOTTOM" } else { "NONE" };
    xml.empty(Tag::new("hh:underline").attrs(&[
        ("type", underline),
        ("shape", "SOLID"),
        ("color", "#000000"),
    ]))?;
    let strikeout = if font.strikethrough { "SINGLE" } else { "NONE" };
    xml.empty(Tag::new("hh:strikeout").attrs(&[("shape", strikeout), ("color", "#000000")]))?;
    xml.empty(Tag::new("hh:outline").attr("type", "NONE"))?;
    xml.empty(Tag::new("hh:shadow").attrs(&[
        ("type", "NONE"),
        ("color", "#C0C0C0"),
        ("offsetX", "10"),
        ("offsetY", "10"),
    ]))?;
    xml.close("hh:charPr")
}

fn write_char_properties(xml: &mut XmlWriter, registry: &StyleRegistry) -> Result<()> {
    let chars = registry.character_styles();
    xml.open(Tag::new("hh:charProperties").attr("itemCnt", chars.len()))?;
    for (id, font) in chars.iter().enumerate() {
        write_char_pr(xml, id, font, registry)?;
    }
    xml.close("hh:charProperties")
}

fn write_tab_properties(xml: &mut XmlWriter) -> Result<()> {
    xml.open(Tag::new("hh:tabProperties").attr("itemCnt", 1))?;
    xml.empty(Tag::new("hh:tabPr").attrs(&[("id", "0"), ("autoTabLeft", "0"), ("autoTabRight", "0")]))?;
    xml.close("hh:tabProperties")
}

fn write_numberings(xml: &mut XmlWriter) -> Result<()> {
    xml.open(Tag::new("hh:numberings").attr("itemCnt", 1))?;
    xml.open(Tag::new("hh:numbering").attrs(&[("id", "1"), ("start", "0")]))?;
    xml.leaf(
        Tag::new("hh:paraHead").attrs(&[
            ("start", "1"),
            ("level", "1"),
            ("align", "LEFT"),
            ("useInstWidth", "1"),
            ("autoIndent", "1"),
            ("widthAdjust", "0"),
            ("textOffsetType", "PERCENT"),
            ("textOffset", "50"),
            ("numFormat", "DIGIT"),
            ("charPrIDRef", "4294967295"),
            ("checkable", "0"),
        ]),
        "^1.",
    )?;
    xml.close("hh:numbering")?;
    xml.close("hh:numberings")
}

/// Margins and line spacing; written twice inside `hp:switch`
fn write_para_metrics(xml: &mut XmlWriter, para: &ParaSpec) -> Result<()> {
    xml.open(Tag::new("hh:margin"))?;
    for (name, value) in [
        ("hc:intent", para.indent),
        ("hc:left", para.left_margin),
        ("hc:right", para.right_margin),
        ("hc:prev", para.space_before),
        ("hc:next", para.space_after),
    ] {
        xml.empty(Tag::new(name).attr("value", value).attr("unit", "HWPUNIT"))?;
    }
    xml.close("hh:margin")?;
    xml.empty(
        Tag::new("hh:lineSpacing")
            .attr("type", "PERCENT")
            .attr("value", para.line_spacing)
            .attr("unit", "HWPUNIT"),
    )
}

fn write_para_pr(xml: &mut XmlWriter, id: usize, para: &ParaSpec) -> Result<()> {
    xml.open(Tag::new("hh:paraPr").attr("id", id).attrs(&[
        ("tabPrIDRef", "0"),
        ("condense", "0"),
        ("fontLineHeight", "0"),
        ("snapToGrid", "1"),
        ("suppressLineNumbers", "0"),
        ("checked", "0"),
        ("textDir", "LTR"),
    ]))?;
    xml.empty(
        Tag::new("hh:align")
            .attr("horizontal", para.align.as_owpml())
            .attr("vertical", "BASELINE"),
    )?;
    xml.empty(Tag::new("hh:heading").attrs(&[("type", "NONE"), ("idRef", "0"), ("level", "0")]))?;
    xml.empty(Tag::new("hh:breakSetting").attrs(&[
        ("breakLatinWord", "KEEP_WORD"),
        ("breakNonLatinWord", "BREAK_WORD"),
        ("widowOrphan", "0"),
        ("keepWithNext", "0"),
        ("keepLines", "0"),
        ("pageBreakBefore", "0"),
        ("lineWrap", "BREAK"),
    ]))?;
    xml.empty(Tag::new("hh:autoSpacing").attrs(&[("eAsianEng", "0"), ("eAsianNum", "0")]))?;

    xml.open(Tag::new("hp:switch"))?;
    xml.open(Tag::new("hp:case").attr("hp:required-namespace", NS_HWPUNITCHAR))?;
    write_para_metrics(xml, para)?;
    xml.close("hp:case")?;
    xml.open(Tag::new("hp:default"))?;
    write_para_metrics(xml, para)?;
    xml.close("hp:default")?;
    xml.close("hp:switch")?;

    xml.empty(
        Tag::new("hh:border")
            .attr("borderFillIDRef", TEXT_BORDER_FILL)
            .attrs(&[
                ("offsetLeft", "0"),
                ("offsetRight", "0"),
                ("offsetTop", "0"),
                ("offsetBottom", "0"),
                ("connect", "0"),
                ("ignoreMargin", "0"),
            ]),
    )?;
    xml.close("hh:paraPr")
}

fn write_para_properties(xml: &mut XmlWriter, paras: &[ParaSpec]) -> Result<()> {
    xml.open(Tag::new("hh:paraProperties").attr("itemCnt", paras.len()))?;
    for (id, para) in paras.iter().enumerate() {
        write_para_pr(xml, id, para)?;
    }
    xml.close("hh:paraProperties")
}

fn write_styles(xml: &mut XmlWriter) -> Result<()> {
    xml.open(Tag::new("hh:styles").attr("itemCnt", 1))?;
    xml.empty(Tag::new("hh:style").attrs(&[
        ("id", "0"),
        ("type", "PARA"),
        ("name", "바탕글"),
        ("engName", "Normal"),
        ("paraPrIDRef", "0"),
        ("charPrIDRef", "0"),
        ("nextStyleIDRef", "0"),
        ("langID", "1042"),
        ("lockForm", "0"),
    ]))?;
    xml.close("hh:styles")
}
