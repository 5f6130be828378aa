//! `Contents/section0.xml`: the document body
//!
//! One section holding a preamble paragraph that carries the page setup,
//! followed by every fragment in document order.

use crate::constants::{
    CONTENT_WIDTH, MARGIN_BOTTOM, MARGIN_FOOTER, MARGIN_HEADER, MARGIN_LEFT, MARGIN_RIGHT,
    MARGIN_TOP, NAMESPACES, PAGE_BORDER_FILL, PAGE_HEIGHT, PAGE_WIDTH, TABLE_BORDER_FILL,
};
use crate::error::Result;
use crate::fragment::{Fragment, Paragraph, Run, Table, TableCell, TableFragment};
use crate::xml::{Tag, XmlWriter};

const OUT_MARGIN: i32 = 283;
const CELL_MARGIN_H: i32 = 510;
const CELL_MARGIN_V: i32 = 141;

pub(crate) fn section_xml(fragments: &[Fragment]) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open(Tag::new("hs:sec").attrs(NAMESPACES))?;

    let last_id = fragments
        .iter()
        .map(Fragment::max_paragraph_id)
        .max()
        .unwrap_or(0);
    write_preamble(&mut xml, last_id + 1)?;

    if fragments.is_empty() {
        let blank = Paragraph {
            id: last_id + 2,
            para_pr: 0,
            runs: vec![Run {
                char_pr: 0,
                text: " ".to_string(),
            }],
        };
        write_paragraph(&mut xml, &blank)?;
    }
    for fragment in fragments {
        match fragment {
            Fragment::Paragraph(p) => write_paragraph(&mut xml, p)?,
            Fragment::Table(t) => write_table_fragment(&mut xml, t)?,
        }
    }

    xml.close("hs:sec")?;
    Ok(xml.into_bytes())
}

fn paragraph_tag<'a>(id: u32, para_pr: usize) -> Tag<'a> {
    Tag::new("hp:p")
        .attr("id", id)
        .attr("paraPrIDRef", para_pr)
        .attrs(&[
            ("styleIDRef", "0"),
            ("pageBreak", "0"),
            ("columnBreak", "0"),
            ("merged", "0"),
        ])
}

fn write_lineseg(xml: &mut XmlWriter) -> Result<()> {
    xml.open(Tag::new("hp:linesegarray"))?;
    xml.empty(
        Tag::new("hp:lineseg")
            .attrs(&[
                ("textpos", "0"),
                ("vertpos", "0"),
                ("vertsize", "1000"),
                ("textheight", "1000"),
                ("baseline", "850"),
                ("spacing", "600"),
                ("horzpos", "0"),
            ])
            .attr("horzsize", CONTENT_WIDTH)
            .attr("flags", 393_216),
    )?;
    xml.close("hp:linesegarray")
}

/// The first paragraph: section properties, column control and an empty run
fn write_preamble(xml: &mut XmlWriter, id: u32) -> Result<()> {
    xml.open(paragraph_tag(id, 0))?;
    xml.open(Tag::new("hp:run").attr("charPrIDRef", 0))?;

    xml.open(Tag::new("hp:secPr").attrs(&[
        ("id", ""),
        ("textDirection", "HORIZONTAL"),
        ("spaceColumns", "1134"),
        ("tabStop", "8000"),
        ("tabStopVal", "4000"),
        ("tabStopUnit", "HWPUNIT"),
        ("outlineShapeIDRef", "1"),
        ("memoShapeIDRef", "0"),
        ("textVerticalWidthHead", "0"),
        ("masterPageCnt", "0"),
    ]))?;
    xml.empty(Tag::new("hp:grid").attrs(&[
        ("lineGrid", "0"),
        ("charGrid", "0"),
        ("wonggojiFormat", "0"),
    ]))?;
    xml.empty(Tag::new("hp:startNum").attrs(&[
        ("pageStartsOn", "BOTH"),
        ("page", "0"),
        ("pic", "0"),
        ("tbl", "0"),
        ("equation", "0"),
    ]))?;
    xml.empty(Tag::new("hp:visibility").attrs(&[
        ("hideFirstHeader", "0"),
        ("hideFirstFooter", "0"),
        ("hideFirstMasterPage", "0"),
        ("border", "SHOW_ALL"),
        ("fill", "SHOW_ALL"),
        ("hideFirstPageNum", "0"),
        ("hideFirstEmptyLine", "0"),
        ("showLineNumber", "0"),
    ]))?;
    xml.empty(Tag::new("hp:lineNumberShape").attrs(&[
        ("restartType", "0"),
        ("countBy", "0"),
        ("distance", "0"),
        ("startNumber", "0"),
    ]))?;

    xml.open(
        Tag::new("hp:pagePr")
            .attr("landscape", "WIDELY")
            .attr("width", PAGE_WIDTH)
            .attr("height", PAGE_HEIGHT)
            .attr("gutterType", "LEFT_ONLY"),
    )?;
    xml.empty(
        Tag::new("hp:margin")
            .attr("header", MARGIN_HEADER)
            .attr("footer", MARGIN_FOOTER)
            .attr("gutter", 0)
            .attr("left", MARGIN_LEFT)
            .attr("right", MARGIN_RIGHT)
            .attr("top", MARGIN_TOP)
            .attr("bottom", MARGIN_BOTTOM),
    )?;
    xml.close("hp:pagePr")?;

    write_note_pr(xml, "hp:footNotePr", "-1", "283", "EACH_COLUMN")?;
    write_note_pr(xml, "hp:endNotePr", "14692344", "0", "END_OF_DOCUMENT")?;

    for kind in ["BOTH", "EVEN", "ODD"] {
        xml.open(
            Tag::new("hp:pageBorderFill")
                .attr("type", kind)
                .attr("borderFillIDRef", PAGE_BORDER_FILL)
                .attrs(&[
                    ("textBorder", "PAPER"),
                    ("headerInside", "0"),
                    ("footerInside", "0"),
                    ("fillArea", "PAPER"),
                ]),
        )?;
        xml.empty(Tag::new("hp:offset").attrs(&[
            ("left", "1417"),
            ("right", "1417"),
            ("top", "1417"),
            ("bottom", "1417"),
        ]))?;
        xml.close("hp:pageBorderFill")?;
    }
    xml.close("hp:secPr")?;

    xml.open(Tag::new("hp:ctrl"))?;
    xml.empty(Tag::new("hp:colPr").attrs(&[
        ("id", ""),
        ("type", "NEWSPAPER"),
        ("layout", "LEFT"),
        ("colCount", "1"),
        ("sameSz", "1"),
        ("sameGap", "0"),
    ]))?;
    xml.close("hp:ctrl")?;
    xml.close("hp:run")?;

    xml.open(Tag::new("hp:run").attr("charPrIDRef", 0))?;
    xml.empty(Tag::new("hp:t"))?;
    xml.close("hp:run")?;

    write_lineseg(xml)?;
    xml.close("hp:p")
}

/// Footnote or endnote numbering and separator line
fn write_note_pr(
    xml: &mut XmlWriter,
    name: &str,
    line_length: &str,
    between_notes: &str,
    place: &str,
) -> Result<()> {
    xml.open(Tag::new(name))?;
    xml.empty(Tag::new("hp:autoNumFormat").attrs(&[
        ("type", "DIGIT"),
        ("userChar", ""),
        ("prefixChar", ""),
        ("suffixChar", ")"),
        ("supscript", "0"),
    ]))?;
    xml.empty(Tag::new("hp:noteLine").attrs(&[
        ("length", line_length),
        ("type", "SOLID"),
        ("width", "0.12 mm"),
        ("color", "#000000"),
    ]))?;
    xml.empty(Tag::new("hp:noteSpacing").attrs(&[
        ("betweenNotes", between_notes),
        ("belowLine", "567"),
        ("aboveLine", "850"),
    ]))?;
    xml.empty(Tag::new("hp:numbering").attrs(&[("type", "CONTINUOUS"), ("newNum", "1")]))?;
    xml.empty(Tag::new("hp:placement").attrs(&[("place", place), ("beneathText", "0")]))?;
    xml.close(name)
}

fn write_paragraph(xml: &mut XmlWriter, paragraph: &Paragraph) -> Result<()> {
    xml.open(paragraph_tag(paragraph.id, paragraph.para_pr))?;
    if paragraph.runs.is_empty() {
        xml.open(Tag::new("hp:run").attr("charPrIDRef", 0))?;
        xml.empty(Tag::new("hp:t"))?;
        xml.close("hp:run")?;
    }
    for run in &paragraph.runs {
        xml.open(Tag::new("hp:run").attr("charPrIDRef", run.char_pr))?;
        xml.leaf(Tag::new("hp:t"), &run.text)?;
        xml.close("hp:run")?;
    }
    xml.close("hp:p")
}

fn write_table_fragment(xml: &mut XmlWriter, fragment: &TableFragment) -> Result<()> {
    xml.open(paragraph_tag(fragment.id, fragment.para_pr))?;
    xml.open(Tag::new("hp:run").attr("charPrIDRef", fragment.char_pr))?;
    write_table(xml, &fragment.table)?;
    xml.leaf(Tag::new("hp:t"), " ")?;
    xml.close("hp:run")?;
    write_lineseg(xml)?;
    xml.close("hp:p")
}

fn write_table(xml: &mut XmlWriter, table: &Table) -> Result<()> {
    xml.open(
        Tag::new("hp:tbl")
            .attr("id", table.id)
            .attrs(&[
                ("zOrder", "0"),
                ("numberingType", "TABLE"),
                ("textWrap", "TOP_AND_BOTTOM"),
                ("textFlow", "BOTH_SIDES"),
                ("lock", "0"),
                ("dropcapstyle", "None"),
                ("pageBreak", "CELL"),
                ("repeatHeader", "1"),
            ])
            .attr("rowCnt", table.row_count)
            .attr("colCnt", table.col_count)
            .attr("cellSpacing", 0)
            .attr("borderFillIDRef", TABLE_BORDER_FILL)
            .attr("noAdjust", 0),
    )?;
    xml.empty(
        Tag::new("hp:sz")
            .attr("width", table.width)
            .attr("widthRelTo", "ABSOLUTE")
            .attr("height", table.height)
            .attrs(&[("heightRelTo", "ABSOLUTE"), ("protect", "0")]),
    )?;
    xml.empty(Tag::new("hp:pos").attrs(&[
        ("treatAsChar", "0"),
        ("affectLSpacing", "0"),
        ("flowWithText", "1"),
        ("allowOverlap", "0"),
        ("holdAnchorAndSO", "0"),
        ("vertRelTo", "PARA"),
        ("horzRelTo", "COLUMN"),
        ("vertAlign", "TOP"),
        ("horzAlign", "LEFT"),
        ("vertOffset", "0"),
        ("horzOffset", "0"),
    ]))?;
    xml.empty(margin_tag("hp:outMargin", OUT_MARGIN, OUT_MARGIN))?;
    xml.empty(margin_tag("hp:inMargin", CELL_MARGIN_H, CELL_MARGIN_V))?;

    for row in &table.rows {
        xml.open(Tag::new("hp:tr"))?;
        for cell in row {
            write_cell(xml, cell)?;
        }
        xml.close("hp:tr")?;
    }
    xml.close("hp:tbl")
}

fn margin_tag(name: &str, horizontal: i32, vertical: i32) -> Tag<'_> {
    Tag::new(name)
        .attr("left", horizontal)
        .attr("right", horizontal)
        .attr("top", vertical)
        .attr("bottom", vertical)
}

fn write_cell(xml: &mut XmlWriter, cell: &TableCell) -> Result<()> {
    xml.open(
        Tag::new("hp:tc")
            .attr("name", "")
            .attr("header", u8::from(cell.header))
            .attrs(&[
                ("hasMargin", "0"),
                ("protect", "0"),
                ("editable", "0"),
                ("dirty", "0"),
            ])
            .attr("borderFillIDRef", TABLE_BORDER_FILL),
    )?;
    xml.open(Tag::new("hp:subList").attrs(&[
        ("id", ""),
        ("textDirection", "HORIZONTAL"),
        ("lineWrap", "BREAK"),
        ("vertAlign", "CENTER"),
        ("linkListIDRef", "0"),
        ("linkListNextIDRef", "0"),
        ("textWidth", "0"),
        ("textHeight", "0"),
        ("hasTextRef", "0"),
        ("hasNumRef", "0"),
    ]))?;
    write_paragraph(xml, &cell.paragraph)?;
    xml.close("hp:subList")?;
    xml.empty(
        Tag::new("hp:cellAddr")
            .attr("colAddr", cell.col)
            .attr("rowAddr", cell.row),
    )?;
    xml.empty(Tag::new("hp:cellSpan").attrs(&[("colSpan", "1"), ("rowSpan", "1")]))?;
    xml.empty(
        Tag::new("hp:cellSz")
            .attr("width", cell.width)
            .attr("height", cell.height),
    )?;
    xml.empty(margin_tag("hp:cellMargin", CELL_MARGIN_H, CELL_MARGIN_V))?;
    xml.close("hp:tc")
}
