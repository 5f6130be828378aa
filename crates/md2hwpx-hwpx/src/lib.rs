//! # md2hwpx-hwpx
//!
//! HWPX (Hancom OWPML) output for md2hwpx document trees.
//!
//! Rendering happens in two stages. [`HwpxRenderer`] walks a document and
//! turns every block into [`Fragment`]s whose formatting is interned in a
//! [`StyleRegistry`]; [`package`] then serializes the registry as the style
//! dictionary, the fragments as the section body, and zips both together
//! with the fixed package parts.
//!
//! ## Example
//!
//! ```
//! use md2hwpx_ast::{Document, Node};
//! use md2hwpx_hwpx::{HwpxRenderer, StyleManager};
//!
//! let mut doc = Document::new();
//! doc.push(Node::heading(1, "보고서"));
//! doc.push(Node::paragraph("본문"));
//!
//! let renderer = HwpxRenderer::new(StyleManager::new("business")?);
//! let bytes = renderer.render(&doc)?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), md2hwpx_hwpx::HwpxError>(())
//! ```

pub mod error;
pub mod fragment;
mod header;
pub mod package;
pub mod preset;
pub mod registry;
pub mod render;
mod section;
pub mod style;
pub mod table;
mod xml;

// Re-exports
pub use error::{HwpxError, Result};
pub use fragment::{Fragment, Paragraph, Run, Table, TableCell, TableFragment};
pub use package::package;
pub use preset::{PresetName, StyleManager, StyleName, PRESET_NAMES};
pub use registry::StyleRegistry;
pub use render::{HwpxRenderer, RenderOutput, Span};
pub use style::{FontSpec, HwpUnit, ParaAlign, ParaSpec, Rgb, StyleDef};
pub use table::column_widths;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// HWPX-related constants
pub mod constants {
    /// Content of the `mimetype` entry
    pub const MIMETYPE: &str = "application/hwp+zip";

    /// A4 page width in HWPUNIT
    pub const PAGE_WIDTH: i32 = 59_528;

    /// A4 page height in HWPUNIT
    pub const PAGE_HEIGHT: i32 = 84_186;

    /// Left page margin (30 mm)
    pub const MARGIN_LEFT: i32 = 8_504;

    /// Right page margin (30 mm)
    pub const MARGIN_RIGHT: i32 = 8_504;

    /// Top page margin (20 mm)
    pub const MARGIN_TOP: i32 = 5_668;

    /// Bottom page margin (15 mm)
    pub const MARGIN_BOTTOM: i32 = 4_252;

    /// Header area height (15 mm)
    pub const MARGIN_HEADER: i32 = 4_252;

    /// Footer area height (15 mm)
    pub const MARGIN_FOOTER: i32 = 4_252;

    /// Width available to text between the left and right margins
    pub const CONTENT_WIDTH: i32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

    /// Fixed height of every table row
    pub const TABLE_ROW_HEIGHT: i32 = 2_886;

    /// Added to the preceding paragraph ID to form a table's object ID
    pub const TABLE_ID_OFFSET: u32 = 1_000;

    /// Left indent added per list nesting level, in points
    pub const LIST_INDENT_PER_DEPTH_PT: f64 = 20.0;

    /// Bullet glyphs by nesting depth; deeper levels reuse the last one
    pub const BULLETS: [&str; 3] = ["\u{2022}", "\u{25e6}", "\u{25aa}"];

    /// Maximum number of lines written to the preview part
    pub const PREVIEW_LINE_LIMIT: usize = 50;

    /// Border fill referenced by the page border
    pub const PAGE_BORDER_FILL: u32 = 1;

    /// Border fill referenced by character and paragraph properties
    pub const TEXT_BORDER_FILL: u32 = 2;

    /// Border fill with solid borders, used by tables and their cells
    pub const TABLE_BORDER_FILL: u32 = 3;

    // Part names, in archive order
    pub const PART_MIMETYPE: &str = "mimetype";
    pub const PART_VERSION: &str = "version.xml";
    pub const PART_CONTAINER: &str = "META-INF/container.xml";
    pub const PART_CONTAINER_RDF: &str = "META-INF/container.rdf";
    pub const PART_SETTINGS: &str = "settings.xml";
    pub const PART_MANIFEST: &str = "META-INF/manifest.xml";
    pub const PART_CONTENT_HPF: &str = "Contents/content.hpf";
    pub const PART_HEADER: &str = "Contents/header.xml";
    pub const PART_SECTION: &str = "Contents/section0.xml";
    pub const PART_PREVIEW: &str = "Preview/PrvText.txt";

    /// Every part name in the order the packager writes them
    pub const PART_ORDER: [&str; 10] = [
        PART_MIMETYPE,
        PART_VERSION,
        PART_CONTAINER,
        PART_CONTAINER_RDF,
        PART_SETTINGS,
        PART_MANIFEST,
        PART_CONTENT_HPF,
        PART_HEADER,
        PART_SECTION,
        PART_PREVIEW,
    ];

    /// OWPML paragraph namespace
    pub const NS_PARAGRAPH: &str = "http://www.hancom.co.kr/hwpml/2011/paragraph";

    /// OWPML head namespace
    pub const NS_HEAD: &str = "http://www.hancom.co.kr/hwpml/2011/head";

    /// OWPML section namespace
    pub const NS_SECTION: &str = "http://www.hancom.co.kr/hwpml/2011/section";

    /// Namespace that guards HWPUNIT-based paragraph metrics
    pub const NS_HWPUNITCHAR: &str = "http://www.hancom.co.kr/hwpml/2016/HwpUnitChar";

    /// Package metadata vocabulary used by `container.rdf`
    pub const NS_PKG_META: &str = "http://www.hancom.co.kr/hwpml/2016/meta/pkg#";

    /// Namespace declarations carried by the package, header and section roots
    pub const NAMESPACES: &[(&str, &str)] = &[
        ("xmlns:ha", "http://www.hancom.co.kr/hwpml/2011/app"),
        ("xmlns:hp", NS_PARAGRAPH),
        ("xmlns:hp10", "http://www.hancom.co.kr/hwpml/2016/paragraph"),
        ("xmlns:hs", NS_SECTION),
        ("xmlns:hc", "http://www.hancom.co.kr/hwpml/2011/core"),
        ("xmlns:hh", NS_HEAD),
        ("xmlns:hhs", "http://www.hancom.co.kr/hwpml/2011/history"),
        ("xmlns:hm", "http://www.hancom.co.kr/hwpml/2011/master-page"),
        ("xmlns:hpf", "http://www.hancom.co.kr/schema/2011/hpf"),
        ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
        ("xmlns:opf", "http://www.idpf.org/2007/opf/"),
        ("xmlns:ooxmlchart", "http://www.hancom.co.kr/hwpml/2016/ooxmlchart"),
        ("xmlns:hwpunitchar", NS_HWPUNITCHAR),
        ("xmlns:epub", "http://www.idpf.org/2007/ops"),
        ("xmlns:config", "urn:oasis:names:tc:opendocument:xmlns:config:1.0"),
    ];
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_content_width_is_page_minus_margins() {
        assert_eq!(CONTENT_WIDTH, 42_520);
        assert_eq!(CONTENT_WIDTH, 59_528 - 2 * 8_504);
    }

    #[test]
    fn test_part_order_starts_with_mimetype() {
        assert_eq!(PART_ORDER[0], "mimetype");
        assert_eq!(PART_ORDER.last(), Some(&"Preview/PrvText.txt"));
        let mut names = PART_ORDER.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PART_ORDER.len());
    }

    #[test]
    fn test_namespace_prefixes_are_unique() {
        let mut prefixes: Vec<_> = NAMESPACES.iter().map(|(prefix, _)| *prefix).collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), NAMESPACES.len());
        assert!(NAMESPACES.iter().all(|(prefix, _)| prefix.starts_with("xmlns:")));
    }
}
