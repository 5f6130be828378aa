//! HWPX archive packaging
//!
//! [`package`] zips rendered fragments and their style registry into an
//! HWPX container. The `mimetype` entry comes first and is stored; every
//! other part is deflated. Entry timestamps are pinned, so the same input
//! always yields the same bytes.

use std::borrow::Cow;
use std::io::{Cursor, Seek, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::constants::{
    MIMETYPE, NAMESPACES, NS_PKG_META, PART_CONTAINER, PART_CONTAINER_RDF, PART_CONTENT_HPF,
    PART_HEADER, PART_MANIFEST, PART_MIMETYPE, PART_PREVIEW, PART_SECTION, PART_SETTINGS,
    PART_VERSION, PREVIEW_LINE_LIMIT,
};
use crate::error::{HwpxError, Result};
use crate::fragment::Fragment;
use crate::header::header_xml;
use crate::registry::StyleRegistry;
use crate::section::section_xml;
use crate::style::{FontSpec, ParaSpec};
use crate::xml::{Tag, XmlWriter};

/// Build a complete HWPX archive
///
/// Character and paragraph property 0 are referenced by the section
/// preamble, so an empty registry is packaged with default formatting in
/// those slots. Every ID used by `fragments` must exist in `registry`.
///
/// ```
/// use md2hwpx_hwpx::{package, StyleRegistry};
///
/// let bytes = package(&[], &StyleRegistry::new(), &[])?;
/// assert_eq!(&bytes[30..38], b"mimetype");
/// # Ok::<(), md2hwpx_hwpx::HwpxError>(())
/// ```
pub fn package(
    fragments: &[Fragment],
    registry: &StyleRegistry,
    preview_lines: &[String],
) -> Result<Vec<u8>> {
    let registry = with_default_styles(registry);
    let registry = registry.as_ref();
    check_references(fragments, registry)?;

    let header = header_xml(registry)?;
    let section = section_xml(fragments)?;
    let preview = preview_text(preview_lines);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    write_mimetype(&mut zip, options)?;
    write_part(&mut zip, options, PART_VERSION, &version_xml()?)?;
    write_part(&mut zip, options, PART_CONTAINER, &container_xml()?)?;
    write_part(&mut zip, options, PART_CONTAINER_RDF, &container_rdf()?)?;
    write_part(&mut zip, options, PART_SETTINGS, &settings_xml()?)?;
    write_part(&mut zip, options, PART_MANIFEST, &manifest_xml()?)?;
    write_part(&mut zip, options, PART_CONTENT_HPF, &content_hpf()?)?;
    write_part(&mut zip, options, PART_HEADER, &header)?;
    write_part(&mut zip, options, PART_SECTION, &section)?;
    write_part(&mut zip, options, PART_PREVIEW, preview.as_bytes())?;

    let bytes = zip.finish()?.into_inner();
    debug!(
        fragments = fragments.len(),
        char_styles = registry.character_styles().len(),
        para_styles = registry.paragraph_styles().len(),
        preview_lines = preview_lines.len().min(PREVIEW_LINE_LIMIT),
        bytes = bytes.len(),
        "packaged HWPX archive"
    );
    Ok(bytes)
}

fn with_default_styles(registry: &StyleRegistry) -> Cow<'_, StyleRegistry> {
    if !registry.character_styles().is_empty() && !registry.paragraph_styles().is_empty() {
        return Cow::Borrowed(registry);
    }
    let mut filled = registry.clone();
    filled.register_character_style(&FontSpec::default());
    filled.register_paragraph_style(&ParaSpec::default());
    Cow::Owned(filled)
}

/// The first [`PREVIEW_LINE_LIMIT`] lines, newline-joined
fn preview_text(lines: &[String]) -> String {
    lines
        .iter()
        .take(PREVIEW_LINE_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

fn check_references(fragments: &[Fragment], registry: &StyleRegistry) -> Result<()> {
    let chars = registry.character_styles().len();
    let paras = registry.paragraph_styles().len();
    for fragment in fragments {
        if let Some(id) = fragment.char_refs().into_iter().find(|&id| id >= chars) {
            return Err(HwpxError::DanglingStyle {
                kind: "character",
                id,
                count: chars,
            });
        }
        if let Some(id) = fragment.para_refs().into_iter().find(|&id| id >= paras) {
            return Err(HwpxError::DanglingStyle {
                kind: "paragraph",
                id,
                count: paras,
            });
        }
    }
    Ok(())
}

fn write_mimetype<W: Write + Seek>(zip: &mut ZipWriter<W>, options: SimpleFileOptions) -> Result<()> {
    let stored = options.compression_method(CompressionMethod::Stored);
    zip.start_file(PART_MIMETYPE, stored)?;
    zip.write_all(MIMETYPE.as_bytes())?;
    Ok(())
}

fn write_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    options: SimpleFileOptions,
    name: &str,
    content: &[u8],
) -> Result<()> {
    zip.start_file(name, options)?;
    zip.write_all(content)?;
    Ok(())
}

fn version_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.empty(Tag::new("hv:HCFVersion").attrs(&[
        ("xmlns:hv", "http://www.hancom.co.kr/hwpml/2011/version"),
        ("tagetApplication", "WORDPROCESSOR"),
        ("major", "5"),
        ("minor", "1"),
        ("micro", "1"),
        ("buildNumber", "0"),
        ("os", "1"),
        ("xmlVersion", "1.5"),
        ("application", "Hancom Office Hangul"),
        ("appVersion", "13, 0, 0, 1408 WIN32LEWindows_10"),
    ]))?;
    Ok(xml.into_bytes())
}

fn settings_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open(Tag::new("ha:HWPApplicationSetting").attrs(&[
        ("xmlns:ha", "http://www.hancom.co.kr/hwpml/2011/app"),
        ("xmlns:config", "urn:oasis:names:tc:opendocument:xmlns:config:1.0"),
    ]))?;
    xml.empty(Tag::new("ha:CaretPosition").attrs(&[
        ("listIDRef", "0"),
        ("paraIDRef", "0"),
        ("pos", "0"),
    ]))?;
    xml.close("ha:HWPApplicationSetting")?;
    Ok(xml.into_bytes())
}

fn container_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open(Tag::new("ocf:container").attrs(&[
        ("xmlns:ocf", "urn:oasis:names:tc:opendocument:xmlns:container"),
        ("xmlns:hpf", "http://www.hancom.co.kr/schema/2011/hpf"),
    ]))?;
    xml.open(Tag::new("ocf:rootfiles"))?;
    for (path, media_type) in [
        (PART_CONTENT_HPF, "application/hwpml-package+xml"),
        (PART_PREVIEW, "text/plain"),
        (PART_CONTAINER_RDF, "application/rdf+xml"),
    ] {
        xml.empty(
            Tag::new("ocf:rootfile")
                .attr("full-path", path)
                .attr("media-type", media_type),
        )?;
    }
    xml.close("ocf:rootfiles")?;
    xml.close("ocf:container")?;
    Ok(xml.into_bytes())
}

fn manifest_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.empty(
        Tag::new("odf:manifest")
            .attr("xmlns:odf", "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0"),
    )?;
    Ok(xml.into_bytes())
}

fn container_rdf() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open(Tag::new("rdf:RDF").attr("xmlns:rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"))?;
    for (part, kind) in [(PART_HEADER, "HeaderFile"), (PART_SECTION, "SectionFile")] {
        xml.open(Tag::new("rdf:Description").attr("rdf:about", ""))?;
        xml.empty(
            Tag::new("ns0:hasPart")
                .attr("xmlns:ns0", NS_PKG_META)
                .attr("rdf:resource", part),
        )?;
        xml.close("rdf:Description")?;
        xml.open(Tag::new("rdf:Description").attr("rdf:about", part))?;
        xml.empty(Tag::new("rdf:type").attr("rdf:resource", format!("{NS_PKG_META}{kind}")))?;
        xml.close("rdf:Description")?;
    }
    xml.open(Tag::new("rdf:Description").attr("rdf:about", ""))?;
    xml.empty(Tag::new("rdf:type").attr("rdf:resource", format!("{NS_PKG_META}Document")))?;
    xml.close("rdf:Description")?;
    xml.close("rdf:RDF")?;
    Ok(xml.into_bytes())
}

fn content_hpf() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.open(
        Tag::new("opf:package")
            .attrs(NAMESPACES)
            .attrs(&[("version", ""), ("unique-identifier", ""), ("id", "")]),
    )?;

    xml.open(Tag::new("opf:metadata"))?;
    xml.empty(Tag::new("opf:title"))?;
    xml.leaf(Tag::new("opf:language"), "ko")?;
    xml.leaf(
        Tag::new("opf:meta").attrs(&[("name", "creator"), ("content", "text")]),
        "md2hwpx",
    )?;
    xml.close("opf:metadata")?;

    xml.open(Tag::new("opf:manifest"))?;
    for (id, href) in [
        ("header", PART_HEADER),
        ("section0", PART_SECTION),
        ("settings", PART_SETTINGS),
    ] {
        xml.empty(
            Tag::new("opf:item")
                .attr("id", id)
                .attr("href", href)
                .attr("media-type", "application/xml"),
        )?;
    }
    xml.close("opf:manifest")?;

    xml.open(Tag::new("opf:spine"))?;
    for id in ["header", "section0"] {
        xml.empty(Tag::new("opf:itemref").attr("idref", id).attr("linear", "yes"))?;
    }
    xml.close("opf:spine")?;

    xml.close("opf:package")?;
    Ok(xml.into_bytes())
}
