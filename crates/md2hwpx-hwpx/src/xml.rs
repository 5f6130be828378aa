//! Structured XML output
//!
//! Thin layer over [`quick_xml::Writer`]: elements are built as [`Tag`]s whose
//! attributes keep insertion order, and all text and attribute values are
//! escaped by quick-xml.

use std::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;

/// An element start tag under construction
pub(crate) struct Tag<'a> {
    start: BytesStart<'a>,
}

impl<'a> Tag<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            start: BytesStart::new(name),
        }
    }

    /// Append one attribute
    pub fn attr(mut self, key: &str, value: impl Display) -> Self {
        self.start.push_attribute((key, value.to_string().as_str()));
        self
    }

    /// Append several literal attributes in order
    pub fn attrs(mut self, pairs: &[(&str, &str)]) -> Self {
        for &(key, value) in pairs {
            self.start.push_attribute((key, value));
        }
        self
    }
}

/// Streaming writer for one XML part
pub(crate) struct XmlWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Start a standalone UTF-8 document
    pub fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    pub fn open(&mut self, tag: Tag<'_>) -> Result<()> {
        self.writer.write_event(Event::Start(tag.start))?;
        Ok(())
    }

    pub fn close(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub fn empty(&mut self, tag: Tag<'_>) -> Result<()> {
        self.writer.write_event(Event::Empty(tag.start))?;
        Ok(())
    }

    pub fn text(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Write `<name ...>text</name>`
    pub fn leaf(&mut self, tag: Tag<'_>, text: &str) -> Result<()> {
        let name = String::from_utf8_lossy(tag.start.name().as_ref()).into_owned();
        self.open(tag)?;
        self.text(text)?;
        self.close(&name)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}
