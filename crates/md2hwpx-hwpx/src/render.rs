//! Document tree to HWPX rendering
//!
//! [`HwpxRenderer`] walks a [`Document`] and produces [`Fragment`]s bound to a
//! fresh [`StyleRegistry`], plus the plain-text lines of the preview part.
//! Inline nodes nested in a block are flattened into [`Span`]s first; the
//! block then becomes one paragraph built from them.
//!
//! # Example
//!
//! ```
//! use md2hwpx_ast::{Document, Node};
//! use md2hwpx_hwpx::{HwpxRenderer, StyleManager};
//!
//! let mut doc = Document::new();
//! doc.push(Node::heading(1, "Title"));
//!
//! let renderer = HwpxRenderer::new(StyleManager::default());
//! let output = renderer.render_fragments(&doc);
//! assert_eq!(output.fragments.len(), 1);
//! assert_eq!(output.preview, vec!["Title".to_string()]);
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use md2hwpx_ast::{Document, Node};

use crate::constants::{BULLETS, LIST_INDENT_PER_DEPTH_PT};
use crate::error::Result;
use crate::fragment::{Fragment, Paragraph, Run};
use crate::package::package;
use crate::preset::{StyleManager, StyleName};
use crate::registry::StyleRegistry;
use crate::style::{FontSpec, HwpUnit, ParaAlign, ParaSpec, Rgb};

const LINK_COLOR: Rgb = Rgb(0x05, 0x63, 0xC1);
const MUTED_COLOR: Rgb = Rgb(0x66, 0x66, 0x66);
const FOOTNOTE_REF_COLOR: Rgb = Rgb(0x00, 0x00, 0xFF);

/// Text with its resolved character formatting, not yet registered
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub font: FontSpec,
}

impl Span {
    pub fn new(text: impl Into<String>, font: &FontSpec) -> Self {
        Self {
            text: text.into(),
            font: font.clone(),
        }
    }
}

/// Everything one render produces before packaging
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub fragments: Vec<Fragment>,
    pub registry: StyleRegistry,
    /// One line per rendered block, in document order
    pub preview: Vec<String>,
}

/// Mutable state of a single render call
pub(crate) struct RenderState {
    pub registry: StyleRegistry,
    pub preview: Vec<String>,
    last_id: u32,
}

impl RenderState {
    fn new() -> Self {
        Self {
            registry: StyleRegistry::new(),
            preview: Vec::new(),
            last_id: 0,
        }
    }

    /// ID most recently handed to a paragraph
    pub fn last_paragraph_id(&self) -> u32 {
        self.last_id
    }

    pub fn next_paragraph_id(&mut self) -> u32 {
        self.last_id += 1;
        self.last_id
    }

    /// Bind spans and paragraph formatting to registry IDs
    pub fn paragraph(&mut self, spans: Vec<Span>, para: &ParaSpec) -> Paragraph {
        let id = self.next_paragraph_id();
        let para_pr = self.registry.register_paragraph_style(para);
        let runs = spans
            .into_iter()
            .filter(|span| !span.text.is_empty())
            .map(|span| Run {
                char_pr: self.registry.register_character_style(&span.font),
                text: span.text,
            })
            .collect();
        Paragraph { id, para_pr, runs }
    }
}

/// Renders document trees with one style preset
#[derive(Debug, Clone, Default)]
pub struct HwpxRenderer {
    styles: StyleManager,
}

impl HwpxRenderer {
    pub fn new(styles: StyleManager) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &StyleManager {
        &self.styles
    }

    /// Render `doc` to a complete HWPX archive
    pub fn render(&self, doc: &Document) -> Result<Vec<u8>> {
        let output = self.render_fragments(doc);
        package(&output.fragments, &output.registry, &output.preview)
    }

    /// Render `doc` and write the archive to `path`
    pub fn render_to_file(&self, doc: &Document, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render(doc)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Render `doc` to fragments without packaging them
    ///
    /// The body style is registered first, so character and paragraph
    /// property 0 are always the body formatting.
    pub fn render_fragments(&self, doc: &Document) -> RenderOutput {
        let mut state = RenderState::new();
        let body = self.styles.body();
        state.registry.register_character_style(&body.font);
        state.registry.register_paragraph_style(&body.para);

        let mut fragments = Vec::new();
        for child in &doc.children {
            fragments.extend(self.render_block(child, &mut state));
        }

        debug!(
            fragments = fragments.len(),
            char_styles = state.registry.character_styles().len(),
            para_styles = state.registry.paragraph_styles().len(),
            fonts = state.registry.fonts().len(),
            "rendered document"
        );

        RenderOutput {
            fragments,
            registry: state.registry,
            preview: state.preview,
        }
    }

    pub(crate) fn render_block(&self, node: &Node, st: &mut RenderState) -> Vec<Fragment> {
        match node {
            Node::Heading { level, .. } => self.render_heading(*level, node, st),
            Node::Paragraph { .. } => self.render_paragraph(node, st),
            Node::Text(text) => self.render_text(text, st),
            Node::Bold { .. }
            | Node::Italic { .. }
            | Node::Strikethrough { .. }
            | Node::InlineCode(_)
            | Node::FootnoteRef { .. } => self.render_inline_block(node, st),
            Node::CodeBlock { text, .. } => self.render_code_block(text, st),
            Node::Blockquote { children } => self.render_blockquote(node, children, st),
            Node::HorizontalRule => self.render_horizontal_rule(st),
            Node::OrderedList { .. } | Node::UnorderedList { .. } => self.render_list(node, 0, st),
            Node::ListItem { .. } | Node::TaskListItem { .. } => {
                self.render_list_item(node, &ListPosition::bullet(0), st)
            }
            Node::Table { rows } => self.render_table(rows, st),
            Node::Link { url, .. } => self.render_link(node, url, st),
            Node::Image { .. } => self.render_image(node, st),
            Node::FootnoteDef { id, children } => self.render_footnote_def(node, id, children, st),
            Node::TableRow { .. } | Node::TableCell { .. } | Node::LineBreak | Node::SoftBreak => {
                trace!(kind = node.kind_name(), "no block output for node");
                Vec::new()
            }
        }
    }

    fn render_heading(&self, level: u8, node: &Node, st: &mut RenderState) -> Vec<Fragment> {
        let style = self.styles.style(StyleName::heading(level));
        let spans = self.collect_runs(node, &style.font);
        if spans.is_empty() {
            return Vec::new();
        }
        st.preview.push(node.plain_text());
        vec![Fragment::Paragraph(st.paragraph(spans, &style.para))]
    }

    fn render_paragraph(&self, node: &Node, st: &mut RenderState) -> Vec<Fragment> {
        let body = self.styles.body();
        let spans = self.collect_runs(node, &body.font);
        if spans.is_empty() {
            return Vec::new();
        }
        let paragraph = st.paragraph(spans, &body.para);
        let text = node.plain_text();
        if !text.trim().is_empty() {
            st.preview.push(text);
        }
        vec![Fragment::Paragraph(paragraph)]
    }

    fn render_text(&self, text: &str, st: &mut RenderState) -> Vec<Fragment> {
        if text.is_empty() {
            return Vec::new();
        }
        let body = self.styles.body();
        let paragraph = st.paragraph(vec![Span::new(text, &body.font)], &body.para);
        st.preview.push(text.to_string());
        vec![Fragment::Paragraph(paragraph)]
    }

    /// An inline node found where a block was expected
    fn render_inline_block(&self, node: &Node, st: &mut RenderState) -> Vec<Fragment> {
        let body = self.styles.body();
        let mut spans = Vec::new();
        self.collect_inline(node, &body.font, &mut spans);
        if spans.is_empty() {
            return Vec::new();
        }
        vec![Fragment::Paragraph(st.paragraph(spans, &body.para))]
    }

    fn render_code_block(&self, text: &str, st: &mut RenderState) -> Vec<Fragment> {
        let style = self.styles.style(StyleName::CodeBlock);
        let mut lines: Vec<&str> = text.split('\n').collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }
        let fragments = lines
            .into_iter()
            .map(|line| {
                let display = if line.is_empty() { " " } else { line };
                Fragment::Paragraph(st.paragraph(vec![Span::new(display, &style.font)], &style.para))
            })
            .collect();

        let preview: String = text.chars().take(200).collect();
        st.preview.push(format!("[Code: {}]", preview.replace('\n', " ")));
        fragments
    }

    fn render_blockquote(&self, node: &Node, children: &[Node], st: &mut RenderState) -> Vec<Fragment> {
        let style = self.styles.style(StyleName::Blockquote);
        let mut fragments = Vec::new();
        for child in children {
            if let Node::Paragraph { .. } = child {
                let spans = self.collect_runs(child, &style.font);
                if !spans.is_empty() {
                    fragments.push(Fragment::Paragraph(st.paragraph(spans, &style.para)));
                }
            } else {
                fragments.extend(self.render_block(child, st));
            }
        }
        let text = node.plain_text();
        let text = text.trim();
        if !text.is_empty() {
            st.preview.push(format!("> {}", truncate(text, 120)));
        }
        fragments
    }

    fn render_horizontal_rule(&self, st: &mut RenderState) -> Vec<Fragment> {
        let style = self.styles.style(StyleName::HorizontalRule);
        let para = style.para.derive(|p| p.align = ParaAlign::Center);
        let rule = "\u{2500}".repeat(40);
        let paragraph = st.paragraph(vec![Span::new(rule, &style.font)], &para);
        st.preview.push("---".to_string());
        vec![Fragment::Paragraph(paragraph)]
    }

    fn render_list(&self, list: &Node, depth: usize, st: &mut RenderState) -> Vec<Fragment> {
        let (mut counter, ordered) = match list {
            Node::OrderedList { start, .. } => (*start, true),
            _ => (0, false),
        };
        let mut fragments = Vec::new();
        for item in list.children() {
            let position = if ordered {
                ListPosition::numbered(counter, depth)
            } else {
                ListPosition::bullet(depth)
            };
            fragments.extend(self.render_list_item(item, &position, st));
            if ordered {
                counter = counter.saturating_add(1);
            }
        }
        fragments
    }

    /// One paragraph for the item's own inline content, then its nested blocks
    fn render_list_item(&self, item: &Node, position: &ListPosition, st: &mut RenderState) -> Vec<Fragment> {
        let style = self.styles.style(StyleName::ListItem);
        let extra = HwpUnit::from_pt(LIST_INDENT_PER_DEPTH_PT) * depth_factor(position.depth);
        let para = style.para.derive(|p| p.left_margin = p.left_margin + extra);
        let prefix = position.prefix(item);

        let mut spans = Vec::new();
        for child in item.children() {
            if matches!(child, Node::Paragraph { .. } | Node::Text(_)) {
                spans.extend(self.collect_runs(child, &style.font));
            }
        }
        match spans.first_mut() {
            Some(first) => first.text.insert_str(0, &prefix),
            None => spans.push(Span::new(prefix.trim_end(), &style.font)),
        }

        let mut fragments = vec![Fragment::Paragraph(st.paragraph(spans, &para))];
        for child in item.children() {
            match child {
                Node::Paragraph { .. } | Node::Text(_) => {}
                list if list.is_list() => {
                    fragments.extend(self.render_list(list, position.depth + 1, st))
                }
                other => fragments.extend(self.render_block(other, st)),
            }
        }

        // Nested items have already added their lines
        let text = item.plain_text();
        st.preview.push(format!(
            "  {}{}{}",
            "  ".repeat(position.depth),
            prefix,
            truncate(text.trim(), 80)
        ));
        fragments
    }

    fn render_link(&self, node: &Node, url: &str, st: &mut RenderState) -> Vec<Fragment> {
        let body = self.styles.body();
        let link_font = link_font(&body.font);
        let mut spans = self.collect_runs(node, &link_font);
        if spans.is_empty() {
            push_span(&mut spans, url, &link_font);
        } else if !url.is_empty() {
            let url_font = body.font.derive(|f| {
                f.color = MUTED_COLOR;
                f.size = HwpUnit::from_pt(8.0);
            });
            spans.push(Span::new(format!(" ({url})"), &url_font));
        }
        if spans.is_empty() {
            return Vec::new();
        }
        vec![Fragment::Paragraph(st.paragraph(spans, &body.para))]
    }

    fn render_image(&self, node: &Node, st: &mut RenderState) -> Vec<Fragment> {
        let body = self.styles.body();
        let mut spans = Vec::new();
        self.collect_inline(node, &body.font, &mut spans);
        st.preview.extend(spans.iter().map(|span| span.text.clone()));
        vec![Fragment::Paragraph(st.paragraph(spans, &body.para))]
    }

    fn render_footnote_def(&self, node: &Node, id: &str, children: &[Node], st: &mut RenderState) -> Vec<Fragment> {
        let style = self.styles.style(StyleName::Footnote);
        let prefix = format!("[{id}] ");
        let mut fragments = Vec::new();
        for (index, child) in children.iter().enumerate() {
            let mut spans = self.collect_runs(child, &style.font);
            if index == 0 {
                match spans.first_mut() {
                    Some(first) => first.text.insert_str(0, &prefix),
                    None => spans.push(Span::new(prefix.as_str(), &style.font)),
                }
            }
            if !spans.is_empty() {
                fragments.push(Fragment::Paragraph(st.paragraph(spans, &style.para)));
            }
        }
        if fragments.is_empty() {
            let spans = vec![Span::new(prefix.as_str(), &style.font)];
            fragments.push(Fragment::Paragraph(st.paragraph(spans, &style.para)));
        }
        let text = node.plain_text();
        st.preview.push(format!("  [{id}] {}", truncate(text.trim(), 80)));
        fragments
    }

    /// Spans for the content of `node`
    pub(crate) fn collect_runs(&self, node: &Node, base: &FontSpec) -> Vec<Span> {
        let mut spans = Vec::new();
        match node.literal() {
            Some(text) => push_span(&mut spans, text, base),
            None => {
                for child in node.children() {
                    self.collect_inline(child, base, &mut spans);
                }
            }
        }
        spans
    }

    /// Spans for one inline node, deriving formatting from `base`
    pub(crate) fn collect_inline(&self, node: &Node, base: &FontSpec, out: &mut Vec<Span>) {
        match node {
            Node::Text(text) => push_span(out, text, base),
            Node::Bold { children } => {
                self.collect_children(children, &base.derive(|f| f.bold = true), out)
            }
            Node::Italic { children } => {
                self.collect_children(children, &base.derive(|f| f.italic = true), out)
            }
            Node::Strikethrough { children } => {
                self.collect_children(children, &base.derive(|f| f.strikethrough = true), out)
            }
            Node::InlineCode(code) => push_span(out, code, self.styles.inline_code_font()),
            Node::Link { children, .. } => self.collect_children(children, &link_font(base), out),
            Node::Image { url, title, alt } => {
                let label = [alt, title, url]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .map_or("image", String::as_str);
                let font = base.derive(|f| {
                    f.italic = true;
                    f.color = MUTED_COLOR;
                });
                push_span(out, &format!("[Image: {label}]"), &font);
            }
            Node::FootnoteRef { id } => {
                let font = base.derive(|f| {
                    f.size = HwpUnit::from_pt(7.0);
                    f.color = FOOTNOTE_REF_COLOR;
                });
                push_span(out, &format!("[{id}]"), &font);
            }
            Node::LineBreak => push_span(out, "\n", base),
            Node::SoftBreak => push_span(out, " ", base),
            Node::Heading { .. }
            | Node::Paragraph { .. }
            | Node::CodeBlock { .. }
            | Node::OrderedList { .. }
            | Node::UnorderedList { .. }
            | Node::ListItem { .. }
            | Node::TaskListItem { .. }
            | Node::Table { .. }
            | Node::TableRow { .. }
            | Node::TableCell { .. }
            | Node::Blockquote { .. }
            | Node::HorizontalRule
            | Node::FootnoteDef { .. } => push_span(out, &node.plain_text(), base),
        }
    }

    fn collect_children(&self, children: &[Node], font: &FontSpec, out: &mut Vec<Span>) {
        for child in children {
            self.collect_inline(child, font, out);
        }
    }
}

/// Numbering context of a list item
struct ListPosition {
    depth: usize,
    /// Item number for ordered lists
    number: Option<u64>,
}

impl ListPosition {
    fn bullet(depth: usize) -> Self {
        Self { depth, number: None }
    }

    fn numbered(number: u64, depth: usize) -> Self {
        Self {
            depth,
            number: Some(number),
        }
    }

    fn prefix(&self, item: &Node) -> String {
        if let Node::TaskListItem { checked, .. } = item {
            let mark = if *checked { "\u{2611} " } else { "\u{2610} " };
            return mark.to_string();
        }
        match self.number {
            Some(n) => format!("{n}. "),
            None => format!("{} ", BULLETS[self.depth % BULLETS.len()]),
        }
    }
}

fn depth_factor(depth: usize) -> i32 {
    i32::try_from(depth).unwrap_or(i32::MAX)
}

fn link_font(base: &FontSpec) -> FontSpec {
    base.derive(|f| {
        f.underline = true;
        f.color = LINK_COLOR;
    })
}

fn push_span(out: &mut Vec<Span>, text: &str, font: &FontSpec) {
    if !text.is_empty() {
        out.push(Span::new(text, font));
    }
}

/// First `max` characters of `text`
pub(crate) fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
