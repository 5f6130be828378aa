//! Markdown Parser
//!
//! This module parses CommonMark with the GitHub extensions into a
//! `md2hwpx_ast::Document`. Parsing never fails: anything the tree has no
//! node kind for is either degraded to text or spliced into its parent.
//!
//! # Supported Syntax
//!
//! - Headings, paragraphs, block quotes, thematic breaks
//! - Fenced and indented code blocks
//! - Ordered, unordered and task lists
//! - Tables with column alignment
//! - `**bold**`, `*italic*`, `~~strike~~`, `` `code` ``
//! - Links, images, footnote references and definitions
//!
//! # Example
//!
//! ```
//! use md2hwpx_ast::Node;
//! use md2hwpx_core::parser;
//!
//! let doc = parser::parse("# Title\n\nHello **world**.\n");
//! assert_eq!(doc.len(), 2);
//! assert!(matches!(doc.children[0], Node::Heading { level: 1, .. }));
//! ```

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use tracing::trace;

use md2hwpx_ast::{Alignment, Document, Node};

/// An open container waiting for its end event
#[derive(Debug)]
enum Frame {
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock { language: String, text: String },
    HtmlBlock(String),
    List(Option<u64>),
    Item { task: Option<bool> },
    FootnoteDef(String),
    Table(Vec<Option<Alignment>>),
    TableHead,
    TableRow,
    TableCell { align: Option<Alignment>, header: bool },
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String, title: String },
    Image { url: String, title: String },
    /// A container with no node kind; its children join the parent
    Splice,
}

/// Event-stream to tree builder
struct TreeBuilder {
    /// Open containers with the children collected so far
    stack: Vec<(Frame, Vec<Node>)>,
    /// Finished top-level blocks
    root: Vec<Node>,
    /// Footnote definitions, appended to the root at the end
    footnotes: Vec<Node>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: Vec::new(),
            footnotes: Vec::new(),
        }
    }

    fn build(mut self, markdown: &str) -> Document {
        for event in Parser::new_ext(markdown, options()) {
            self.event(event);
        }
        // Unbalanced streams do not happen with pulldown-cmark, but close
        // anything left open rather than lose it.
        while !self.stack.is_empty() {
            self.close();
        }
        self.root.append(&mut self.footnotes);
        Document::from_nodes(self.root)
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.emit(Node::InlineCode(code.into_string())),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.text(&math),
            Event::Html(html) | Event::InlineHtml(html) => self.html(&html),
            Event::FootnoteReference(label) => self.emit(Node::FootnoteRef {
                id: label.into_string(),
            }),
            Event::SoftBreak => self.emit(Node::SoftBreak),
            Event::HardBreak => self.emit(Node::LineBreak),
            Event::Rule => self.emit(Node::HorizontalRule),
            Event::TaskListMarker(checked) => self.mark_task(checked),
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, .. } => Frame::Heading(level as u8),
            Tag::BlockQuote(_) => Frame::BlockQuote,
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(info) => info.trim().to_string(),
                    CodeBlockKind::Indented => String::new(),
                },
                text: String::new(),
            },
            Tag::HtmlBlock => Frame::HtmlBlock(String::new()),
            Tag::List(start) => Frame::List(start),
            Tag::Item => Frame::Item { task: None },
            Tag::FootnoteDefinition(label) => Frame::FootnoteDef(label.into_string()),
            Tag::Table(alignments) => {
                Frame::Table(alignments.into_iter().map(convert_alignment).collect())
            }
            Tag::TableHead => Frame::TableHead,
            Tag::TableRow => Frame::TableRow,
            Tag::TableCell => self.cell_frame(),
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Strikethrough => Frame::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                url: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                url: dest_url.into_string(),
                title: title.into_string(),
            },
            other => {
                trace!(tag = ?other, "splicing container without a node kind");
                Frame::Splice
            }
        };
        self.stack.push((frame, Vec::new()));
    }

    /// Header flag and column alignment for a cell about to open
    fn cell_frame(&self) -> Frame {
        let mut frames = self.stack.iter().rev();
        let (header, column) = match frames.next() {
            Some((Frame::TableHead, cells)) => (true, cells.len()),
            Some((_, cells)) => (false, cells.len()),
            None => (false, 0),
        };
        let align = frames
            .find_map(|(frame, _)| match frame {
                Frame::Table(alignments) => Some(alignments.get(column).copied().flatten()),
                _ => None,
            })
            .flatten();
        Frame::TableCell { align, header }
    }

    fn close(&mut self) {
        let Some((frame, children)) = self.stack.pop() else {
            return;
        };
        let node = match frame {
            Frame::Paragraph => Node::Paragraph { children },
            Frame::Heading(level) => Node::Heading { level, children },
            Frame::BlockQuote => Node::Blockquote { children },
            Frame::CodeBlock { language, text } => Node::CodeBlock { language, text },
            Frame::HtmlBlock(html) => Node::Paragraph {
                children: vec![Node::Text(html.trim_end().to_string())],
            },
            Frame::List(Some(start)) => Node::OrderedList {
                start,
                items: children,
            },
            Frame::List(None) => Node::UnorderedList { items: children },
            Frame::Item { task } => {
                let children = wrap_inline_runs(children);
                match task {
                    Some(checked) => Node::TaskListItem { checked, children },
                    None => Node::ListItem { children },
                }
            }
            Frame::FootnoteDef(id) => {
                self.footnotes.push(Node::FootnoteDef { id, children });
                return;
            }
            Frame::Table(_) => Node::Table { rows: children },
            Frame::TableHead | Frame::TableRow => Node::TableRow { cells: children },
            Frame::TableCell { align, header } => Node::TableCell {
                align,
                header,
                children,
            },
            Frame::Emphasis => Node::Italic { children },
            Frame::Strong => Node::Bold { children },
            Frame::Strikethrough => Node::Strikethrough { children },
            Frame::Link { url, title } => Node::Link {
                url,
                title,
                children,
            },
            Frame::Image { url, title } => Node::Image {
                url,
                title,
                alt: children.iter().map(Node::plain_text).collect(),
            },
            Frame::Splice => {
                for child in children {
                    self.emit(child);
                }
                return;
            }
        };
        self.emit(node);
    }

    /// Append a finished node to the innermost open container
    fn emit(&mut self, node: Node) {
        let siblings = match self.stack.last_mut() {
            Some((_, children)) => children,
            None => &mut self.root,
        };
        if let (Node::Text(addition), Some(Node::Text(previous))) = (&node, siblings.last_mut()) {
            previous.push_str(addition);
            return;
        }
        siblings.push(node);
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some((Frame::CodeBlock { text: code, .. }, _)) => code.push_str(text),
            Some((Frame::HtmlBlock(html), _)) => html.push_str(text),
            _ => self.emit(Node::Text(text.to_string())),
        }
    }

    fn html(&mut self, html: &str) {
        match self.stack.last_mut() {
            Some((Frame::HtmlBlock(block), _)) => block.push_str(html),
            _ => self.emit(Node::Text(html.to_string())),
        }
    }

    fn mark_task(&mut self, checked: bool) {
        let item = self.stack.iter_mut().rev().find_map(|(frame, _)| match frame {
            Frame::Item { task } => Some(task),
            _ => None,
        });
        match item {
            Some(task) => *task = Some(checked),
            None => trace!("task marker outside a list item"),
        }
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

fn convert_alignment(alignment: pulldown_cmark::Alignment) -> Option<Alignment> {
    match alignment {
        pulldown_cmark::Alignment::None => None,
        pulldown_cmark::Alignment::Left => Some(Alignment::Left),
        pulldown_cmark::Alignment::Center => Some(Alignment::Center),
        pulldown_cmark::Alignment::Right => Some(Alignment::Right),
    }
}

fn is_inline(node: &Node) -> bool {
    matches!(
        node,
        Node::Text(_)
            | Node::Bold { .. }
            | Node::Italic { .. }
            | Node::Strikethrough { .. }
            | Node::InlineCode(_)
            | Node::Link { .. }
            | Node::Image { .. }
            | Node::FootnoteRef { .. }
            | Node::LineBreak
            | Node::SoftBreak
    )
}

/// Wrap each run of inline children (a tight list item) in a paragraph
fn wrap_inline_runs(children: Vec<Node>) -> Vec<Node> {
    let mut blocks = Vec::with_capacity(children.len());
    let mut inline = Vec::new();
    for child in children {
        if is_inline(&child) {
            inline.push(child);
            continue;
        }
        if !inline.is_empty() {
            blocks.push(Node::Paragraph {
                children: std::mem::take(&mut inline),
            });
        }
        blocks.push(child);
    }
    if !inline.is_empty() {
        blocks.push(Node::Paragraph { children: inline });
    }
    blocks
}

/// Parse Markdown text into a document tree
pub fn parse(markdown: &str) -> Document {
    TreeBuilder::new().build(markdown)
}
