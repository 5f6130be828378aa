//! Document tree nodes
//!
//! Every construct the converter understands is one variant of [`Node`].
//! Block and inline kinds share the type so that a permissive producer can
//! place any node anywhere; renderers decide what each position means.

use serde::{Deserialize, Serialize};

/// Horizontal alignment declared on a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    /// Left aligned (`:--`)
    Left,
    /// Centered (`:-:`)
    Center,
    /// Right aligned (`--:`)
    Right,
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A section heading
    Heading {
        /// Declared level; renderers clamp it to 1..=6
        level: u8,
        /// Inline content
        children: Vec<Node>,
    },
    /// A paragraph of inline content
    Paragraph {
        /// Inline content
        children: Vec<Node>,
    },
    /// Literal text
    Text(String),
    /// Strong emphasis
    Bold {
        /// Emphasized content
        children: Vec<Node>,
    },
    /// Emphasis
    Italic {
        /// Emphasized content
        children: Vec<Node>,
    },
    /// Struck-through content
    Strikethrough {
        /// Struck content
        children: Vec<Node>,
    },
    /// Inline code span
    InlineCode(String),
    /// A fenced or indented code block
    CodeBlock {
        /// Info string of the fence, empty when absent
        language: String,
        /// Verbatim block content
        text: String,
    },
    /// A numbered list
    OrderedList {
        /// Number of the first item
        start: u64,
        /// List items
        items: Vec<Node>,
    },
    /// A bulleted list
    UnorderedList {
        /// List items
        items: Vec<Node>,
    },
    /// A list item
    ListItem {
        /// Item content (paragraphs, nested lists, other blocks)
        children: Vec<Node>,
    },
    /// A list item with a checkbox
    TaskListItem {
        /// Whether the box is ticked
        checked: bool,
        /// Item content
        children: Vec<Node>,
    },
    /// A table
    Table {
        /// Rows in display order, header row first
        rows: Vec<Node>,
    },
    /// A table row
    TableRow {
        /// Cells in column order
        cells: Vec<Node>,
    },
    /// A table cell
    TableCell {
        /// Column alignment, if declared
        align: Option<Alignment>,
        /// Whether the cell belongs to the header row
        header: bool,
        /// Inline content
        children: Vec<Node>,
    },
    /// A block quote
    Blockquote {
        /// Quoted blocks
        children: Vec<Node>,
    },
    /// A thematic break
    HorizontalRule,
    /// A hyperlink
    Link {
        /// Destination URL
        url: String,
        /// Optional title
        title: String,
        /// Link text
        children: Vec<Node>,
    },
    /// An image reference
    Image {
        /// Image source URL
        url: String,
        /// Optional title
        title: String,
        /// Alternative text
        alt: String,
    },
    /// A footnote reference such as `[^1]`
    FootnoteRef {
        /// Footnote label
        id: String,
    },
    /// A footnote definition
    FootnoteDef {
        /// Footnote label
        id: String,
        /// Definition blocks
        children: Vec<Node>,
    },
    /// A hard line break
    LineBreak,
    /// A soft line break
    SoftBreak,
}

impl Node {
    /// Create a text leaf
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Create a paragraph holding a single text leaf
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph {
            children: vec![Node::text(text)],
        }
    }

    /// Create a heading holding a single text leaf
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Node::Heading {
            level,
            children: vec![Node::text(text)],
        }
    }

    /// Child nodes in order; empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::Bold { children }
            | Node::Italic { children }
            | Node::Strikethrough { children }
            | Node::ListItem { children }
            | Node::TaskListItem { children, .. }
            | Node::TableCell { children, .. }
            | Node::Blockquote { children }
            | Node::Link { children, .. }
            | Node::FootnoteDef { children, .. } => children,
            Node::OrderedList { items, .. } | Node::UnorderedList { items } => items,
            Node::Table { rows } => rows,
            Node::TableRow { cells } => cells,
            Node::Text(_)
            | Node::InlineCode(_)
            | Node::CodeBlock { .. }
            | Node::HorizontalRule
            | Node::Image { .. }
            | Node::FootnoteRef { .. }
            | Node::LineBreak
            | Node::SoftBreak => &[],
        }
    }

    /// Literal text carried by leaf kinds
    pub fn literal(&self) -> Option<&str> {
        match self {
            Node::Text(text) | Node::InlineCode(text) => Some(text),
            Node::CodeBlock { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Snake-case name of the node kind, used in log output
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Heading { .. } => "heading",
            Node::Paragraph { .. } => "paragraph",
            Node::Text(_) => "text",
            Node::Bold { .. } => "bold",
            Node::Italic { .. } => "italic",
            Node::Strikethrough { .. } => "strikethrough",
            Node::InlineCode(_) => "inline_code",
            Node::CodeBlock { .. } => "code_block",
            Node::OrderedList { .. } => "ordered_list",
            Node::UnorderedList { .. } => "unordered_list",
            Node::ListItem { .. } => "list_item",
            Node::TaskListItem { .. } => "task_list_item",
            Node::Table { .. } => "table",
            Node::TableRow { .. } => "table_row",
            Node::TableCell { .. } => "table_cell",
            Node::Blockquote { .. } => "blockquote",
            Node::HorizontalRule => "horizontal_rule",
            Node::Link { .. } => "link",
            Node::Image { .. } => "image",
            Node::FootnoteRef { .. } => "footnote_ref",
            Node::FootnoteDef { .. } => "footnote_def",
            Node::LineBreak => "line_break",
            Node::SoftBreak => "soft_break",
        }
    }

    /// Whether this node is a list container
    pub fn is_list(&self) -> bool {
        matches!(self, Node::OrderedList { .. } | Node::UnorderedList { .. })
    }

    /// Flattened literal text of this subtree
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    pub(crate) fn collect_text(&self, out: &mut String) {
        if let Some(text) = self.literal() {
            out.push_str(text);
        }
        for child in self.children() {
            child.collect_text(out);
        }
    }
}
