//! Document root
//!
//! The root is its own type so it can never appear nested inside a [`Node`].

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// A complete document tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Top-level blocks in document order
    pub children: Vec<Node>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Create a document from top-level nodes
    pub fn from_nodes(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Add a top-level node
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Check if the document is empty (no nodes)
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get the number of top-level nodes
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Flattened literal text of the whole document
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_document_push() {
        let mut doc = Document::new();
        doc.push(Node::heading(1, "Title"));
        doc.push(Node::paragraph("Body"));
        assert!(!doc.is_empty());
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.plain_text(), "TitleBody");
    }

    #[test]
    fn test_document_default() {
        assert_eq!(Document::default(), Document::from_nodes(Vec::new()));
    }
}
