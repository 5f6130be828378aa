//! md2hwpx-ast - Document tree definitions
//!
//! This crate provides the tree that the Markdown parser produces and the
//! HWPX renderer consumes.
//!
//! # Example
//!
//! ```
//! use md2hwpx_ast::{Document, Node};
//!
//! let mut doc = Document::new();
//! doc.push(Node::heading(1, "Title"));
//! doc.push(Node::paragraph("Body text"));
//!
//! assert_eq!(doc.len(), 2);
//! assert_eq!(doc.plain_text(), "TitleBody text");
//! ```

pub mod document;
pub mod node;

pub use document::Document;
pub use node::{Alignment, Node};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
