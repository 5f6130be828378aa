//! md2hwpx-core - Markdown to HWPX
//!
//! Parses Markdown into an `md2hwpx_ast::Document` and renders it through
//! `md2hwpx_hwpx` into an HWPX archive.
//!
//! # Example
//!
//! ```
//! use md2hwpx_core::{parse, Converter};
//!
//! let doc = parse("# Hello\n\nWorld\n");
//! assert_eq!(doc.plain_text(), "HelloWorld");
//!
//! let bytes = Converter::default().convert_text("# Hello\n\nWorld\n")?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), md2hwpx_core::ConvertError>(())
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod parser;

// Re-export main types and functions
pub use config::{ConvertSettings, Settings, DEFAULT_ENCODING, SETTINGS_FILE_NAME};
pub use converter::{decode, resolve_encoding, Converter};
pub use error::{ConvertError, Result};
pub use md2hwpx_hwpx::{PresetName, PRESET_NAMES};
pub use parser::parse;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
