//! md2hwpx CLI - Command-line interface library
//!
//! Converts a Markdown file to an HWPX document that Hancom Office Hangul
//! opens natively.
//!
//! # Library Usage
//!
//! ```no_run
//! use std::path::Path;
//! use md2hwpx_cli::{convert_command, ConvertOptions};
//!
//! let options = ConvertOptions {
//!     style: Some("business"),
//!     ..ConvertOptions::default()
//! };
//! let summary = convert_command(Path::new("report.md"), &options)?;
//! println!("{} bytes", summary.bytes);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Writes report.hwpx next to the input
//! md2hwpx report.md
//!
//! # Explicit output, preset and source encoding
//! md2hwpx legacy.md -o out/legacy.hwpx --style academic --encoding euc-kr
//!
//! # List style presets
//! md2hwpx --list-styles
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{
    convert_command, default_output_path, init_tracing, list_styles_text, run, run_cli, Cli,
    ConvertOptions, ConvertSummary,
};
