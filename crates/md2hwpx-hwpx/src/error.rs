//! Error types for HWPX operations

use thiserror::Error;

/// Errors that can occur while rendering or packaging an HWPX document
#[derive(Error, Debug)]
pub enum HwpxError {
    /// The requested style preset does not exist
    #[error("Unknown preset '{name}'. Choose from: {choices}")]
    UnknownPreset {
        /// Name that was asked for
        name: String,
        /// Comma-separated list of valid names
        choices: String,
    },

    /// A fragment refers to a style the registry never handed out
    #[error("Fragment references {kind} property {id}, but only {count} are defined")]
    DanglingStyle {
        /// `character` or `paragraph`
        kind: &'static str,
        id: usize,
        count: usize,
    },

    /// Error writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error producing XML content
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl HwpxError {
    /// Build an unknown-preset error listing every valid preset
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        HwpxError::UnknownPreset {
            name: name.into(),
            choices: crate::preset::PRESET_NAMES.join(", "),
        }
    }
}

/// Result type for HWPX operations
pub type Result<T> = std::result::Result<T, HwpxError>;
