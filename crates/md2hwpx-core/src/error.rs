//! Error types for conversion

use std::path::PathBuf;

use md2hwpx_hwpx::HwpxError;
use thiserror::Error;

/// Errors that can occur while converting Markdown to HWPX
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Rendering or packaging failed, or the preset is unknown
    #[error(transparent)]
    Hwpx(#[from] HwpxError),

    /// Error reading the input or writing the output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The declared source encoding is not a known label
    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),

    /// The source bytes are malformed under the chosen encoding
    #[error("Input is not valid {encoding} text")]
    Decode {
        /// Canonical name of the encoding used
        encoding: String,
    },

    /// A settings file could not be parsed
    #[error("Invalid settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConvertError {
    /// Whether the caller supplied something unusable: an unknown preset
    /// or encoding, or input that does not decode
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ConvertError::Hwpx(HwpxError::UnknownPreset { .. })
                | ConvertError::UnknownEncoding(_)
                | ConvertError::Decode { .. }
        )
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
