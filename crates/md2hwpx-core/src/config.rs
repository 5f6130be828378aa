//! Conversion settings
//!
//! Read from a TOML file, either given explicitly or found as
//! [`SETTINGS_FILE_NAME`] next to the input document:
//!
//! ```toml
//! [convert]
//! style = "academic"
//! encoding = "euc-kr"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use md2hwpx_hwpx::PresetName;

use crate::error::{ConvertError, Result};

/// File name looked up next to the input document
pub const SETTINGS_FILE_NAME: &str = "md2hwpx.toml";

/// Encoding label used when nothing else is configured
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Top-level settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Conversion defaults
    pub convert: ConvertSettings,
}

/// The `[convert]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    /// Style preset
    pub style: Option<PresetName>,
    /// Source encoding label
    pub encoding: Option<String>,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read and parse a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&text).map_err(|source| ConvertError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load [`SETTINGS_FILE_NAME`] from the directory holding `input`, if present
    pub fn discover(input: impl AsRef<Path>) -> Result<Option<Self>> {
        let dir = match input.as_ref().parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let candidate = dir.join(SETTINGS_FILE_NAME);
        if !candidate.is_file() {
            return Ok(None);
        }
        Self::load(candidate).map(Some)
    }

    /// Configured preset, or the default one
    pub fn style(&self) -> PresetName {
        self.convert.style.unwrap_or_default()
    }

    /// Configured encoding label, or [`DEFAULT_ENCODING`]
    pub fn encoding(&self) -> &str {
        self.convert.encoding.as_deref().unwrap_or(DEFAULT_ENCODING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.style(), PresetName::Default);
        assert_eq!(settings.encoding(), "utf-8");
    }

    #[test]
    fn test_convert_table() {
        let settings = Settings::from_toml_str(
            r#"
[convert]
style = "academic"
encoding = "euc-kr"
"#,
        )
        .unwrap();
        assert_eq!(settings.style(), PresetName::Academic);
        assert_eq!(settings.encoding(), "euc-kr");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let settings = Settings::from_toml_str(
            r#"
[convert]
style = "minimal"
paper = "letter"

[other]
x = 1
"#,
        )
        .unwrap();
        assert_eq!(settings.style(), PresetName::Minimal);
    }

    #[test]
    fn test_unknown_preset_rejected() {
        assert!(Settings::from_toml_str("[convert]\nstyle = \"fancy\"\n").is_err());
    }
}
