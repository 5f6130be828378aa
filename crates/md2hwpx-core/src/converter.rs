//! Markdown to HWPX conversion
//!
//! [`Converter`] ties the parser and the HWPX renderer together. It holds
//! nothing but the selected style preset, so one instance can convert any
//! number of documents.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, info};

use md2hwpx_hwpx::{HwpxRenderer, PresetName, StyleManager};

use crate::error::{ConvertError, Result};
use crate::parser;

/// Converts Markdown text or files to HWPX archives
///
/// ```
/// use md2hwpx_core::Converter;
///
/// let converter = Converter::new("academic")?;
/// let bytes = converter.convert_text("# 제목\n\n본문입니다.")?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), md2hwpx_core::ConvertError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    renderer: HwpxRenderer,
}

impl Converter {
    /// Create a converter for the named preset
    pub fn new(preset: &str) -> Result<Self> {
        Ok(Self::with_preset(preset.parse()?))
    }

    pub fn with_preset(preset: PresetName) -> Self {
        Self {
            renderer: HwpxRenderer::new(StyleManager::from_preset(preset)),
        }
    }

    /// The preset this converter renders with
    pub fn preset(&self) -> PresetName {
        self.renderer.styles().preset()
    }

    /// Convert Markdown text to HWPX bytes
    pub fn convert_text(&self, markdown: &str) -> Result<Vec<u8>> {
        let doc = parser::parse(markdown);
        debug!(blocks = doc.len(), preset = %self.preset(), "parsed markdown");
        Ok(self.renderer.render(&doc)?)
    }

    /// Decode `source` with the given encoding label, then convert it
    pub fn convert_bytes(&self, source: &[u8], encoding: &str) -> Result<Vec<u8>> {
        let text = decode(source, encoding)?;
        self.convert_text(&text)
    }

    /// Convert a Markdown file and write the archive to `output`
    ///
    /// Missing parent directories of `output` are created. Returns the
    /// number of bytes written; nothing is written if conversion fails.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        encoding: &str,
    ) -> Result<u64> {
        let input = input.as_ref();
        let output = output.as_ref();

        let source = fs::read(input)?;
        let bytes = self.convert_bytes(&source, encoding)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, &bytes)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            preset = %self.preset(),
            bytes = bytes.len(),
            "converted file"
        );
        Ok(bytes.len() as u64)
    }
}

/// Resolve an encoding label
///
/// Accepts WHATWG labels plus the code-page spellings Korean tooling
/// commonly uses for Unified Hangul Code.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    let trimmed = label.trim();
    if let Some(encoding) = Encoding::for_label(trimmed.as_bytes()) {
        return Ok(encoding);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "cp949" | "ms949" | "uhc" => Ok(encoding_rs::EUC_KR),
        _ => Err(ConvertError::UnknownEncoding(label.to_string())),
    }
}

/// Decode source bytes to text
///
/// A byte-order mark takes precedence over `label` and is stripped.
/// Malformed input is an error rather than being replaced.
pub fn decode(source: &[u8], label: &str) -> Result<String> {
    let declared = resolve_encoding(label)?;
    let (encoding, body) = match Encoding::for_bom(source) {
        Some((encoding, bom_len)) => (encoding, &source[bom_len..]),
        None => (declared, source),
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or_else(|| ConvertError::Decode {
            encoding: encoding.name().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }

    #[test]
    fn test_unknown_preset() {
        let err = Converter::new("fancy").unwrap_err();
        assert!(err.to_string().starts_with("Unknown preset 'fancy'"));
        assert_eq!(Converter::default().preset(), PresetName::Default);
    }

    #[test]
    fn test_decode_utf8_and_bom() {
        assert_eq!(decode("한글".as_bytes(), "utf-8").unwrap(), "한글");
        let mut with_bom = vec![0xEF, 0xBB, 0xBF];
        with_bom.extend_from_slice("# 제목".as_bytes());
        // the BOM wins over the declared label
        assert_eq!(decode(&with_bom, "euc-kr").unwrap(), "# 제목");
    }

    #[test]
    fn test_decode_euc_kr() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("안녕하세요");
        assert_eq!(decode(&bytes, "euc-kr").unwrap(), "안녕하세요");
        assert_eq!(decode(&bytes, "CP949").unwrap(), "안녕하세요");
    }

    #[test]
    fn test_decode_utf16_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "가a".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode(&bytes, "utf-8").unwrap(), "가a");
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode(b"x", "klingon"),
            Err(ConvertError::UnknownEncoding(label)) if label == "klingon"
        ));
        assert!(matches!(
            decode(&[0x66, 0xFF, 0x66], "utf-8"),
            Err(ConvertError::Decode { encoding }) if encoding == "UTF-8"
        ));
    }

    #[test]
    fn test_convert_bytes_euc_kr() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("# 제목\n");
        let archive = Converter::default().convert_bytes(&bytes, "euc-kr").unwrap();
        assert_eq!(&archive[..2], b"PK");
    }
}
