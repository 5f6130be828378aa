//! Request handlers
//!
//! Every conversion builds its own [`Converter`] on a blocking worker so
//! concurrent requests never share renderer state.

use axum::body::Bytes;
use axum::extract::{Form, Multipart};
use axum::http::{header, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use md2hwpx_core::{Converter, DEFAULT_ENCODING, PRESET_NAMES, VERSION};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ServerError};

/// Media type of every converted document
pub const HWPX_MEDIA_TYPE: &str = "application/hwpx+zip";

/// Upload name assumed when the client sends none
const DEFAULT_UPLOAD_NAME: &str = "document.md";

/// Preset used when the request names none
const DEFAULT_PRESET: &str = "default";

/// Bytes left unescaped in an RFC 5987 `filename*` value
const FILENAME_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct Styles {
    presets: &'static [&'static str],
}

/// Form body of `POST /convert/text`
#[derive(Deserialize)]
pub struct TextRequest {
    markdown: String,
    #[serde(default)]
    style: Option<String>,
}

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(Health {
        status: "ok",
        version: VERSION,
    })
}

/// `GET /styles`
pub async fn styles() -> impl IntoResponse {
    Json(Styles {
        presets: &PRESET_NAMES,
    })
}

/// `POST /convert`: multipart with `file`, optional `style` and `encoding`
pub async fn convert_upload(mut multipart: Multipart) -> Result<Response> {
    let mut upload = None;
    let mut style = None;
    let mut encoding = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                upload = Some((file_name, field.bytes().await?));
            }
            "style" => style = Some(field.text().await?),
            "encoding" => encoding = Some(field.text().await?),
            _ => {}
        }
    }

    let (file_name, source) = upload.ok_or(ServerError::MissingField("file"))?;
    let style = style.unwrap_or_else(|| DEFAULT_PRESET.to_string());
    let encoding = encoding.unwrap_or_else(|| DEFAULT_ENCODING.to_string());
    let output_name = output_file_name(file_name.as_deref());

    info!(file = %output_name, %style, %encoding, size = source.len(), "converting upload");
    let bytes = convert(style, encoding, source).await?;
    hwpx_response(bytes, &output_name)
}

/// `POST /convert/text`: form with `markdown` and optional `style`
pub async fn convert_text(Form(request): Form<TextRequest>) -> Result<Response> {
    let style = request.style.unwrap_or_else(|| DEFAULT_PRESET.to_string());
    info!(%style, size = request.markdown.len(), "converting text");
    let source = Bytes::from(request.markdown);
    let bytes = convert(style, DEFAULT_ENCODING.to_string(), source).await?;
    hwpx_response(bytes, "document.hwpx")
}

async fn convert(style: String, encoding: String, source: Bytes) -> Result<Vec<u8>> {
    let bytes = tokio::task::spawn_blocking(move || {
        let converter = Converter::new(&style)?;
        converter.convert_bytes(&source, &encoding)
    })
    .await??;
    Ok(bytes)
}

fn hwpx_response(bytes: Vec<u8>, file_name: &str) -> Result<Response> {
    let disposition = HeaderValue::from_str(&content_disposition(file_name))?;
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(HWPX_MEDIA_TYPE)),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, bytes).into_response())
}

/// Replaces the last extension of the upload name with `.hwpx`
pub fn output_file_name(upload: Option<&str>) -> String {
    let name = upload
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_UPLOAD_NAME);
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    format!("{stem}.hwpx")
}

/// `Content-Disposition` value for a download
///
/// Plain names use the quoted `filename` parameter. Anything else is sent
/// as an RFC 5987 `filename*=UTF-8''...` value.
pub fn content_disposition(file_name: &str) -> String {
    let plain = file_name
        .bytes()
        .all(|b| b == b' ' || (b.is_ascii_graphic() && b != b'"' && b != b'\\'));
    if plain {
        format!("attachment; filename=\"{file_name}\"")
    } else {
        format!(
            "attachment; filename*=UTF-8''{}",
            utf8_percent_encode(file_name, FILENAME_SAFE)
        )
    }
}
