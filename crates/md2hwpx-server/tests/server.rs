//! HTTP endpoint tests
//!
//! Requests are driven straight through the router with `tower::ServiceExt`,
//! no socket involved.

use std::io::{Cursor, Read};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use md2hwpx_core::{PRESET_NAMES, VERSION};
use md2hwpx_server::{router, HWPX_MEDIA_TYPE};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::Value;
use tower::ServiceExt;
use zip::ZipArchive;

const BOUNDARY: &str = "md2hwpx-test-boundary";

async fn send(request: Request<Body>) -> Response {
    router().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

/// Multipart upload with an optional file part and extra text fields
fn upload(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/markdown\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post("/convert")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// URL-encoded form post to `/convert/text`
fn text_form(fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(name, value)| format!("{name}={}", utf8_percent_encode(value, NON_ALPHANUMERIC)))
        .collect::<Vec<_>>()
        .join("&");
    Request::post("/convert/text")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn header_value<'a>(response: &'a Response, name: header::HeaderName) -> &'a str {
    response.headers()[name].to_str().unwrap()
}

fn section_xml(bytes: &[u8]) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name("Contents/section0.xml")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

/// Checks status and media type, returns the document bytes
async fn expect_hwpx(response: Response) -> Vec<u8> {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), HWPX_MEDIA_TYPE);
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"PK"));
    bytes
}

#[tokio::test]
async fn test_health() {
    let response = send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], VERSION);
}

#[tokio::test]
async fn test_styles() {
    let response = send(get("/styles")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let presets: Vec<&str> = json["presets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap())
        .collect();
    assert_eq!(presets, PRESET_NAMES);
}

#[tokio::test]
async fn test_index_page() {
    let response = send(get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header_value(&response, header::CONTENT_TYPE).starts_with("text/html"));
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    for needle in ["<textarea", "<select", "<button", "fetch("] {
        assert!(html.contains(needle), "{needle}");
    }
}

#[tokio::test]
async fn test_convert_upload() {
    let response = send(upload(Some(("test.md", "# Hello\n\nWorld".as_bytes())), &[])).await;
    let bytes = expect_hwpx(response).await;
    assert!(section_xml(&bytes).contains("Hello"));
}

#[tokio::test]
async fn test_convert_upload_with_style() {
    let response = send(upload(
        Some(("test.md", "# Title\n\nBody".as_bytes())),
        &[("style", "academic")],
    ))
    .await;
    expect_hwpx(response).await;
}

#[tokio::test]
async fn test_upload_file_name_in_disposition() {
    let response = send(upload(Some(("myfile.md", "# Test".as_bytes())), &[])).await;
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"myfile.hwpx\""
    );
}

#[tokio::test]
async fn test_non_ascii_file_name_in_disposition() {
    let response = send(upload(Some(("보고서.md", "# 제목".as_bytes())), &[])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename*=UTF-8''%EB%B3%B4%EA%B3%A0%EC%84%9C.hwpx"
    );
}

#[tokio::test]
async fn test_upload_with_legacy_encoding() {
    // "한글" in EUC-KR
    let source = [b'#', b' ', 0xC7, 0xD1, 0xB1, 0xDB];
    let response = send(upload(
        Some(("kr.md", &source[..])),
        &[("encoding", "euc-kr")],
    ))
    .await;
    let bytes = expect_hwpx(response).await;
    assert!(section_xml(&bytes).contains("한글"));
}

#[tokio::test]
async fn test_invalid_style_rejected() {
    let response = send(upload(
        Some(("test.md", "# Test".as_bytes())),
        &[("style", "fancy")],
    ))
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .starts_with("Unknown preset 'fancy'"));
}

#[tokio::test]
async fn test_unknown_encoding_rejected() {
    let response = send(upload(
        Some(("test.md", "# Test".as_bytes())),
        &[("encoding", "klingon")],
    ))
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Unknown encoding 'klingon'");
}

#[tokio::test]
async fn test_undecodable_upload_rejected() {
    let response = send(upload(Some(("test.md", &[b'#', b' ', 0xFF, 0xFE][..])), &[])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_file_rejected() {
    let response = send(upload(None, &[("style", "default")])).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Missing form field 'file'");
}

#[tokio::test]
async fn test_convert_text() {
    let response = send(text_form(&[("markdown", "# Hello\n\nWorld")])).await;
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"document.hwpx\""
    );
    expect_hwpx(response).await;
}

#[tokio::test]
async fn test_convert_text_with_style() {
    let response = send(text_form(&[
        ("markdown", "# Title\n\n- item 1\n- item 2"),
        ("style", "business"),
    ]))
    .await;
    expect_hwpx(response).await;
}

#[tokio::test]
async fn test_convert_text_korean() {
    let response = send(text_form(&[("markdown", "# 한글 제목\n\n한글 본문입니다.")])).await;
    let bytes = expect_hwpx(response).await;
    let section = section_xml(&bytes);
    assert!(section.contains("한글 제목"));
    assert!(section.contains("한글 본문입니다."));
}

#[tokio::test]
async fn test_convert_text_table() {
    let markdown = "| A | B |\n|---|---|\n| 1 | 2 |";
    let response = send(text_form(&[("markdown", markdown)])).await;
    let bytes = expect_hwpx(response).await;
    assert!(section_xml(&bytes).contains("<hp:tbl"));
}

#[tokio::test]
async fn test_convert_text_invalid_style_rejected() {
    let response = send(text_form(&[("markdown", "# x"), ("style", "fancy")])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_text_requires_markdown() {
    let response = send(text_form(&[("style", "default")])).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_concurrent_requests_use_their_own_style() {
    let mut handles = Vec::new();
    for style in PRESET_NAMES {
        handles.push(tokio::spawn(async move {
            let response = send(text_form(&[("markdown", "# 제목"), ("style", style)])).await;
            (style, response.status())
        }));
    }
    for handle in handles {
        let (style, status) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK, "{style}");
    }
}
