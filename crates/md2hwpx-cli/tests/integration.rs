//! Integration tests for the md2hwpx CLI
//!
//! These drive `convert_command` against real files and read the produced
//! archives back.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use md2hwpx_cli::{convert_command, run, Cli, ConvertOptions};
use tempfile::TempDir;
use zip::ZipArchive;

fn read_part(path: &Path, name: &str) -> String {
    let bytes = fs::read(path).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

fn write_input(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_default_output_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "memo.md", "# 메모\n\n내용\n");

    let summary = convert_command(&input, &ConvertOptions::default()).unwrap();

    assert_eq!(summary.output, dir.path().join("memo.hwpx"));
    assert_eq!(summary.style, "default");
    assert_eq!(summary.encoding, "utf-8");
    assert_eq!(summary.bytes, fs::metadata(&summary.output).unwrap().len());
    assert_eq!(read_part(&summary.output, "mimetype"), "application/hwp+zip");
}

#[test]
fn test_missing_input_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.md");
    let err = convert_command(&missing, &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), format!("file not found: {}", missing.display()));
}

#[test]
fn test_flags_override_settings_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "doc.md", "# 제목\n");
    fs::write(
        dir.path().join("md2hwpx.toml"),
        "[convert]\nstyle = \"academic\"\n",
    )
    .unwrap();

    let from_settings = convert_command(&input, &ConvertOptions::default()).unwrap();
    assert_eq!(from_settings.style, "academic");

    let options = ConvertOptions {
        style: Some("minimal"),
        ..ConvertOptions::default()
    };
    let from_flag = convert_command(&input, &options).unwrap();
    assert_eq!(from_flag.style, "minimal");
}

#[test]
fn test_explicit_config_and_encoding() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("legacy.md");
    let (encoded, _, _) = encoding_rs::EUC_KR.encode("# 옛 문서\n");
    fs::write(&input, &encoded).unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[convert]\nencoding = \"euc-kr\"\nstyle = \"business\"\n").unwrap();
    let output = dir.path().join("out/legacy.hwpx");

    let options = ConvertOptions {
        output: Some(&output),
        config: Some(&config),
        ..ConvertOptions::default()
    };
    let summary = convert_command(&input, &options).unwrap();

    assert_eq!(summary.encoding, "euc-kr");
    assert_eq!(summary.style, "business");
    assert!(read_part(&output, "Contents/section0.xml").contains("<hp:t>옛 문서</hp:t>"));
}

#[test]
fn test_conversion_error_carries_context() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.md");
    fs::write(&input, [0xFF, 0xFE, 0xFD]).unwrap();
    let options = ConvertOptions {
        encoding: Some("utf-8"),
        ..ConvertOptions::default()
    };
    // 0xFF 0xFE is a UTF-16LE byte-order mark; the trailing odd byte is malformed
    let err = convert_command(&input, &options).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.starts_with("Failed to convert"));
    assert!(chain.contains("UTF-16LE"));
    assert!(!dir.path().join("broken.hwpx").exists());
}

#[test]
fn test_run_list_styles() {
    let cli = Cli {
        input: None,
        output: None,
        style: None,
        encoding: None,
        config: None,
        list_styles: true,
        verbose: false,
    };
    run(cli).unwrap();
}
