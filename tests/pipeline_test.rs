//! Driver building blocks: decoding, traversal, line output and configuration.

use std::fs;
use std::path::Path;

use myanmar_rs::input::{collect_files, decode_bytes, mirror_path, read_file};
use myanmar_rs::output::{LineProcessor, OutputFormat};
use myanmar_rs::{Error, MyanmarSegmenter, SegmenterConfig};
use serde_json::Value;
use tempfile::TempDir;

const MYANMAR: &str = "\u{1019}\u{103C}\u{1014}\u{103A}\u{1019}\u{102C}";
const MYANMAR_SEGMENTED: &str = "\u{1019}\u{103C}\u{1014}\u{103A}|\u{1019}\u{102C}";

fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

#[test]
fn test_decode_utf8() {
    assert_eq!(decode_bytes(MYANMAR.as_bytes(), "utf-8").unwrap(), MYANMAR);
    assert_eq!(decode_bytes(MYANMAR.as_bytes(), "utf8").unwrap(), MYANMAR);
}

#[test]
fn test_decode_bom_overrides_label() {
    let bytes = utf16le_with_bom(MYANMAR);
    assert_eq!(decode_bytes(&bytes, "utf-16").unwrap(), MYANMAR);
    assert_eq!(decode_bytes(&bytes, "utf-8").unwrap(), MYANMAR);
}

#[test]
fn test_decode_unknown_label() {
    match decode_bytes(b"abc", "no-such-encoding") {
        Err(Error::UnknownEncoding(label)) => assert_eq!(label, "no-such-encoding"),
        other => panic!("expected UnknownEncoding, got {:?}", other),
    }
}

#[test]
fn test_read_missing_file() {
    let err = read_file(Path::new("/nonexistent/input.txt"), "utf-8").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/input.txt"));
}

#[test]
fn test_collect_files_skips_hidden_and_backups() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("nested/deeper")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("nested/b.txt"), "b").unwrap();
    fs::write(root.join("nested/deeper/c.txt"), "c").unwrap();
    fs::write(root.join("nested/b.txt~"), "backup").unwrap();
    fs::write(root.join(".hidden"), "hidden").unwrap();
    fs::write(root.join(".git/config"), "git").unwrap();

    let files = collect_files(root).unwrap();
    let relative: Vec<String> = files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(relative, vec!["a.txt", "nested/b.txt", "nested/deeper/c.txt"]);
}

#[test]
fn test_collect_files_walks_hidden_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join(".corpus");
    fs::create_dir_all(root.join("b")).unwrap();
    fs::write(root.join("b/2.txt"), "2").unwrap();
    fs::write(root.join("a.txt"), "1").unwrap();

    let files = collect_files(&root).unwrap();
    assert_eq!(files, vec![root.join("a.txt"), root.join("b/2.txt")]);
}

#[test]
fn test_collect_files_missing_root() {
    let err = collect_files(Path::new("/nonexistent/corpus")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/corpus"));
}

#[test]
fn test_mirror_path() {
    let mirrored = mirror_path(Path::new("/in"), Path::new("/in/x/y.txt"), Path::new("/out"));
    assert_eq!(mirrored, Path::new("/out/x/y.txt"));
}

#[test]
fn test_text_lines() {
    let segmenter = MyanmarSegmenter::new();
    let processor = LineProcessor::new(&segmenter, OutputFormat::Text);
    assert_eq!(processor.process(0, &format!("  {}\t", MYANMAR)).unwrap(), MYANMAR_SEGMENTED);

    let text = format!("{}\n\n{}\n", MYANMAR, MYANMAR);
    let lines = processor.process_text(&text, None).unwrap();
    assert_eq!(lines, vec![MYANMAR_SEGMENTED, "", MYANMAR_SEGMENTED]);

    let limited = processor.process_text(&text, Some(1)).unwrap();
    assert_eq!(limited, vec![MYANMAR_SEGMENTED]);
}

#[test]
fn test_jsonl_lines() {
    let segmenter = MyanmarSegmenter::new();
    let processor = LineProcessor::new(&segmenter, OutputFormat::Jsonl);
    let line = processor.process(7, &format!("{}abc", MYANMAR)).unwrap();
    let record: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(record["id"], 7);
    assert_eq!(record["input"], format!("{}abc", MYANMAR));
    let segments: Vec<&str> = record["segments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert_eq!(segments, vec!["\u{1019}\u{103C}\u{1014}\u{103A}", "\u{1019}\u{102C}", "abc"]);
}

#[test]
fn test_category_lines() {
    let segmenter = MyanmarSegmenter::new();
    let text_processor = LineProcessor::new(&segmenter, OutputFormat::Text).categories(true);
    assert_eq!(text_processor.process(0, "ICCVCA").unwrap(), "I|C|CVCA");
    assert!(text_processor.process(0, "ICQ").is_err());

    let json_processor = LineProcessor::new(&segmenter, OutputFormat::Jsonl).categories(true);
    let record: Value = serde_json::from_str(&json_processor.process(0, "ICCVCA").unwrap()).unwrap();
    assert_eq!(record["segments"], serde_json::json!(["I", "C", "CVCA"]));
}

#[test]
fn test_config() {
    let config: SegmenterConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SegmenterConfig::default());
    assert_eq!(MyanmarSegmenter::from_config(&config).unwrap().separator(), "|");

    let config: SegmenterConfig = serde_json::from_str(r#"{"separator": "@@"}"#).unwrap();
    let segmenter = MyanmarSegmenter::from_config(&config).unwrap();
    assert_eq!(segmenter.segment_categories("CMCACV").unwrap(), "CMCA@@CV");

    let config = SegmenterConfig { separator: String::new() };
    assert!(MyanmarSegmenter::from_config(&config).is_err());
}
