/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::Path;
use yadtwai::file_utils::{FileManager, TextEncoding};

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_fileExists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "book.txt", "content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test the per-language output naming
#[test]
fn test_generateOutputPath_shouldUseLanguageOutputName() {
    let path = FileManager::generate_output_path("/tmp/out", "de", ".docx");
    assert_eq!(path, Path::new("/tmp/out/de_output.docx"));
}

/// Test that writing creates missing parent directories
#[test]
fn test_writeToFile_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("deeper").join("es_output.txt");

    FileManager::write_to_file(&path, "Hola")?;

    assert_eq!(FileManager::read_bytes(&path)?, b"Hola");
    Ok(())
}

/// Test reading a missing file
#[test]
fn test_readBytes_withMissingFile_shouldFail() {
    assert!(FileManager::read_bytes("definitely_missing_input_12345.txt").is_err());
}

/// Test plain UTF-8 decoding
#[test]
fn test_decodeText_withUtf8_shouldKeepText() {
    let (text, encoding) = FileManager::decode_text("अध्याय 1\nनमस्ते".as_bytes());
    assert_eq!(text, "अध्याय 1\nनमस्ते");
    assert_eq!(encoding, TextEncoding::Utf8);
}

/// Test that a byte order mark is stripped
#[test]
fn test_decodeText_withBom_shouldStripIt() {
    let (text, encoding) = FileManager::decode_text(b"\xEF\xBB\xBFChapter 1");
    assert_eq!(text, "Chapter 1");
    assert_eq!(encoding, TextEncoding::Utf8Bom);
}

/// Test the Latin-1 fallback for bytes that are not UTF-8
#[test]
fn test_decodeText_withLatin1_shouldMapBytes() {
    let (text, encoding) = FileManager::decode_text(b"Stra\xDFe caf\xE9");
    assert_eq!(text, "Straße café");
    assert_eq!(encoding, TextEncoding::Latin1);
}

/// Test that empty input decodes to empty text
#[test]
fn test_decodeText_withEmptyInput_shouldBeEmptyUtf8() {
    assert_eq!(FileManager::decode_text(b""), (String::new(), TextEncoding::Utf8));
}
