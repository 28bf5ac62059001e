use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

/// Encodings tried, in order, when turning uploaded bytes into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf8Bom,
    Latin1,
}

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for a translated artifact, e.g. outputs/es_output.pdf
    pub fn generate_output_path<P: AsRef<Path>>(
        output_dir: P,
        target_language: &str,
        extension: &str,
    ) -> PathBuf {
        let extension = extension.trim_start_matches('.');
        output_dir
            .as_ref()
            .join(format!("{}_output.{}", target_language, extension))
    }

    /// Read a whole file into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Decode raw bytes trying UTF-8, UTF-8 with BOM, then Latin-1
    ///
    /// Latin-1 maps every byte to a code point, so the last step always succeeds.
    pub fn decode_text(raw: &[u8]) -> (String, TextEncoding) {
        if let Some(stripped) = raw.strip_prefix(b"\xEF\xBB\xBF") {
            if let Ok(text) = std::str::from_utf8(stripped) {
                return (text.to_string(), TextEncoding::Utf8Bom);
            }
        } else if let Ok(text) = std::str::from_utf8(raw) {
            return (text.to_string(), TextEncoding::Utf8);
        }

        let text: String = raw.iter().map(|&b| char::from(b)).collect();
        (text, TextEncoding::Latin1)
    }
}
