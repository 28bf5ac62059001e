/*!
 * Common test utilities for the yadtwai test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use yadtwai::translation::{FallbackRouter, TranslationAdapter, TranslationPipeline};


pub use mock_adapters::{MockSeq2SeqModel, ScriptedAdapter};

/// Route `log` output through env_logger (RUST_LOG) once per test binary
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Two-chapter English sample used across the suite
pub const SAMPLE_DOCUMENT: &str = "Chapter 1\nHello\nChapter 2\nWorld";

/// Spanish translations of the sample chapters
pub fn spanish_chapters() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Chapter 1\nHello", "Capítulo 1\nHola"),
        ("Chapter 2\nWorld", "Capítulo 2\nMundo"),
    ]
}

/// Router over two test adapters
pub fn router(primary: ScriptedAdapter, secondary: ScriptedAdapter) -> FallbackRouter {
    let primary: Arc<dyn TranslationAdapter> = Arc::new(primary);
    let secondary: Arc<dyn TranslationAdapter> = Arc::new(secondary);
    FallbackRouter::new(primary, secondary)
}

/// Pipeline over two test adapters
pub fn pipeline(primary: ScriptedAdapter, secondary: ScriptedAdapter, max_concurrent_chunks: usize) -> TranslationPipeline {
    TranslationPipeline::new(router(primary, secondary), max_concurrent_chunks)
}
