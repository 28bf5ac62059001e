/*!
 * # YADTwAI - Yet Another Document Translator with AI
 *
 * A Rust library for translating long text documents chapter by chapter.
 *
 * ## Features
 *
 * - Split documents into chapter chunks without losing a byte
 * - Translate every chunk with a remote chat-completion model
 * - Fall back to a local NLLB model when the remote call fails
 * - Keep the original text for chunks no backend could translate
 * - Bounded concurrency with document order preserved
 * - Unicode NFC normalization of the final text
 * - Text, XHTML, DOCX and EPUB rendering with per-language fonts
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: Chapter splitting, adapters, fallback routing and aggregation:
 *   - `translation::chapters`: Chapter splitter
 *   - `translation::adapters`: Remote and local backend adapters
 *   - `translation::router`: Per-chunk fallback state machine
 *   - `translation::pipeline`: Document-level aggregation
 * - `providers`: HTTP clients for the backends:
 *   - `providers::featherless`: OpenAI-compatible chat completions
 *   - `providers::nllb`: Local NLLB inference server
 * - `rendering`: Output artifacts, fonts and book layout
 * - `file_utils`: File system operations and input decoding
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod translation;
pub mod rendering;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, LanguageReport};
pub use translation::{BackendTag, FallbackRouter, TranslationOutcome, TranslationPipeline};
pub use language_utils::{get_language_name, nllb_language_tag};
pub use errors::{AppError, ProviderError, TranslationError};
