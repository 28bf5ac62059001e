/*!
 * Document-level translation pipeline.
 *
 * Splits a document into chapter chunks, routes every chunk through the
 * fallback router, keeps the original text for chunks no backend could
 * translate, and joins the results in document order. NFC normalization is
 * applied once, to the joined text.
 */

use futures::stream::{self, StreamExt};
use icu_normalizer::ComposingNormalizerBorrowed;
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::app_config::TranslationConfig;
use crate::errors::TranslationError;

use super::adapters::{LocalSeq2SeqAdapter, RemoteChatAdapter};
use super::chapters::{Chunk, Document};
use super::router::{BackendTag, FallbackRouter, RouteOutcome};

/// Separator placed between translated chunks
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Canonical composition (NFC)
pub fn normalize_nfc(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc().normalize(text).into_owned()
}

/// Final outcome for one chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkResult {
    pub index: usize,
    /// Translated text, or the original chunk text when every backend failed
    pub text: String,
    pub backend: BackendTag,
}

/// Document-level result for one target language
#[derive(Debug, Clone, Serialize)]
pub struct TranslationOutcome {
    pub target_language: String,
    /// NFC-normalized translated document
    pub translated: String,
    /// Backend of the last chunk in document order (`none` for empty input)
    pub used_model: BackendTag,
    pub chunk_results: Vec<ChunkResult>,
}

impl TranslationOutcome {
    /// Whether the aggregated text has no visible content
    pub fn is_empty(&self) -> bool {
        self.translated.trim().is_empty()
    }

    /// Number of chunks serviced by each backend
    pub fn backend_usage(&self) -> BTreeMap<BackendTag, usize> {
        let mut usage = BTreeMap::new();
        for result in &self.chunk_results {
            *usage.entry(result.backend).or_insert(0) += 1;
        }
        usage
    }

    /// Turn total failure (nothing translated at all) into an error
    pub fn ensure_non_empty(self) -> Result<Self, TranslationError> {
        if self.is_empty() {
            return Err(TranslationError::EmptyTranslationResult {
                language: self.target_language,
            });
        }
        Ok(self)
    }
}

/// Drives the fallback router over whole documents
#[derive(Debug, Clone)]
pub struct TranslationPipeline {
    router: Arc<FallbackRouter>,
    max_concurrent_chunks: usize,
}

impl TranslationPipeline {
    pub fn new(router: FallbackRouter, max_concurrent_chunks: usize) -> Self {
        Self {
            router: Arc::new(router),
            max_concurrent_chunks: max_concurrent_chunks.max(1),
        }
    }

    /// Build the remote-then-local pipeline, loading the local model once
    pub async fn from_config(config: &TranslationConfig) -> Self {
        let primary = RemoteChatAdapter::new(&config.remote, &config.common);
        let secondary = LocalSeq2SeqAdapter::load(&config.local).await;
        let router = FallbackRouter::new(Arc::new(primary), Arc::new(secondary));
        Self::new(router, config.common.max_concurrent_chunks)
    }

    pub fn router(&self) -> &FallbackRouter {
        &self.router
    }

    /// Translate a whole document into one language
    pub async fn translate_document(&self, text: &str, target_lang: &str) -> TranslationOutcome {
        self.translate_document_with_progress(text, target_lang, |_, _| {}).await
    }

    /// Translate a whole document, reporting `(completed, total)` after each chunk
    pub async fn translate_document_with_progress<P>(
        &self,
        text: &str,
        target_lang: &str,
        progress_callback: P,
    ) -> TranslationOutcome
    where
        P: Fn(usize, usize) + Send + Sync,
    {
        let document = Document::new(text);
        let total = document.chunk_count();
        debug!("Translating {} chunk(s) into '{}'", total, target_lang);

        let mut routed: Vec<(Chunk<'_>, RouteOutcome)> = Vec::with_capacity(total);

        if self.max_concurrent_chunks == 1 {
            for chunk in document.chunks() {
                let outcome = self.router.route(chunk.text, target_lang).await;
                routed.push((chunk, outcome));
                progress_callback(routed.len(), total);
            }
        } else {
            let router = self.router.as_ref();
            let progress_callback = &progress_callback;
            let completed = std::sync::atomic::AtomicUsize::new(0);
            let completed = &completed;

            routed = stream::iter(document.chunks())
                .map(|chunk| async move {
                    let outcome = router.route(chunk.text, target_lang).await;
                    let done = completed.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
                    progress_callback(done, total);
                    (chunk, outcome)
                })
                .buffer_unordered(self.max_concurrent_chunks)
                .collect()
                .await;

            // Sort results by chunk index to restore document order
            routed.sort_by_key(|(chunk, _)| chunk.index);
        }

        let chunk_results: Vec<ChunkResult> = routed
            .into_iter()
            .map(|(chunk, outcome)| {
                let text = outcome.text.unwrap_or_else(|| {
                    warn!(
                        "All backends failed for chunk {} ('{}'), keeping original text",
                        chunk.index + 1,
                        target_lang
                    );
                    chunk.text.to_string()
                });
                ChunkResult {
                    index: chunk.index,
                    text,
                    backend: outcome.backend,
                }
            })
            .collect();

        let used_model = chunk_results
            .last()
            .map_or(BackendTag::None, |result| result.backend);

        let joined = chunk_results
            .iter()
            .map(|result| result.text.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR);

        TranslationOutcome {
            target_language: target_lang.to_string(),
            translated: normalize_nfc(&joined),
            used_model,
            chunk_results,
        }
    }
}
