/*!
 * Document translation with backend fallback.
 *
 * This module turns a raw document into a translated one. It is split into
 * several submodules:
 *
 * - `chapters`: Splitting a document into chapter chunks
 * - `adapters`: Remote and local backend adapters behind one boundary
 * - `router`: Per-chunk primary/secondary fallback state machine
 * - `pipeline`: Ordered aggregation and Unicode normalization
 */

// Re-export main types for easier usage
pub use self::adapters::{
    LocalSeq2SeqAdapter, RemoteChatAdapter, TranslationAdapter, TranslationAttempt,
};
pub use self::chapters::{split_into_chapters, Chunk, Document};
pub use self::pipeline::{ChunkResult, TranslationOutcome, TranslationPipeline};
pub use self::router::{BackendTag, FallbackRouter, RouteOutcome, RouterState};

// Submodules
pub mod adapters;
pub mod chapters;
pub mod pipeline;
pub mod router;
