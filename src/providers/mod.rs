/*!
 * Client implementations for the translation backends.
 *
 * - `featherless`: OpenAI-compatible chat-completion API (remote, primary)
 * - `nllb`: locally hosted NLLB sequence-to-sequence server (local, fallback)
 *
 * Clients return `ProviderError` freely; it is the adapters in
 * `translation::adapters` that turn every failure into "no translation".
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all backend clients
///
/// This trait defines the interface that all client implementations must follow,
/// allowing them to be driven and tested the same way.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// Generation settings for a sequence-to-sequence model call
#[derive(Debug, Clone, PartialEq)]
pub struct Seq2SeqParams {
    /// Model language tag forced as the first generated token (e.g. `spa_Latn`)
    pub target_tag: String,
    /// Upper bound on the generated sequence length
    pub max_length: usize,
    /// Beam width
    pub num_beams: usize,
}

/// A loaded sequence-to-sequence translation model
///
/// Implementations hold their weights or sessions internally and must be
/// callable from several chunk tasks at once.
#[async_trait]
pub trait Seq2SeqModel: Send + Sync + Debug {
    /// Generate a translation for already truncated input text
    async fn generate(&self, text: &str, params: &Seq2SeqParams) -> Result<String, ProviderError>;

    /// Model identifier used in logs
    fn model_name(&self) -> &str;
}

pub mod featherless;
pub mod nllb;
