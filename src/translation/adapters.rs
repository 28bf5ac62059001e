/*!
 * Backend adapters.
 *
 * An adapter wraps one backend client behind a uniform
 * `translate(text, target_lang) -> Option<String>` boundary. Whatever goes
 * wrong inside (missing credentials, timeouts, HTTP errors, malformed
 * payloads, unsupported languages, blank output) is logged and reported as
 * `None`; nothing crosses the boundary as an error.
 */

use async_trait::async_trait;
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{LocalModelConfig, RemoteConfig, TranslationCommonConfig};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::featherless::{ChatCompletionRequest, Featherless};
use crate::providers::nllb::NllbServer;
use crate::providers::{Provider, Seq2SeqModel, Seq2SeqParams};

/// Result of invoking one adapter on one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationAttempt {
    /// Non-blank translated text
    Success(String),
    /// The backend answered with nothing usable
    Empty,
    /// The backend could not be reached or failed
    Error(String),
}

impl TranslationAttempt {
    /// Classify raw backend output
    pub fn from_output(output: String) -> Self {
        if output.trim().is_empty() {
            Self::Empty
        } else {
            Self::Success(output)
        }
    }

    /// Collapse to the adapter contract
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Success(text) => Some(text),
            Self::Empty | Self::Error(_) => None,
        }
    }
}

impl From<ProviderError> for TranslationAttempt {
    fn from(error: ProviderError) -> Self {
        Self::Error(error.to_string())
    }
}

/// A backend capable of translating one chunk of text
#[async_trait]
pub trait TranslationAdapter: Send + Sync {
    /// Backend name used in logs and reports
    fn name(&self) -> &str;

    /// Try to translate `text` into `target_lang`
    async fn attempt(&self, text: &str, target_lang: &str) -> TranslationAttempt;

    /// Translate, logging and swallowing every failure
    async fn translate(&self, text: &str, target_lang: &str) -> Option<String> {
        match self.attempt(text, target_lang).await {
            TranslationAttempt::Success(translated) => Some(translated),
            TranslationAttempt::Empty => {
                debug!("{} returned an empty translation for '{}'", self.name(), target_lang);
                None
            }
            TranslationAttempt::Error(message) => {
                warn!("{} error: {}", self.name(), message);
                None
            }
        }
    }
}

/// Run a backend call under a time budget
async fn with_timeout<T, F>(timeout_secs: u64, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(timeout_secs)),
    }
}

/// Cut `text` after its first `max_tokens` whitespace-separated tokens
pub fn truncate_to_tokens(text: &str, max_tokens: usize) -> &str {
    let mut count = 0;
    let mut in_token = false;

    for (offset, c) in text.char_indices() {
        if c.is_whitespace() {
            in_token = false;
        } else if !in_token {
            in_token = true;
            count += 1;
            if count > max_tokens {
                return text[..offset].trim_end();
            }
        }
    }

    text
}

/// Remote chat-completion adapter (primary)
pub struct RemoteChatAdapter {
    /// `None` when the HTTP client could not be built
    client: Option<Featherless>,
    config: RemoteConfig,
    system_prompt: String,
    temperature: f32,
}

impl RemoteChatAdapter {
    pub fn new(config: &RemoteConfig, common: &TranslationCommonConfig) -> Self {
        let client = match Featherless::new(config.api_key.clone(), config.endpoint.clone(), config.timeout_secs) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Featherless disabled: {}", e);
                None
            }
        };

        Self {
            client,
            config: config.clone(),
            system_prompt: common.system_prompt.clone(),
            temperature: common.temperature,
        }
    }

    /// Build the chat request for one chunk
    pub fn build_request(&self, text: &str, target_lang: &str) -> ChatCompletionRequest {
        let language_name = language_utils::display_name(target_lang);
        ChatCompletionRequest::new(self.config.model.clone())
            .add_message("system", self.system_prompt.clone())
            .add_message("user", format!("Translate to {}:\n\n{}", language_name, text))
            .temperature(self.temperature)
    }
}

#[async_trait]
impl TranslationAdapter for RemoteChatAdapter {
    fn name(&self) -> &str {
        "Featherless"
    }

    async fn attempt(&self, text: &str, target_lang: &str) -> TranslationAttempt {
        if !self.config.is_configured() {
            return ProviderError::NotConfigured("FEATHERLESS_API_KEY / FEATHERLESS_MODEL_ID unset".to_string()).into();
        }

        let Some(client) = &self.client else {
            return ProviderError::NotConfigured("HTTP client unavailable".to_string()).into();
        };

        let request = self.build_request(text, target_lang);
        match with_timeout(self.config.timeout_secs, client.complete(request)).await {
            Ok(response) => TranslationAttempt::from_output(Featherless::extract_text(&response)),
            Err(e) => e.into(),
        }
    }
}

/// Local sequence-to-sequence adapter (fallback)
pub struct LocalSeq2SeqAdapter {
    /// `None` when the model failed to load or was disabled
    model: Option<Arc<dyn Seq2SeqModel>>,
    max_input_tokens: usize,
    max_length: usize,
    num_beams: usize,
    timeout_secs: u64,
}

impl LocalSeq2SeqAdapter {
    /// Wrap an already loaded model (or none)
    pub fn new(model: Option<Arc<dyn Seq2SeqModel>>, config: &LocalModelConfig) -> Self {
        Self {
            model,
            max_input_tokens: config.max_input_tokens,
            max_length: config.max_length,
            num_beams: config.num_beams,
            timeout_secs: config.timeout_secs,
        }
    }

    /// Load the configured model once; any failure disables the adapter
    pub async fn load(config: &LocalModelConfig) -> Self {
        if !config.enabled {
            info!("Local model disabled by configuration");
            return Self::new(None, config);
        }

        let server = match NllbServer::new(&config.endpoint, config.model.clone(), config.timeout_secs) {
            Ok(server) => server,
            Err(e) => {
                warn!("NLLB load error: {}", e);
                return Self::new(None, config);
            }
        };

        match with_timeout(config.health_timeout_secs, server.test_connection()).await {
            Ok(()) => {
                info!("NLLB loaded successfully ({})", config.model);
                Self::new(Some(Arc::new(server)), config)
            }
            Err(e) => {
                warn!("NLLB load error: {}", e);
                Self::new(None, config)
            }
        }
    }

    /// Whether a model is available
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }
}

#[async_trait]
impl TranslationAdapter for LocalSeq2SeqAdapter {
    fn name(&self) -> &str {
        "NLLB"
    }

    async fn attempt(&self, text: &str, target_lang: &str) -> TranslationAttempt {
        let Some(model) = &self.model else {
            return ProviderError::NotConfigured("local model not loaded".to_string()).into();
        };

        let Some(target_tag) = language_utils::nllb_language_tag(target_lang) else {
            return TranslationAttempt::Error(format!("no local model tag for '{}'", target_lang));
        };

        let params = Seq2SeqParams {
            target_tag: target_tag.to_string(),
            max_length: self.max_length,
            num_beams: self.num_beams,
        };
        let input = truncate_to_tokens(text, self.max_input_tokens);
        debug!("{} generating {} with {} input chars", model.model_name(), target_tag, input.len());

        match with_timeout(self.timeout_secs, model.generate(input, &params)).await {
            Ok(output) => TranslationAttempt::from_output(output),
            Err(e) => e.into(),
        }
    }
}
