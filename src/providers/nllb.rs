use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{Provider, Seq2SeqModel, Seq2SeqParams};

/// Client for a locally hosted NLLB inference server
///
/// The server owns the model weights and tokenizer; this client only ships
/// text in and generated text out.
#[derive(Debug)]
pub struct NllbServer {
    /// Base URL of the inference server
    base_url: Url,
    /// Model name the server is expected to serve
    model: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the inference server
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Input text
    text: String,
    /// Language tag forced as the first decoder token
    forced_bos_language: String,
    /// Maximum generated sequence length
    max_length: usize,
    /// Beam width
    num_beams: usize,
    /// Drop special tokens when decoding
    skip_special_tokens: bool,
}

/// Generate response from the inference server
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Decoded output text
    pub translation: String,
    /// Number of generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_tokens: Option<u64>,
}

/// Health response of the inference server
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    /// Model loaded by the server
    #[serde(default)]
    pub model: Option<String>,
    /// Server status string
    #[serde(default)]
    pub status: Option<String>,
}

impl GenerationRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, text: impl Into<String>, params: &Seq2SeqParams) -> Self {
        Self {
            model: model.into(),
            text: text.into(),
            forced_bos_language: params.target_tag.clone(),
            max_length: params.max_length,
            num_beams: params.num_beams,
            skip_special_tokens: true,
        }
    }
}

impl NllbServer {
    /// Create a new client; fails on an unparsable endpoint or an unbuildable HTTP client
    pub fn new(endpoint: &str, model: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let endpoint = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("http://{}", endpoint)
        };

        let base_url = Url::parse(&format!("{}/", endpoint.trim_end_matches('/')))
            .map_err(|e| ProviderError::NotConfigured(format!("invalid NLLB endpoint {}: {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            model: model.into(),
            client,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::RequestFailed(format!("invalid URL path {}: {}", path, e)))
    }

    /// Query the server health endpoint
    pub async fn health(&self) -> Result<HealthResponse, ProviderError> {
        let response = self.client.get(self.url("health")?).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError {
                status_code: response.status().as_u16(),
                message: "health check failed".to_string(),
            });
        }

        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl Provider for NllbServer {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = self.url("translate")?;
        debug!("NLLB request to {} ({} beams)", url, request.num_beams);

        let response = self.client.post(url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("NLLB server error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse NLLB response: {}", e)))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let health = self.health().await?;

        if let Some(served) = health.model.as_deref() {
            if served != self.model {
                return Err(ProviderError::NotConfigured(format!(
                    "server runs {} but {} was requested",
                    served, self.model
                )));
            }
        }

        match health.status.as_deref() {
            None | Some("ok") | Some("ready") => Ok(()),
            Some(other) => Err(ProviderError::ConnectionError(format!("server not ready: {}", other))),
        }
    }

    fn extract_text(response: &GenerationResponse) -> String {
        response.translation.clone()
    }
}

#[async_trait]
impl Seq2SeqModel for NllbServer {
    async fn generate(&self, text: &str, params: &Seq2SeqParams) -> Result<String, ProviderError> {
        let request = GenerationRequest::new(self.model.clone(), text, params);
        let response = self.complete(request).await?;
        Ok(Self::extract_text(&response))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
