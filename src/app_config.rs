use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language codes (ISO 639-1)
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    /// Directory receiving rendered outputs
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Directory holding the font files used by renderers
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Remote chat-completion service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RemoteConfig {
    /// API key; the backend is skipped when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Model id; the backend is skipped when empty
    #[serde(default = "String::new")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_remote_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Whether both credentials needed for a request are present
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.model.trim().is_empty()
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::new(),
            endpoint: default_remote_endpoint(),
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

/// Local sequence-to-sequence model configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocalModelConfig {
    /// Whether to try loading the local model at startup
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Model name served by the local inference server
    #[serde(default = "default_local_model")]
    pub model: String,

    /// Local inference server URL
    #[serde(default = "default_local_endpoint")]
    pub endpoint: String,

    /// Generation timeout in seconds
    #[serde(default = "default_local_timeout_secs")]
    pub timeout_secs: u64,

    /// Startup health check timeout in seconds
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    /// Input is truncated to this many tokens before generation
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,

    /// Upper bound on generated sequence length
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Beam width used for generation
    #[serde(default = "default_num_beams")]
    pub num_beams: usize,
}

impl Default for LocalModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_local_model(),
            endpoint: default_local_endpoint(),
            timeout_secs: default_local_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
            max_input_tokens: default_max_input_tokens(),
            max_length: default_max_length(),
            num_beams: default_num_beams(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TranslationConfig {
    /// Primary backend
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Fallback backend
    #[serde(default)]
    pub local: LocalModelConfig,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all backends
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt sent to the chat-completion backend
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Temperature parameter for text generation
    /// Zero keeps the remote backend deterministic
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Number of chunks routed at the same time (1 = sequential)
    #[serde(default = "default_max_concurrent_chunks")]
    pub max_concurrent_chunks: usize,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
            max_concurrent_chunks: default_max_concurrent_chunks(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_languages() -> Vec<String> {
    vec!["hi".to_string(), "es".to_string(), "de".to_string()]
}

fn default_output_dir() -> String {
    "outputs".to_string()
}

fn default_fonts_dir() -> String {
    "fonts".to_string()
}

fn default_remote_endpoint() -> String {
    "https://api.featherless.ai/v1".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    120
}

fn default_local_model() -> String {
    "facebook/nllb-200-distilled-600M".to_string()
}

fn default_local_endpoint() -> String {
    "http://localhost:8008".to_string()
}

fn default_local_timeout_secs() -> u64 {
    300
}

fn default_health_timeout_secs() -> u64 {
    10
}

fn default_max_input_tokens() -> usize {
    2000
}

fn default_max_length() -> usize {
    3000
}

fn default_num_beams() -> usize {
    4
}

fn default_system_prompt() -> String {
    "Translate accurately. Preserve structure.".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

fn default_max_concurrent_chunks() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Write configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path.as_ref(), config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Override credentials and model settings from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override settings through a lookup function (used with the real environment)
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("FEATHERLESS_API_KEY") {
            self.translation.remote.api_key = key;
        }
        if let Some(model) = non_empty("FEATHERLESS_MODEL_ID") {
            self.translation.remote.model = model;
        }
        if let Some(model) = non_empty("HF_NLLB_MODEL") {
            self.translation.local.model = model;
        }
        if let Some(endpoint) = non_empty("NLLB_ENDPOINT") {
            self.translation.local.endpoint = endpoint;
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }

        for code in &self.target_languages {
            crate::language_utils::validate_language_code(code)?;
        }

        if self.translation.common.max_concurrent_chunks == 0 {
            return Err(anyhow!("max_concurrent_chunks must be at least 1"));
        }

        let local = &self.translation.local;
        if self.translation.remote.timeout_secs == 0 || local.timeout_secs == 0 || local.health_timeout_secs == 0 {
            return Err(anyhow!("Backend timeouts must be greater than zero"));
        }

        if self.translation.local.num_beams == 0 {
            return Err(anyhow!("num_beams must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_languages: default_target_languages(),
            output_dir: default_output_dir(),
            fonts_dir: default_fonts_dir(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
