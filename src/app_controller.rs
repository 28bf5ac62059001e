use anyhow::{anyhow, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::rendering::{self, DocumentRenderer, FontRegistry, RenderRequest};
use crate::translation::{BackendTag, TranslationPipeline};

// @module: Application controller for document translation

/// File name of the run report written next to the artifacts
pub const REPORT_FILE_NAME: &str = "report.json";

/// Per-language entry of the run report
#[derive(Debug, Clone, Serialize)]
pub struct LanguageReport {
    pub language: String,
    pub language_name: String,
    /// Backend that produced the last chunk
    pub model: String,
    pub used_model: BackendTag,
    /// Chunks serviced per backend tag
    pub backend_usage: BTreeMap<String, usize>,
    /// Artifact paths keyed by extension
    pub files: BTreeMap<String, PathBuf>,
    /// Every artifact already existed and overwriting was not forced
    pub skipped: bool,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    pipeline: TranslationPipeline,
    fonts: FontRegistry,
    renderers: Vec<Box<dyn DocumentRenderer>>,
}

impl Controller {
    /// Create a controller, loading the local model once
    pub async fn with_config(config: Config) -> Result<Self> {
        let pipeline = TranslationPipeline::from_config(&config.translation).await;
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Create a controller around an already built pipeline
    pub fn with_pipeline(config: Config, pipeline: TranslationPipeline) -> Self {
        let fonts = FontRegistry::new(&config.fonts_dir);
        Self {
            config,
            pipeline,
            fonts,
            renderers: rendering::default_renderers(),
        }
    }

    /// Replace the set of output renderers
    pub fn with_renderers(mut self, renderers: Vec<Box<dyn DocumentRenderer>>) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pipeline(&self) -> &TranslationPipeline {
        &self.pipeline
    }

    /// Translate `input` into every language and render the artifacts
    ///
    /// The first language that fails aborts the run.
    pub async fn run(
        &self,
        input_file: &Path,
        output_dir: &Path,
        languages: &[String],
        force_overwrite: bool,
    ) -> Result<Vec<LanguageReport>> {
        let start_time = Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        if languages.is_empty() {
            return Err(anyhow!("No target languages given"));
        }
        for language in languages {
            if language_utils::validate_language_code(language).is_err() {
                return Err(TranslationError::UnsupportedLanguage(language.clone()).into());
            }
        }

        FileManager::ensure_dir(output_dir)?;

        let raw = FileManager::read_bytes(input_file)?;
        let (text, encoding) = FileManager::decode_text(&raw);
        info!("Read {:?} ({} bytes, {:?})", input_file, raw.len(), encoding);

        let multi_progress = MultiProgress::new();
        let mut reports = Vec::with_capacity(languages.len());

        for language in languages {
            let language = language_utils::normalize_code(language);
            let report = self
                .translate_language(&text, &language, output_dir, force_overwrite, &multi_progress)
                .await
                .with_context(|| format!("Translation into '{}' failed", language))?;
            reports.push(report);
        }

        let report_path = output_dir.join(REPORT_FILE_NAME);
        let report_json = serde_json::to_string_pretty(&reports)
            .context("Failed to serialize translation report")?;
        FileManager::write_to_file(&report_path, &report_json)?;

        info!(
            "Translated into {} language(s) in {}. Report: {}",
            reports.len(),
            Self::format_duration(start_time.elapsed()),
            report_path.display()
        );

        Ok(reports)
    }

    /// Translate and render one language
    async fn translate_language(
        &self,
        text: &str,
        language: &str,
        output_dir: &Path,
        force_overwrite: bool,
        multi_progress: &MultiProgress,
    ) -> Result<LanguageReport> {
        let language_name = language_utils::display_name(language);
        let files: BTreeMap<String, PathBuf> = self
            .renderers
            .iter()
            .map(|renderer| {
                let format = renderer.format();
                (format.extension().to_string(), format.output_path(output_dir, language))
            })
            .collect();

        if !force_overwrite && !files.is_empty() && files.values().all(|path| path.exists()) {
            warn!("Skipping {}, outputs already exist (use -f to force overwrite)", language_name);
            return Ok(LanguageReport {
                language: language.to_string(),
                language_name,
                model: BackendTag::None.to_string(),
                used_model: BackendTag::None,
                backend_usage: BTreeMap::new(),
                files,
                skipped: true,
            });
        }

        let progress_bar = multi_progress.add(ProgressBar::new(0));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message(language_name.clone());

        info!("Translating into {}, please wait…", language_name);

        let pb = progress_bar.clone();
        let outcome = self
            .pipeline
            .translate_document_with_progress(text, language, move |completed, total| {
                pb.set_length(total as u64);
                pb.set_position(completed as u64);
            })
            .await;
        progress_bar.finish_and_clear();

        let outcome = outcome.ensure_non_empty()?;
        let model = self.pipeline.router().backend_name(outcome.used_model).to_string();

        let font = self.fonts.lookup(language);
        if !font.is_available() {
            warn!("Font file not found: {}", font.path.display());
        }

        let request = RenderRequest {
            text: &outcome.translated,
            language,
            language_name: &language_name,
            font: &font,
            backend: &model,
        };

        for renderer in &self.renderers {
            let path = &files[renderer.format().extension()];
            if path.exists() && !force_overwrite {
                warn!("Keeping existing {} (use -f to force overwrite)", path.display());
                continue;
            }
            renderer.render(&request, path)?;
            info!("Success: {}", path.display());
        }

        let backend_usage = outcome
            .backend_usage()
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();

        Ok(LanguageReport {
            language: language.to_string(),
            language_name,
            model,
            used_model: outcome.used_model,
            backend_usage,
            files,
            skipped: false,
        })
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
