use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Target languages are addressed by ISO 639-1 (2-letter) codes everywhere in
/// the pipeline. This module validates them, resolves display names for
/// prompts and reports, and maps them to the tags the local model expects.

/// Two-letter code to NLLB-200 language tag
const NLLB_LANGUAGE_TAGS: &[(&str, &str)] = &[
    ("hi", "hin_Deva"),
    ("es", "spa_Latn"),
    ("de", "deu_Latn"),
];

/// Normalize a user supplied code (trim + lowercase)
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Validate that a code is a known ISO 639-1 code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized_code = normalize_code(code);

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = normalize_code(code);
    let lang = Language::from_639_1(&normalized_code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Language name for prompts and reports, falling back to the raw code
pub fn display_name(code: &str) -> String {
    get_language_name(code).unwrap_or_else(|_| code.to_string())
}

/// Look up the local model's language tag for a two-letter code
pub fn nllb_language_tag(code: &str) -> Option<&'static str> {
    let normalized_code = normalize_code(code);
    NLLB_LANGUAGE_TAGS
        .iter()
        .find(|(iso, _)| *iso == normalized_code)
        .map(|(_, tag)| *tag)
}

/// Codes the local model can translate into
pub fn local_model_languages() -> impl Iterator<Item = (&'static str, &'static str)> {
    NLLB_LANGUAGE_TAGS.iter().copied()
}
