/*!
 * Tests for error types
 */

use yadtwai::errors::{AppError, ProviderError, TranslationError};

/// Test the document-level failure message
#[test]
fn test_emptyTranslationResult_display_shouldNameLanguage() {
    let error = TranslationError::EmptyTranslationResult { language: "hi".to_string() };
    assert_eq!(error.to_string(), "Translation failed for hi: no text was produced");
}

/// Test provider error messages
#[test]
fn test_providerError_display_shouldCarryDetails() {
    let error = ProviderError::ApiError { status_code: 429, message: "slow down".to_string() };
    assert_eq!(error.to_string(), "API responded with error: 429 - slow down");
    assert_eq!(ProviderError::Timeout(120).to_string(), "Request timed out after 120 seconds");
}

/// Test conversions into the application error
#[test]
fn test_appError_from_shouldWrapSources() {
    let app: AppError = TranslationError::UnsupportedLanguage("xx".to_string()).into();
    assert!(matches!(app, AppError::Translation(TranslationError::UnsupportedLanguage(_))));

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    assert!(matches!(AppError::from(io), AppError::File(ref message) if message == "missing"));

    let any = anyhow::anyhow!("boom");
    assert!(matches!(AppError::from(any), AppError::Unknown(ref message) if message == "boom"));
}

/// Test that translation errors survive a trip through anyhow
#[test]
fn test_translationError_throughAnyhow_shouldDowncast() {
    let error: anyhow::Error = TranslationError::EmptyTranslationResult { language: "es".to_string() }.into();
    let error = error.context("Translation into 'es' failed");
    assert!(matches!(
        error.downcast_ref::<TranslationError>(),
        Some(TranslationError::EmptyTranslationResult { .. })
    ));
}
