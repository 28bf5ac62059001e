/*!
 * Tests for the per-chunk fallback router
 */

use std::sync::Arc;

use yadtwai::translation::{
    BackendTag, FallbackRouter, RouteOutcome, RouterState, TranslationAdapter, TranslationAttempt,
};

use crate::common::ScriptedAdapter;

fn shared(adapter: ScriptedAdapter) -> Arc<ScriptedAdapter> {
    Arc::new(adapter)
}

fn build(primary: &Arc<ScriptedAdapter>, secondary: &Arc<ScriptedAdapter>) -> FallbackRouter {
    let primary: Arc<dyn TranslationAdapter> = primary.clone();
    let secondary: Arc<dyn TranslationAdapter> = secondary.clone();
    FallbackRouter::new(primary, secondary)
}

/// Test that a successful primary short-circuits the secondary
#[tokio::test]
async fn test_route_withPrimarySuccess_shouldNotCallSecondary() {
    let primary = shared(ScriptedAdapter::mapping("remote", &[("Hello", "Hola")]));
    let secondary = shared(ScriptedAdapter::upper("local"));
    let router = build(&primary, &secondary);

    let outcome = router.route("Hello", "es").await;

    assert_eq!(outcome, RouteOutcome { text: Some("Hola".to_string()), backend: BackendTag::Primary });
    assert_eq!(primary.call_count(), 1);
    assert_eq!(secondary.call_count(), 0);
}

/// Test that a failing primary falls back to the secondary
#[tokio::test]
async fn test_route_withPrimaryError_shouldUseSecondary() {
    let primary = shared(ScriptedAdapter::failing("remote"));
    let secondary = shared(ScriptedAdapter::upper("local"));
    let router = build(&primary, &secondary);

    let outcome = router.route("Hello", "de").await;

    assert_eq!(outcome.backend, BackendTag::Secondary);
    assert_eq!(outcome.text.as_deref(), Some("[de] HELLO"));
    assert_eq!(primary.call_count(), 1);
    assert_eq!(secondary.call_count(), 1);
}

/// Test that blank primary output counts as a failure
#[tokio::test]
async fn test_route_withBlankPrimary_shouldUseSecondary() {
    let primary = shared(ScriptedAdapter::blank("remote"));
    let secondary = shared(ScriptedAdapter::mapping("local", &[("Hello", "Hallo")]));
    let router = build(&primary, &secondary);

    let outcome = router.route("Hello", "de").await;

    assert_eq!(outcome.backend, BackendTag::Secondary);
    assert_eq!(outcome.text.as_deref(), Some("Hallo"));
}

/// Test that whitespace-only success text is still rejected by the router
#[tokio::test]
async fn test_route_withWhitespaceSuccess_shouldNotBeAccepted() {
    let primary = shared(ScriptedAdapter::new("remote", |_, _| TranslationAttempt::Success(" \t".to_string())));
    let secondary = shared(ScriptedAdapter::failing("local"));
    let router = build(&primary, &secondary);

    let outcome = router.route("Hello", "hi").await;

    assert_eq!(outcome, RouteOutcome { text: None, backend: BackendTag::None });
}

/// Test that total failure ends in the `none` tag without text
#[tokio::test]
async fn test_route_withBothFailing_shouldReturnNone() {
    let primary = shared(ScriptedAdapter::failing("remote"));
    let secondary = shared(ScriptedAdapter::blank("local"));
    let router = build(&primary, &secondary);

    let outcome = router.route("Hello", "hi").await;

    assert_eq!(outcome.text, None);
    assert_eq!(outcome.backend, BackendTag::None);
    assert_eq!(primary.call_count(), 1);
    assert_eq!(secondary.call_count(), 1);
}

/// Test the individual state transitions
#[tokio::test]
async fn test_step_shouldFollowStateMachine() {
    let primary = shared(ScriptedAdapter::failing("remote"));
    let secondary = shared(ScriptedAdapter::upper("local"));
    let router = build(&primary, &secondary);

    let state = router.step(RouterState::Start, "a", "es").await;
    assert_eq!(state, RouterState::TryPrimary);
    assert_eq!(primary.call_count(), 0);

    let state = router.step(state, "a", "es").await;
    assert_eq!(state, RouterState::TrySecondary);

    let state = router.step(state, "a", "es").await;
    let done = RouterState::Done(RouteOutcome { text: Some("[es] A".to_string()), backend: BackendTag::Secondary });
    assert_eq!(state, done);

    // Done is terminal
    assert_eq!(router.step(state, "a", "es").await, done);
    assert_eq!(secondary.call_count(), 1);
}

/// Test backend naming for reports
#[test]
fn test_backendName_shouldResolveAdapterNames() {
    let router = build(&shared(ScriptedAdapter::failing("Featherless")), &shared(ScriptedAdapter::failing("NLLB")));
    assert_eq!(router.backend_name(BackendTag::Primary), "Featherless");
    assert_eq!(router.backend_name(BackendTag::Secondary), "NLLB");
    assert_eq!(router.backend_name(BackendTag::None), "none");
    assert_eq!(BackendTag::Secondary.to_string(), "secondary");
    assert_eq!(serde_json::to_string(&BackendTag::Primary).unwrap(), "\"primary\"");
}
