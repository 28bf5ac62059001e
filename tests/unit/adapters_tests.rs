/*!
 * Tests for the remote and local backend adapters
 */

use std::sync::Arc;
use std::time::Duration;

use yadtwai::app_config::{LocalModelConfig, RemoteConfig, TranslationCommonConfig};
use yadtwai::providers::Seq2SeqModel;
use yadtwai::translation::adapters::truncate_to_tokens;
use yadtwai::translation::{LocalSeq2SeqAdapter, RemoteChatAdapter, TranslationAdapter, TranslationAttempt};

use crate::common::http_stub::{HttpStub, StubResponse};
use crate::common::MockSeq2SeqModel;

fn remote_config(endpoint: &str) -> RemoteConfig {
    RemoteConfig {
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        endpoint: endpoint.to_string(),
        timeout_secs: 5,
    }
}

fn local_adapter(model: Arc<MockSeq2SeqModel>, config: &LocalModelConfig) -> LocalSeq2SeqAdapter {
    let model: Arc<dyn Seq2SeqModel> = model;
    LocalSeq2SeqAdapter::new(Some(model), config)
}

/// Test a successful chat completion round
#[tokio::test]
async fn test_remoteAdapter_withChatReply_shouldReturnContent() {
    let stub = HttpStub::start(vec![StubResponse::json(
        200,
        r#"{"choices":[{"message":{"role":"assistant","content":"Hola"}}]}"#,
    )])
    .await;
    let adapter = RemoteChatAdapter::new(&remote_config(&stub.base_url), &TranslationCommonConfig::default());

    let result = adapter.translate("Hello", "es").await;
    let requests = stub.requests().await;

    assert_eq!(result.as_deref(), Some("Hola"));
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.starts_with("POST /chat/completions"));
    assert!(request.to_lowercase().contains("authorization: bearer test-key"));
    assert!(request.contains("Translate to Spanish:"));
    assert!(request.contains("Translate accurately. Preserve structure."));
    assert!(request.contains("\"model\":\"test-model\""));
}

/// Test that a legacy completion `text` field is accepted
#[tokio::test]
async fn test_remoteAdapter_withTextChoice_shouldFallBackToText() {
    let stub = HttpStub::start(vec![StubResponse::json(200, r#"{"choices":[{"text":"Hallo"}]}"#)]).await;
    let adapter = RemoteChatAdapter::new(&remote_config(&stub.base_url), &TranslationCommonConfig::default());

    assert_eq!(adapter.translate("Hello", "de").await.as_deref(), Some("Hallo"));
}

/// Test that HTTP errors become None
#[tokio::test]
async fn test_remoteAdapter_withServerError_shouldReturnNone() {
    let stub = HttpStub::start(vec![StubResponse::json(500, r#"{"error":"overloaded"}"#)]).await;
    let adapter = RemoteChatAdapter::new(&remote_config(&stub.base_url), &TranslationCommonConfig::default());

    let attempt = adapter.attempt("Hello", "es").await;
    assert!(matches!(attempt, TranslationAttempt::Error(ref message) if message.contains("500")));
}

/// Test that rejected credentials become None
#[tokio::test]
async fn test_remoteAdapter_withUnauthorized_shouldReturnNone() {
    let stub = HttpStub::start(vec![StubResponse::json(401, r#"{"error":"bad key"}"#)]).await;
    let adapter = RemoteChatAdapter::new(&remote_config(&stub.base_url), &TranslationCommonConfig::default());

    assert_eq!(adapter.translate("Hello", "es").await, None);
}

/// Test that a malformed payload becomes None
#[tokio::test]
async fn test_remoteAdapter_withMalformedPayload_shouldReturnNone() {
    let stub = HttpStub::start(vec![StubResponse::json(200, "this is not json")]).await;
    let adapter = RemoteChatAdapter::new(&remote_config(&stub.base_url), &TranslationCommonConfig::default());

    assert_eq!(adapter.translate("Hello", "es").await, None);
}

/// Test that a reply without choices is treated as empty
#[tokio::test]
async fn test_remoteAdapter_withNoChoices_shouldBeEmpty() {
    let stub = HttpStub::start(vec![StubResponse::json(200, r#"{"choices":[]}"#)]).await;
    let adapter = RemoteChatAdapter::new(&remote_config(&stub.base_url), &TranslationCommonConfig::default());

    assert_eq!(adapter.attempt("Hello", "es").await, TranslationAttempt::Empty);
}

/// Test that an unreachable server becomes None
#[tokio::test]
async fn test_remoteAdapter_withUnreachableServer_shouldReturnNone() {
    let adapter = RemoteChatAdapter::new(&remote_config("http://127.0.0.1:9"), &TranslationCommonConfig::default());
    assert_eq!(adapter.translate("Hello", "es").await, None);
}

/// Test that a missing model id disables the remote adapter
#[tokio::test]
async fn test_remoteAdapter_withoutModel_shouldNotCallServer() {
    let config = RemoteConfig {
        model: String::new(),
        ..remote_config("http://127.0.0.1:9")
    };
    let adapter = RemoteChatAdapter::new(&config, &TranslationCommonConfig::default());
    assert!(matches!(adapter.attempt("Hello", "es").await, TranslationAttempt::Error(ref message) if message.contains("not configured")));
}

/// Test that the local adapter forces the target tag and generation settings
#[tokio::test]
async fn test_localAdapter_withModel_shouldGenerateWithTargetTag() {
    let model = Arc::new(MockSeq2SeqModel::default());
    let adapter = local_adapter(model.clone(), &LocalModelConfig::default());

    let result = adapter.translate("Hello", "hi").await;

    assert_eq!(result.as_deref(), Some("<hin_Deva> Hello"));
    let received = model.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].1.target_tag, "hin_Deva");
    assert_eq!(received[0].1.max_length, 3000);
    assert_eq!(received[0].1.num_beams, 4);
    assert!(adapter.is_loaded());
}

/// Test that the local adapter truncates long input
#[tokio::test]
async fn test_localAdapter_withLongInput_shouldTruncate() {
    let model = Arc::new(MockSeq2SeqModel::default());
    let config = LocalModelConfig {
        max_input_tokens: 3,
        ..LocalModelConfig::default()
    };
    let adapter = local_adapter(model.clone(), &config);

    adapter.translate("one two three four five", "es").await;

    assert_eq!(model.received()[0].0, "one two three");
}

/// Test that a language without a local tag is not sent to the model
#[tokio::test]
async fn test_localAdapter_withUnmappedLanguage_shouldReturnNone() {
    let model = Arc::new(MockSeq2SeqModel::default());
    let adapter = local_adapter(model.clone(), &LocalModelConfig::default());

    assert_eq!(adapter.translate("Hello", "fr").await, None);
    assert!(model.received().is_empty());
}

/// Test that model errors become None
#[tokio::test]
async fn test_localAdapter_withFailingModel_shouldReturnNone() {
    let model = Arc::new(MockSeq2SeqModel::failing("out of memory"));
    let adapter = local_adapter(model, &LocalModelConfig::default());

    assert_eq!(adapter.translate("Hello", "es").await, None);
}

/// Test that a slow model is cut off by the timeout
#[tokio::test]
async fn test_localAdapter_withSlowModel_shouldTimeOut() {
    let model = Arc::new(MockSeq2SeqModel::slow(Duration::from_secs(5)));
    let config = LocalModelConfig {
        timeout_secs: 1,
        ..LocalModelConfig::default()
    };
    let adapter = local_adapter(model, &config);

    let attempt = adapter.attempt("Hello", "es").await;
    assert!(matches!(attempt, TranslationAttempt::Error(ref message) if message.contains("timed out")));
}

/// Test that a disabled model never loads
#[tokio::test]
async fn test_localAdapterLoad_whenDisabled_shouldStayUnloaded() {
    let config = LocalModelConfig {
        enabled: false,
        ..LocalModelConfig::default()
    };
    let adapter = LocalSeq2SeqAdapter::load(&config).await;
    assert!(!adapter.is_loaded());
    assert_eq!(adapter.translate("Hello", "es").await, None);
}

/// Test that an unreachable model server disables the adapter instead of failing
#[tokio::test]
async fn test_localAdapterLoad_withUnreachableServer_shouldStayUnloaded() {
    let config = LocalModelConfig {
        endpoint: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..LocalModelConfig::default()
    };
    let adapter = LocalSeq2SeqAdapter::load(&config).await;
    assert!(!adapter.is_loaded());
}

/// Test that a server which accepts but never answers is given up on quickly
#[tokio::test]
async fn test_localAdapterLoad_withSilentServer_shouldUseHealthTimeout() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = LocalModelConfig {
        endpoint: format!("http://{}", listener.local_addr().unwrap()),
        health_timeout_secs: 1,
        ..LocalModelConfig::default()
    };

    let adapter = tokio::time::timeout(Duration::from_secs(10), LocalSeq2SeqAdapter::load(&config))
        .await
        .expect("startup should not wait for the generation timeout");

    assert!(!adapter.is_loaded());
    drop(listener);
}

/// Test whitespace token truncation
#[test]
fn test_truncateToTokens_shouldKeepLeadingTokens() {
    assert_eq!(truncate_to_tokens("a b c d", 2), "a b");
    assert_eq!(truncate_to_tokens("a b", 5), "a b");
    assert_eq!(truncate_to_tokens("", 5), "");
}
