//! Contract tests for the search provider client against a mock Gemini endpoint.

use serde_json::json;
use sponsor_seeker::{SearchConfig, SearchError, SearchRequest, SponsorSearchClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn client_for(server: &MockServer) -> SponsorSearchClient {
    let config = SearchConfig::new("test-key").with_endpoint(server.uri());
    SponsorSearchClient::new(config).unwrap()
}

fn request() -> SearchRequest {
    SearchRequest::new("Software Engineering", "Australia").unwrap()
}

fn answer(text: &str, chunks: serde_json::Value) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "groundingMetadata": {"groundingChunks": chunks}
        }]
    })
}

#[tokio::test]
async fn test_request_carries_key_prompt_and_search_tool() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({"tools": [{"google_search": {}}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("[]", json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).search(&request()).await;

    assert!(result.is_ok(), "search should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_prompt_names_query_and_country() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("ok", json!([]))))
        .mount(&server)
        .await;

    client_for(&server).search(&request()).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("\"Software Engineering\""));
    assert!(prompt.contains("\"Australia\""));
    assert_eq!(body["contents"][0]["role"], "user");
}

#[tokio::test]
async fn test_structured_answer_with_sources() {
    let server = MockServer::start().await;
    let text = "Here you go:\n```json\n[{\"id\":\"1\",\"name\":\"Acme\",\"industry\":\"Tech\",\"website\":\"https://acme.example\",\"location\":\"Sydney\",\"description\":\"Sponsors skilled visas.\",\"sponsorshipType\":\"TSS 482\"}]\n```";

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(
            text,
            json!([
                {"web": {"title": "Acme careers", "uri": "https://acme.example/careers"}},
                null,
                {"web": {"uri": "https://immi.example"}}
            ]),
        )))
        .mount(&server)
        .await;

    let result = client_for(&server).search(&request()).await.unwrap();

    assert_eq!(result.records().len(), 1);
    assert_eq!(result.records()[0].name(), Some("Acme"));
    assert_eq!(result.raw_text(), None);
    assert_eq!(result.sources().len(), 2);
    assert_eq!(result.sources()[1].title, None);
    assert_eq!(result.sources()[1].uri.as_deref(), Some("https://immi.example"));
}

#[tokio::test]
async fn test_unstructured_answer_is_a_successful_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(
            "No companies could be confirmed at this time.",
            json!([]),
        )))
        .mount(&server)
        .await;

    let result = client_for(&server).search(&request()).await.unwrap();

    assert!(result.records().is_empty());
    assert_eq!(
        result.raw_text(),
        Some("No companies could be confirmed at this time.")
    );
}

#[tokio::test]
async fn test_text_split_across_parts_is_joined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "```json\n[{\"name\":"},
                    {"text": "\"Acme\"}]\n```"}
                ]}
            }]
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).search(&request()).await.unwrap();

    assert_eq!(result.records().len(), 1);
    assert!(result.sources().is_empty());
}

#[tokio::test]
async fn test_upstream_error_is_not_an_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).search(&request()).await.unwrap_err();

    match err {
        SearchError::Upstream { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "API key not valid");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).search(&request()).await.unwrap_err();

    assert!(matches!(err, SearchError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_an_http_error() {
    let config = SearchConfig::new("test-key").with_endpoint("http://127.0.0.1:1");
    let client = SponsorSearchClient::new(config).unwrap();

    let err = client.search(&request()).await.unwrap_err();

    assert!(matches!(err, SearchError::Http(_)));
}

#[test]
fn test_missing_credential_fails_before_any_request() {
    let result = SponsorSearchClient::new(SearchConfig::new(""));
    assert!(matches!(result, Err(SearchError::MissingCredential)));
}
