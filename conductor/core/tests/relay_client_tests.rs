//! Integration tests for the remote agent relay
//!
//! A wiremock server stands in for the agent API server. Tests cover:
//! - Session negotiation and the run request
//! - Fallback session id when the server omits or blanks it
//! - Non-2xx responses on either call
//! - Decoding of SSE-framed answers

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use relay_core::{
    relay_tool_result, AgentRelay, RelayError, RemoteAgentClient, RemoteConfig, StreamOutcome,
    FALLBACK_SESSION_ID,
};

const SESSIONS_PATH: &str = "/apps/damnvulnerableadk/users/1/sessions";

fn client(server: &MockServer) -> RemoteAgentClient {
    RemoteAgentClient::new(RemoteConfig::new(server.uri(), "damnvulnerableadk")).unwrap()
}

fn frame(text: &str) -> String {
    json!({ "content": { "parts": [{ "text": text }], "role": "model" } }).to_string()
}

fn sse(frames: &[String]) -> ResponseTemplate {
    let body: String = frames.iter().map(|f| format!("data: {f}\n\n")).collect();
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body)
}

async fn mount_session(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(SESSIONS_PATH))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

// =============================================================================
// Session negotiation
// =============================================================================

#[tokio::test]
async fn test_ask_negotiates_session_then_runs() {
    let server = MockServer::start().await;
    mount_session(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "id": "abc" })),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "appName": "damnvulnerableadk",
            "userId": "1",
            "sessionId": "abc",
            "newMessage": { "parts": [{ "text": "Who is john_doe?" }], "role": "user" },
            "streaming": false,
        })))
        .respond_with(sse(&[frame("john_doe is a user")]))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).ask("Who is john_doe?").await.unwrap();
    assert_eq!(outcome.text(), Some("john_doe is a user"));
}

#[tokio::test]
async fn test_missing_session_id_uses_fallback() {
    let server = MockServer::start().await;
    mount_session(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;

    assert_eq!(client(&server).create_session().await.unwrap(), FALLBACK_SESSION_ID);
}

#[tokio::test]
async fn test_empty_session_id_uses_fallback_in_run_request() {
    let server = MockServer::start().await;
    mount_session(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "id": "" })),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .and(body_partial_json(json!({ "sessionId": "default_session" })))
        .respond_with(sse(&[frame("ok")]))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).ask("hi").await.unwrap();
    assert_eq!(outcome.text(), Some("ok"));
}

// =============================================================================
// HTTP failures
// =============================================================================

#[tokio::test]
async fn test_session_failure_skips_run() {
    let server = MockServer::start().await;
    mount_session(
        &server,
        ResponseTemplate::new(500).set_body_string("boom"),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .respond_with(sse(&[frame("never")]))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).ask("hi").await.unwrap_err();
    match err {
        RelayError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("Expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_run_failure_is_reported() {
    let server = MockServer::start().await;
    mount_session(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "id": "abc" })),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such app"))
        .mount(&server)
        .await;

    let err = client(&server).ask("hi").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = RemoteAgentClient::new(RemoteConfig::new(uri, "damnvulnerableadk")).unwrap();
    let err = client.ask("hi").await.unwrap_err();
    assert!(matches!(err, RelayError::Transport(_)));
    assert_eq!(err.status(), None);
}

// =============================================================================
// Stream decoding through the client
// =============================================================================

#[tokio::test]
async fn test_last_text_frame_wins_over_malformed_tail() {
    let server = MockServer::start().await;
    mount_session(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "id": "abc" })),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .respond_with(sse(&[
            frame("thinking"),
            frame("final answer"),
            "{not json".to_string(),
        ]))
        .mount(&server)
        .await;

    let outcome = client(&server).ask("hi").await.unwrap();
    assert_eq!(outcome.text(), Some("final answer"));

    let result = relay_tool_result(&outcome);
    assert_eq!(result["status"], "success");
    assert_eq!(result["text"], "final answer");
    assert_eq!(result["data"]["content"]["parts"][0]["text"], "final answer");
}

#[tokio::test]
async fn test_stream_without_text_keeps_chunks() {
    let server = MockServer::start().await;
    mount_session(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "id": "abc" })),
    )
    .await;

    let call = json!({ "content": { "parts": [{ "functionCall": { "name": "lookup" } }] } })
        .to_string();
    Mock::given(method("POST"))
        .and(path("/run_sse"))
        .respond_with(sse(&[call.clone(), "garbage".to_string()]))
        .mount(&server)
        .await;

    let outcome = client(&server).ask("hi").await.unwrap();
    assert_eq!(
        outcome,
        StreamOutcome::SuccessNoText {
            chunks: vec![call, "garbage".to_string()],
        }
    );

    let result = relay_tool_result(&outcome);
    assert_eq!(result["message"], "Got SSE response with no final text");
    assert!(result.get("text").is_none());
}
