//! Integration tests for the notes HTTP client

use notes_http::types::{NoteCreateRequest, TokenObtainRequest, TokenRefreshRequest};
use notes_http::{ClientError, NotesClient, TokenSource};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token source whose value can change between requests
#[derive(Default)]
struct SwappableToken(Mutex<Option<String>>);

impl SwappableToken {
    fn set(&self, token: Option<&str>) {
        *self.0.lock().unwrap() = token.map(str::to_string);
    }
}

impl TokenSource for SwappableToken {
    fn access_token(&self) -> Option<String> {
        self.0.lock().unwrap().clone()
    }
}

fn client_with(server: &MockServer, tokens: Arc<SwappableToken>) -> NotesClient {
    NotesClient::builder()
        .base_url(server.uri())
        .token_source(tokens)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_client_builder() {
    let client = NotesClient::builder()
        .base_url("http://localhost:8000/v1/")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000/v1");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = NotesClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));

    let result = NotesClient::new("not a url");
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_bearer_attached_when_token_present() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/all/"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = Arc::new(SwappableToken::default());
    tokens.set(Some("access-1"));
    let client = client_with(&mock_server, tokens);

    let response = client.list_notes().await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/all/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Authentication credentials were not provided."
        })))
        .mount(&mock_server)
        .await;

    let client = client_with(&mock_server, Arc::new(SwappableToken::default()));

    let response = client.list_notes().await.unwrap();
    assert_eq!(response.status(), 401);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));

    let err = response.server_error();
    assert_eq!(err.message, "Authentication credentials were not provided.");
}

#[tokio::test]
async fn test_token_read_per_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/notes/delete/42/"))
        .and(header("authorization", "Bearer second"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/notes/delete/42/"))
        .and(header("authorization", "Bearer first"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = Arc::new(SwappableToken::default());
    let client = client_with(&mock_server, tokens.clone());

    tokens.set(Some("first"));
    assert_eq!(client.delete_note(42).await.unwrap().status(), 404);

    tokens.set(Some("second"));
    assert_eq!(client.delete_note(42).await.unwrap().status(), 204);
}

#[tokio::test]
async fn test_server_errors_are_responses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/notes/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = NotesClient::builder()
        .base_url(mock_server.uri())
        .token_source(Arc::new("fixed".to_string()))
        .build()
        .unwrap();

    let request = NoteCreateRequest {
        title: "t".into(),
        content: "c".into(),
    };
    let response = client.create_note(&request).await.unwrap();
    assert_eq!(response.status(), 500);
    assert_eq!(response.text(), "boom");
}

#[tokio::test]
async fn test_execute_maps_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/all/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "forbidden"})))
        .mount(&mock_server)
        .await;

    let client = NotesClient::new(mock_server.uri()).unwrap();
    let request = client.request(reqwest::Method::GET, "/api/notes/all/");
    let result: Result<serde_json::Value, _> = client.execute(request).await;

    match result {
        Err(ClientError::Server(err)) => {
            assert_eq!(err.status, 403);
            assert_eq!(err.message, "forbidden");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_bodies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({"username": "a", "password": "x"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "A", "refresh": "R"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(json!({"refresh": "R"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = NotesClient::new(mock_server.uri()).unwrap();

    let login = TokenObtainRequest {
        username: "a".into(),
        password: "x".into(),
    };
    let pair: notes_http::types::TokenPair = client.obtain_token(&login).await.unwrap().json().unwrap();
    assert_eq!(pair.access, "A");
    assert_eq!(pair.refresh, "R");

    let refresh = TokenRefreshRequest {
        refresh: pair.refresh,
    };
    let fresh: notes_http::types::TokenRefreshResponse =
        client.refresh_token(&refresh).await.unwrap().json().unwrap();
    assert_eq!(fresh.access, "A2");
}

#[tokio::test]
async fn test_transport_failure() {
    // Nothing listens on port 9 (discard) on test machines
    let client = NotesClient::builder()
        .base_url("http://127.0.0.1:9")
        .timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap();

    let result = client.list_notes().await;
    assert!(matches!(result, Err(ClientError::Transport(_))));
}
