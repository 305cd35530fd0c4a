//! Login, registration and logout against a mock backend

use notes_frontend_common::{
    AppContext, AuthFlowError, CredentialStore, LoginForm, MemoryCredentialStore,
    NotificationLevel, NotificationLog, RegisterForm, SessionConfig, ValidationError,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    store: Arc<MemoryCredentialStore>,
    log: Arc<NotificationLog>,
    ctx: AppContext,
}

async fn harness(entries: &[(&str, &str)]) -> Harness {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryCredentialStore::with_entries(entries.iter().copied()));
    let log = Arc::new(NotificationLog::new());
    let ctx = AppContext::new(server.uri(), store.clone(), log.clone()).unwrap();
    Harness {
        server,
        store,
        log,
        ctx,
    }
}

fn login_form(email: &str, password: &str, remember_me: bool) -> LoginForm {
    LoginForm {
        email: email.into(),
        password: password.into(),
        remember_me,
    }
}

#[tokio::test]
async fn test_login_sends_local_part_and_stores_tokens() {
    let h = harness(&[]).await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({"username": "a", "password": "x"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "acc-1", "refresh": "ref-1"})),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let route = h
        .ctx
        .auth()
        .login(&login_form("a@b.com", "x", true))
        .await
        .unwrap();

    assert_eq!(route, SessionConfig::HOME_ROUTE);
    assert_eq!(h.store.get("access").as_deref(), Some("acc-1"));
    assert_eq!(h.store.get("refresh").as_deref(), Some("ref-1"));
    assert_eq!(h.store.get("rememberMe").as_deref(), Some("true"));
    assert_eq!(h.log.last_message().as_deref(), Some("Login successful!"));
}

#[tokio::test]
async fn test_login_without_remember_me_leaves_flag_unset() {
    let h = harness(&[]).await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "acc-1", "refresh": "ref-1"})),
        )
        .mount(&h.server)
        .await;

    h.ctx
        .auth()
        .login(&login_form("a@b.com", "x", false))
        .await
        .unwrap();

    assert_eq!(h.store.get("rememberMe"), None);
}

#[tokio::test]
async fn test_failed_login_keeps_existing_tokens() {
    let h = harness(&[("access", "old-access"), ("refresh", "old-refresh")]).await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"detail": "No active account found with the given credentials"}),
        ))
        .expect(1)
        .mount(&h.server)
        .await;

    let result = h
        .ctx
        .auth()
        .login(&login_form("a@b.com", "wrong", false))
        .await;

    assert!(matches!(result, Err(AuthFlowError::Rejected(ref e)) if e.status == 401));
    assert_eq!(h.store.get("access").as_deref(), Some("old-access"));
    assert_eq!(h.store.get("refresh").as_deref(), Some("old-refresh"));

    let notes = h.log.take();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(
        notes[0].message,
        "Login failed: No active account found with the given credentials"
    );
}

#[tokio::test]
async fn test_invalid_login_form_sends_nothing() {
    let h = harness(&[]).await;

    let result = h.ctx.auth().login(&login_form("ab.com", "x", false)).await;

    assert!(matches!(
        result,
        Err(AuthFlowError::Validation(ValidationError::InvalidEmail))
    ));
    assert_eq!(
        h.log.last_message().as_deref(),
        Some("Please enter a valid email")
    );
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_transport_failure_is_notified() {
    let store = Arc::new(MemoryCredentialStore::new());
    let log = Arc::new(NotificationLog::new());
    let ctx = AppContext::new("http://127.0.0.1:9", store.clone(), log.clone()).unwrap();

    let result = ctx.auth().login(&login_form("a@b.com", "x", false)).await;

    assert!(matches!(result, Err(AuthFlowError::Client(ref e)) if e.is_transport()));
    assert!(log.last_message().unwrap().starts_with("Login failed: "));
    assert_eq!(store.get("access"), None);
}

#[tokio::test]
async fn test_register_posts_derived_username() {
    let h = harness(&[]).await;

    Mock::given(method("POST"))
        .and(path("/api/user/register/"))
        .and(body_json(json!({
            "email": "jane@example.com",
            "password": "s3cret",
            "username": "jane",
            "first_name": "Jane",
            "last_name": "Doe"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&h.server)
        .await;

    let form = RegisterForm {
        email: "jane@example.com".into(),
        password: "s3cret".into(),
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        accept_terms: true,
    };
    let route = h.ctx.auth().register(&form).await.unwrap();

    assert_eq!(route, SessionConfig::LOGIN_ROUTE);
    assert_eq!(
        h.log.last_message().as_deref(),
        Some("Registration successful!")
    );
    assert_eq!(h.store.get("access"), None);
}

#[tokio::test]
async fn test_register_reports_email_error() {
    let h = harness(&[]).await;

    Mock::given(method("POST"))
        .and(path("/api/user/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"email": ["user with this email already exists."]}),
        ))
        .mount(&h.server)
        .await;

    let form = RegisterForm {
        email: "jane@example.com".into(),
        password: "s3cret".into(),
        accept_terms: true,
        ..RegisterForm::default()
    };
    assert!(h.ctx.auth().register(&form).await.is_err());
    assert_eq!(
        h.log.last_message().as_deref(),
        Some("user with this email already exists.")
    );
}

#[tokio::test]
async fn test_register_requires_terms() {
    let h = harness(&[]).await;

    let form = RegisterForm {
        email: "jane@example.com".into(),
        password: "s3cret".into(),
        ..RegisterForm::default()
    };
    let result = h.ctx.auth().register(&form).await;

    assert!(matches!(
        result,
        Err(AuthFlowError::Validation(ValidationError::TermsNotAccepted))
    ));
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_clears_every_key() {
    let h = harness(&[
        ("access", "a"),
        ("refresh", "r"),
        ("rememberMe", "true"),
        ("theme", "dark"),
    ])
    .await;

    let route = h.ctx.auth().logout().unwrap();

    assert_eq!(route, "/login");
    for key in SessionConfig::ALL_KEYS {
        assert_eq!(h.store.get(key), None, "{key} should be cleared");
    }
    assert_eq!(h.store.get("theme").as_deref(), Some("dark"));
    assert!(h.server.received_requests().await.unwrap().is_empty());
}
