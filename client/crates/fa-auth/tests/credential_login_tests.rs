//! Integration tests for email/password sign-in using wiremock mock server

mod common;

use common::{api_for, failure, stored, success};
use fa_auth::{
    ApiClient, AuthError, CredentialLogin, LoginGate, MemorySessionStore, Registration,
};

use std::sync::Arc;

use googletest::prelude::*;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

#[tokio::test]
async fn test_login_success_normalizes_email_and_saves_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"email": "a@b.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!({
            "access": "tok1",
            "refresh": "ref1",
            "user": {
                "id": 3,
                "username": "ada",
                "email": "a@b.com",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "profile": {"risk_appetite": "moderate", "experience_level": "beginner"}
            }
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let outcome = login.login("  A@B.com ", "pw").await.unwrap();

    assert_eq!(outcome.session.access_token, "tok1");
    assert!(!outcome.needs_username);

    let session = stored(&store).unwrap();
    assert_eq!(session, outcome.session);
    assert_eq!(session.refresh_token.as_deref(), Some("ref1"));

    let user = session.user.unwrap();
    assert_eq!(user.display_name, "Ada Lovelace");
    assert_eq!(user.email.as_deref(), Some("a@b.com"));
    assert_eq!(user.risk_appetite.as_deref(), Some("moderate"));
}

#[tokio::test]
async fn test_login_empty_input_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    for (email, password) in [("", "pw"), ("   ", "pw"), ("a@b.com", ""), ("a@b.com", "   ")] {
        let err = login.login(email, password).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation { .. }));
        assert_that!(err.user_message(), eq("Email and password are required."));
    }

    assert!(stored(&store).is_none());
}

#[tokio::test]
async fn test_login_rejected_passes_server_message_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(failure("Invalid credentials")))
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let err = login.login("a@b.com", "wrong").await.unwrap_err();

    assert!(matches!(err, AuthError::AuthRejected { status: 401, .. }));
    assert_that!(err.user_message(), eq("Invalid credentials"));
    assert!(stored(&store).is_none());
}

#[tokio::test]
async fn test_login_rejected_without_message_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"status": "error"})))
        .mount(&mock_server)
        .await;

    let (api, _store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let err = login.login("a@b.com", "pw").await.unwrap_err();
    assert_that!(err.user_message(), eq("Invalid email or password."));
}

#[tokio::test]
async fn test_login_non_json_body_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let err = login.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::MalformedResponse { .. }));
    assert_that!(
        err.user_message(),
        eq("Server returned an invalid response. Please try again.")
    );
    assert!(stored(&store).is_none());
}

#[tokio::test]
async fn test_login_success_without_access_token_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success(json!({"refresh": "ref1"}))),
        )
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let err = login.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::MalformedResponse { .. }));
    assert!(stored(&store).is_none());
}

#[tokio::test]
async fn test_login_sends_csrf_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(header("X-CSRFToken", "csrf-abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success(json!({"access": "tok1"}))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ApiClient::new(&mock_server.uri(), Arc::new(MemorySessionStore::new()))
        .with_csrf_token(Some("csrf-abc".to_string()));
    let login = CredentialLogin::new(Arc::new(api), LoginGate::new());

    assert!(login.login("a@b.com", "pw").await.is_ok());
}

#[tokio::test]
async fn test_login_needs_username_flag_is_returned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!({
            "access": "tok1",
            "needs_username": true,
            "user": {"email": "a@b.com"}
        }))))
        .mount(&mock_server)
        .await;

    let (api, _store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let outcome = login.login("a@b.com", "pw").await.unwrap();
    assert!(outcome.needs_username);
}

#[tokio::test]
async fn test_login_rejected_while_another_flow_runs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let gate = LoginGate::new();
    let _qr = gate.try_begin("QR wallet").unwrap();

    let (api, _store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, gate.clone());

    let err = login.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::FlowInProgress { active: "QR wallet", .. }));
}

#[tokio::test]
async fn test_register_sends_split_name_and_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .and(body_json(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "pw",
            "first_name": "Ada",
            "last_name": "King Lovelace",
            "risk_appetite": "high",
            "experience_level": "beginner"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(success(json!({
            "access": "tok9",
            "user": {"username": "ada", "first_name": "Ada", "last_name": ""}
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let outcome = login
        .register(&Registration {
            name: " Ada  King Lovelace ".to_string(),
            email: "Ada@Example.com".to_string(),
            password: "pw".to_string(),
            risk_appetite: Some("high".to_string()),
            experience_level: Some("  ".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(outcome.session.access_token, "tok9");
    let user = stored(&store).unwrap().user.unwrap();
    assert_eq!(user.display_name, "Ada");
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn test_register_failure_reports_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(failure("Email already registered")),
        )
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let err = login
        .register(&Registration {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            ..Registration::default()
        })
        .await
        .unwrap_err();

    assert_that!(err.user_message(), eq("Email already registered"));
    assert!(stored(&store).is_none());
}

#[tokio::test]
async fn test_register_requires_only_email_and_password() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .and(body_json(json!({
            "username": "grace",
            "email": "grace@example.com",
            "password": "pw",
            "first_name": "",
            "last_name": "",
            "risk_appetite": "moderate",
            "experience_level": "beginner"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(success(json!({
            "access": "tok2",
            "user": {"username": "grace"}
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let err = login
        .register(&Registration {
            name: "Grace".to_string(),
            password: "pw".to_string(),
            ..Registration::default()
        })
        .await
        .unwrap_err();
    assert_that!(err.user_message(), eq("Email and password are required."));

    login
        .register(&Registration {
            email: "grace@example.com".to_string(),
            password: "pw".to_string(),
            ..Registration::default()
        })
        .await
        .unwrap();

    let user = stored(&store).unwrap().user.unwrap();
    assert_eq!(user.display_name, "grace");
}

#[tokio::test]
async fn test_login_without_full_name_shows_username() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!({
            "access": "tok1",
            "user": {"username": "ada", "first_name": "Ada", "last_name": ""}
        }))))
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    login.login("ada@example.com", "pw").await.unwrap();

    let user = stored(&store).unwrap().user.unwrap();
    assert_eq!(user.display_name, "ada");
}

#[tokio::test]
async fn test_register_error_envelope_with_ok_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&mock_server)
        .await;

    let (api, store) = api_for(&mock_server.uri());
    let login = CredentialLogin::new(api, LoginGate::new());

    let err = login
        .register(&Registration {
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            ..Registration::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::MalformedResponse { .. }));
    assert_that!(err.user_message(), eq("Invalid response from server."));
    assert!(stored(&store).is_none());
}
