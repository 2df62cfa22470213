use crate::{AuthError, NO_PROVIDER_MESSAGE, SessionError, VERIFICATION_FAILED_MESSAGE};

#[test]
fn test_backend_messages_pass_through() {
    let err = AuthError::rejected(401, "Invalid credentials");
    assert_eq!(err.user_message(), "Invalid credentials");

    let err = AuthError::verification(Some("bad signature".to_string()));
    assert_eq!(err.user_message(), "bad signature");
}

#[test]
fn test_verification_without_message_uses_generic_text() {
    let err = AuthError::verification(None);
    assert_eq!(err.user_message(), VERIFICATION_FAILED_MESSAGE);
}

#[test]
fn test_no_provider_message_names_install_link() {
    let err = AuthError::no_provider();
    assert_eq!(err.user_message(), NO_PROVIDER_MESSAGE);
    assert!(err.user_message().contains("https://metamask.io/download/"));
}

#[test]
fn test_only_network_errors_are_retryable() {
    assert!(!AuthError::cancelled().is_retryable());
    assert!(!AuthError::approval_timeout(120).is_retryable());
    assert!(!AuthError::validation("x").is_retryable());
}

#[test]
fn test_error_codes_are_distinct_for_flow_failures() {
    assert_eq!(AuthError::no_uri().error_code(), "NO_URI");
    assert_eq!(AuthError::no_account().error_code(), "NO_ACCOUNT");
    assert_eq!(AuthError::flow_in_progress("email").error_code(), "FLOW_IN_PROGRESS");
    assert_eq!(AuthError::session_expired("/login/").error_code(), "SESSION_EXPIRED");
}

#[test]
fn test_session_error_converts() {
    let err: AuthError = SessionError::poisoned().into();
    assert_eq!(err.error_code(), "SESSION_STORAGE");
}

#[test]
fn test_display_includes_detail() {
    let err = AuthError::relay_init("missing project id");
    assert!(err.to_string().contains("missing project id"));
}
