use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err};
use serial_test::serial;

// =========================================================================
// Edge Cases
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error_mentions_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "this is not valid toml {{{{").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("config.toml"));
}

#[test]
#[serial]
fn given_session_file_with_traversal_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("FA_SESSION_FILE", "../../../etc/passwd");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring(".."));
}

#[test]
#[serial]
fn given_empty_session_file_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("FA_SESSION_FILE", "");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_log_file_with_traversal_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("FA_LOG_FILE", "../client.log");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_unknown_toml_section_when_load_then_ignored() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[dashboard]\nrefresh_secs = 5\n",
    )
    .unwrap();

    // When
    let result = Config::load();

    // Then
    assert!(result.is_ok());
}

#[test]
#[serial]
fn given_non_numeric_timeout_env_when_load_then_default_kept() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _timeout = EnvGuard::set("FA_API_TIMEOUT_SECS", "soon");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.api.timeout_secs, 30);
}
