use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Api
// =========================================================================

#[test]
#[serial]
fn given_unparseable_base_url_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _url = EnvGuard::set("FA_API_BASE_URL", "not a url");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_non_http_scheme_when_validate_then_error_names_scheme() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _url = EnvGuard::set("FA_API_BASE_URL", "ftp://finance.example.com");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("ftp"));
}

#[test]
#[serial]
fn given_timeout_zero_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _timeout = EnvGuard::set("FA_API_TIMEOUT_SECS", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_timeout_at_max_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _timeout = EnvGuard::set("FA_API_TIMEOUT_SECS", "300");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_relative_login_path_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _path = EnvGuard::set("FA_API_LOGIN_PATH", "login/");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}
