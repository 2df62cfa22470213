use crate::{ConfigError, ConfigErrorResult, DEFAULT_API_BASE_URL, DEFAULT_LOGIN_PATH};

use serde::Deserialize;
use url::Url;

// Request timeout constraints
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the FinanceAI backend API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin (e.g., "http://127.0.0.1:8000"), without the `/api` prefix
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// CSRF token sent as `X-CSRFToken` on mutating requests
    pub csrf_token: Option<String>,
    /// Browser `Cookie` header to take `csrftoken` from when no token is set
    pub csrf_cookie: Option<String>,
    /// Login entry point that protected pages redirect to
    pub login_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_API_BASE_URL),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            csrf_token: None,
            csrf_cookie: None,
            login_path: String::from(DEFAULT_LOGIN_PATH),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::api(format!("api.base_url is not a valid URL ({}): {e}", self.base_url))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::api(format!(
                "api.base_url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::api(format!(
                "api.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if !self.login_path.starts_with('/') {
            return Err(ConfigError::api(format!(
                "api.login_path must start with '/', got {}",
                self.login_path
            )));
        }

        Ok(())
    }
}
