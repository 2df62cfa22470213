use crate::api::{ApiEnvelope, AuthPayload, endpoints};
use crate::error::INVALID_RESPONSE_MESSAGE;
use crate::wallet::{NonceChallenge, WalletAddress};
use crate::{AuthError, Result, SessionStore};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

const INVALID_BODY_MESSAGE: &str = "Server returned an invalid response. Please try again.";
const CSRF_HEADER: &str = "X-CSRFToken";
const DEFAULT_LOGIN_PATH: &str = "/login/";

/// Status plus parsed envelope of a completed round trip.
#[derive(Debug)]
struct ApiReply {
    status: StatusCode,
    envelope: ApiEnvelope,
}

/// Registration form as sent to the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub risk_appetite: String,
    pub experience_level: String,
}

/// HTTP client for the FinanceAI REST API
///
/// Owns the session store so that bearer headers and 401 handling always act
/// on the same session the login flows write.
pub struct ApiClient {
    pub base_url: String,
    login_path: String,
    csrf_token: Option<String>,
    client: ReqwestClient,
    session_store: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:8000")
    /// * `session_store` - Where tokens are read from and written to
    pub fn new(base_url: &str, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            csrf_token: None,
            client: ReqwestClient::new(),
            session_store,
        }
    }

    /// Rebuild the underlying HTTP client with a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Where callers are sent after the backend rejects the stored token.
    pub fn with_login_path(mut self, login_path: &str) -> Self {
        self.login_path = login_path.to_string();
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.session_store
    }

    /// Build a request; mutating methods carry the CSRF header when one is known.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.request_url(method, url)
    }

    fn request_url(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        let mutating = !matches!(method, Method::GET | Method::HEAD | Method::OPTIONS);
        let mut req = self.client.request(method, url);

        #[allow(clippy::collapsible_if)]
        if mutating {
            if let Some(ref token) = self.csrf_token {
                req = req.header(CSRF_HEADER, token);
            }
        }

        req
    }

    /// Attach the stored bearer token; no token means the caller must sign in.
    fn authorized(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .session_store
            .load()?
            .filter(|session| session.is_active())
            .map(|session| session.access_token);

        match token {
            Some(token) => Ok(req.bearer_auth(token)),
            None => Err(AuthError::session_expired(self.login_path.clone())),
        }
    }

    /// Execute request and parse the envelope. An empty body reads as `{}`.
    async fn execute(&self, req: RequestBuilder) -> Result<ApiReply> {
        let response = req.send().await?;
        let status = response.status();
        Self::read_reply(status, response).await
    }

    /// Like `execute`, but a 401 clears the stored session first.
    async fn execute_authenticated(&self, req: RequestBuilder) -> Result<ApiReply> {
        let req = self.authorized(req)?;
        let response = req.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Server rejected the stored token, clearing session");
            if let Err(e) = self.session_store.clear() {
                warn!("Failed to clear rejected session: {e}");
            }
            return Err(AuthError::session_expired(self.login_path.clone()));
        }

        Self::read_reply(status, response).await
    }

    async fn read_reply(status: StatusCode, response: reqwest::Response) -> Result<ApiReply> {
        let text = response.text().await?;

        let envelope = if text.trim().is_empty() {
            ApiEnvelope::default()
        } else {
            serde_json::from_str(&text).map_err(|e| {
                debug!("Unparseable body (status {status}): {e}");
                AuthError::malformed(INVALID_BODY_MESSAGE)
            })?
        };

        Ok(ApiReply { status, envelope })
    }

    /// Unwrap `data` of a successful envelope, or the server's complaint.
    fn into_data<T: DeserializeOwned>(reply: ApiReply, fallback: &str) -> Result<T> {
        let ApiReply { status, envelope } = reply;

        if !status.is_success() {
            let message = envelope
                .error_message()
                .unwrap_or_else(|| fallback.to_string());
            return Err(AuthError::rejected(status.as_u16(), message));
        }

        if !envelope.is_success() {
            return Err(match envelope.error_message() {
                Some(message) => AuthError::rejected(status.as_u16(), message),
                None => AuthError::malformed(INVALID_RESPONSE_MESSAGE),
            });
        }

        let data = envelope
            .data
            .ok_or_else(|| AuthError::malformed(INVALID_RESPONSE_MESSAGE))?;

        serde_json::from_value(data).map_err(|e| {
            debug!("Response data did not match the expected shape: {e}");
            AuthError::malformed(INVALID_RESPONSE_MESSAGE)
        })
    }

    // =========================================================================
    // Credential Operations
    // =========================================================================

    /// Exchange email and password for tokens
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let req = self
            .request(Method::POST, endpoints::LOGIN)
            .json(&LoginRequest { email, password });
        let reply = self.execute(req).await?;
        Self::into_data::<AuthPayload>(reply, "Invalid email or password.")?.ensure_access()
    }

    /// Create an account; a successful registration signs the user in
    pub async fn register(&self, registration: &RegisterRequest) -> Result<AuthPayload> {
        let req = self
            .request(Method::POST, endpoints::REGISTER)
            .json(registration);
        let reply = self.execute(req).await?;
        Self::into_data::<AuthPayload>(reply, "Registration failed.")?.ensure_access()
    }

    /// Persist a new username; returns the username the server stored
    pub async fn update_username(&self, username: &str) -> Result<String> {
        #[derive(Serialize)]
        struct UpdateRequest<'a> {
            username: &'a str,
        }

        #[derive(serde::Deserialize)]
        struct UpdateResponse {
            #[serde(default)]
            username: Option<String>,
        }

        let req = self
            .request(Method::PATCH, endpoints::PROFILE)
            .json(&UpdateRequest { username });
        let reply = self.execute_authenticated(req).await?;
        let data: UpdateResponse = Self::into_data(reply, "Could not save username.")?;

        Ok(data
            .username
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| username.to_string()))
    }

    /// Invalidate the refresh token server side
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        #[derive(Serialize)]
        struct LogoutRequest<'a> {
            refresh: &'a str,
        }

        let req = self
            .request(Method::POST, endpoints::LOGOUT)
            .json(&LogoutRequest {
                refresh: refresh_token,
            });
        let reply = self.execute_authenticated(req).await?;

        if !reply.status.is_success() {
            let message = reply
                .envelope
                .error_message()
                .unwrap_or_else(|| "Logout failed.".to_string());
            return Err(AuthError::rejected(reply.status.as_u16(), message));
        }

        Ok(())
    }

    // =========================================================================
    // Wallet Operations
    // =========================================================================

    /// Fetch the one-time message the wallet must sign
    pub async fn wallet_nonce(&self, address: &WalletAddress) -> Result<NonceChallenge> {
        #[derive(serde::Deserialize)]
        struct NonceData {
            #[serde(default)]
            nonce: Option<String>,
        }

        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoints::WALLET_NONCE))
            .map_err(|e| AuthError::validation(format!("Invalid API base URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("address", address.as_str());

        let reply = match self.execute(self.request_url(Method::GET, url)).await {
            Ok(reply) => reply,
            Err(AuthError::MalformedResponse { .. }) => {
                return Err(AuthError::challenge_unavailable(None));
            }
            Err(e) => return Err(e),
        };

        let message = reply.envelope.error_message();
        if !reply.status.is_success() || !reply.envelope.is_success() {
            return Err(AuthError::challenge_unavailable(message));
        }

        let nonce = reply
            .envelope
            .data
            .and_then(|data| serde_json::from_value::<NonceData>(data).ok())
            .and_then(|data| data.nonce)
            .filter(|nonce| !nonce.is_empty());

        match nonce {
            Some(nonce) => Ok(NonceChallenge::new(nonce)),
            None => Err(AuthError::challenge_unavailable(message)),
        }
    }

    /// Submit the signed challenge; success yields the same payload as login
    pub async fn wallet_verify(
        &self,
        address: &WalletAddress,
        signature: &str,
    ) -> Result<AuthPayload> {
        #[derive(Serialize)]
        struct VerifyRequest<'a> {
            address: &'a str,
            signature: &'a str,
        }

        let req = self
            .request(Method::POST, endpoints::WALLET_VERIFY)
            .json(&VerifyRequest {
                address: address.as_str(),
                signature,
            });

        let reply = match self.execute(req).await {
            Ok(reply) => reply,
            Err(AuthError::MalformedResponse { .. }) => {
                return Err(AuthError::verification(None));
            }
            Err(e) => return Err(e),
        };

        if !reply.status.is_success()
            || !reply.envelope.is_success()
            || reply.envelope.data.is_none()
        {
            return Err(AuthError::verification(reply.envelope.error_message()));
        }

        Self::into_data::<AuthPayload>(reply, crate::error::VERIFICATION_FAILED_MESSAGE)?
            .ensure_access()
    }

    // =========================================================================
    // Generic Authenticated Requests
    // =========================================================================

    /// Call any backend endpoint with the stored bearer token.
    ///
    /// `path` may be given with or without the `/api` prefix. Returns the
    /// envelope's `data` (or `null` when absent).
    pub async fn authenticated_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let path = normalize_api_path(path);
        let mut req = self.request(method, &path);
        if let Some(body) = body {
            req = req.json(body);
        }

        let reply = self.execute_authenticated(req).await?;
        let ApiReply { status, envelope } = reply;

        if !status.is_success() || envelope.status.as_deref() == Some("error") {
            let message = envelope
                .error_message()
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(AuthError::rejected(status.as_u16(), message));
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

/// `/accounts/me/`, `api/accounts/me/` and `/api/accounts/me/` all address the same endpoint.
pub(crate) fn normalize_api_path(path: &str) -> String {
    let trimmed = path.trim();
    let with_slash = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    if with_slash == "/api" || with_slash.starts_with("/api/") {
        with_slash
    } else {
        format!("/api{with_slash}")
    }
}
