use crate::api::{ApiClient, AuthPayload, RegisterRequest};
use crate::{AuthError, LoginGate, LoginOutcome, Result, Session, UserProfile};

use std::sync::Arc;

use log::info;

const FLOW_NAME: &str = "email";
const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required.";
const DEFAULT_RISK_APPETITE: &str = "moderate";
const DEFAULT_EXPERIENCE_LEVEL: &str = "beginner";

/// Sign-up form. Blank risk and experience fall back to moderate and beginner.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub risk_appetite: Option<String>,
    pub experience_level: Option<String>,
}

impl Registration {
    /// Request body: name split into first word and remainder, username from the email.
    pub(crate) fn to_request(&self, email: &str) -> RegisterRequest {
        let mut parts = self.name.split_whitespace();
        let first_name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");

        let username = email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("user{}", chrono::Utc::now().timestamp_millis()));

        let or_default = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        RegisterRequest {
            username,
            email: email.to_string(),
            password: self.password.clone(),
            first_name,
            last_name,
            risk_appetite: or_default(&self.risk_appetite, DEFAULT_RISK_APPETITE),
            experience_level: or_default(&self.experience_level, DEFAULT_EXPERIENCE_LEVEL),
        }
    }
}

/// Email/password sign-in and registration.
pub struct CredentialLogin {
    api: Arc<ApiClient>,
    gate: LoginGate,
}

impl CredentialLogin {
    pub fn new(api: Arc<ApiClient>, gate: LoginGate) -> Self {
        Self { api, gate }
    }

    /// Email is trimmed and lower-cased; empty input fails before any request.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let email = normalize_email(email, password)?;

        let _permit = self.gate.try_begin(FLOW_NAME)?;
        let mut payload = self.api.login(&email, password).await?;
        let profile = payload.user.take().unwrap_or_default().into_login_profile(&email);
        let outcome = self.establish(payload, profile)?;
        info!("Signed in as {email}");
        Ok(outcome)
    }

    pub async fn register(&self, registration: &Registration) -> Result<LoginOutcome> {
        let email = normalize_email(&registration.email, &registration.password)?;
        let request = registration.to_request(&email);

        let _permit = self.gate.try_begin(FLOW_NAME)?;
        let mut payload = self.api.register(&request).await?;
        let profile = payload
            .user
            .take()
            .unwrap_or_default()
            .into_registration_profile(&email);
        let outcome = self.establish(payload, profile)?;
        info!("Registered and signed in as {email}");
        Ok(outcome)
    }

    fn establish(&self, payload: AuthPayload, profile: UserProfile) -> Result<LoginOutcome> {
        let session = Session::new(payload.access, payload.refresh, Some(profile));
        self.api.session_store().save(&session)?;

        Ok(LoginOutcome {
            session,
            needs_username: payload.needs_username,
        })
    }
}

fn normalize_email(email: &str, password: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.trim().is_empty() {
        return Err(AuthError::validation(MISSING_CREDENTIALS_MESSAGE));
    }
    Ok(email)
}
