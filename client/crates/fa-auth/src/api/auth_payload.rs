use crate::{AuthError, UserProfile, WalletAddress};

use serde::Deserialize;

/// `data` of a successful login, registration or wallet verification.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub needs_username: bool,
}

impl AuthPayload {
    /// A payload without an access token cannot establish a session.
    pub(crate) fn ensure_access(self) -> Result<Self, AuthError> {
        if self.access.trim().is_empty() {
            return Err(AuthError::malformed(crate::error::INVALID_RESPONSE_MESSAGE));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile: Option<ApiUserSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUserSettings {
    #[serde(default)]
    pub risk_appetite: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ApiUser {
    fn joined_name(&self) -> Option<String> {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        let joined = format!("{first} {last}");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Profile after email/password login: "first last" only when both are set.
    pub(crate) fn into_login_profile(self, normalized_email: &str) -> UserProfile {
        let has_both = non_empty(self.first_name.clone()).is_some()
            && non_empty(self.last_name.clone()).is_some();
        let display_name = if has_both { self.joined_name() } else { None };
        self.into_credential_profile(display_name, normalized_email)
    }

    /// Profile after registration: whatever part of the name is set.
    pub(crate) fn into_registration_profile(self, normalized_email: &str) -> UserProfile {
        let display_name = self.joined_name();
        self.into_credential_profile(display_name, normalized_email)
    }

    fn into_credential_profile(
        self,
        display_name: Option<String>,
        normalized_email: &str,
    ) -> UserProfile {
        let display_name = display_name
            .or_else(|| non_empty(self.username.clone()))
            .unwrap_or_default();
        let settings = self.profile.unwrap_or_default();

        UserProfile {
            id: self.id,
            display_name,
            email: non_empty(self.email).or_else(|| Some(normalized_email.to_string())),
            username: non_empty(self.username),
            wallet_address: None,
            risk_appetite: settings.risk_appetite,
            experience_level: settings.experience_level,
        }
    }

    /// Profile after wallet verification; unnamed wallets get `Wallet 0xAbCd...1234`.
    pub(crate) fn into_wallet_profile(self, address: &WalletAddress) -> UserProfile {
        let display_name = non_empty(self.name.clone())
            .or_else(|| non_empty(self.username.clone()))
            .unwrap_or_else(|| format!("Wallet {}", address.short()));
        let settings = self.profile.unwrap_or_default();

        UserProfile {
            id: self.id,
            display_name,
            email: non_empty(self.email),
            username: non_empty(self.username),
            wallet_address: Some(address.to_string()),
            risk_appetite: settings.risk_appetite,
            experience_level: settings.experience_level,
        }
    }
}
