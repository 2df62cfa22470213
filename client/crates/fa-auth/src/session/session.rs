use crate::UserProfile;

use serde::{Deserialize, Serialize};

/// Tokens plus the cached profile they belong to.
///
/// Field names match the persisted keys: `token`, `refresh`, `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "token")]
    pub access_token: String,
    #[serde(rename = "refresh", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl Session {
    /// Build a session; an empty refresh token is stored as absent.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        user: Option<UserProfile>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.filter(|token| !token.is_empty()),
            user,
        }
    }

    /// Presence check only; expiry is discovered on the first rejected request.
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty()
    }
}
