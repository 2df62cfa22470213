use crate::api::ApiClient;
use crate::{AuthError, Result, UserProfile};

use std::sync::Arc;

use log::info;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;

const WALLET_USERNAME_PREFIX: &str = "wallet_0x";
const GENERATED_NAME_PREFIX: &str = "wallet_";

/// True while the user still carries an auto-generated wallet name.
pub fn needs_username(user: Option<&UserProfile>) -> bool {
    let Some(user) = user else {
        return false;
    };

    user.username
        .as_deref()
        .filter(|u| !u.is_empty())
        .or(Some(user.display_name.as_str()))
        .is_some_and(|name| name.starts_with(GENERATED_NAME_PREFIX))
}

/// Name to greet the user with. Generated wallet usernames are shortened to `0xAbCdEf...1234`.
pub fn display_name(user: Option<&UserProfile>) -> String {
    let Some(user) = user else {
        return "User".to_string();
    };

    let name = user
        .username
        .as_deref()
        .filter(|u| !u.is_empty())
        .or_else(|| Some(user.display_name.as_str()).filter(|n| !n.is_empty()));

    match name {
        None => "User".to_string(),
        Some(name) if name.starts_with(WALLET_USERNAME_PREFIX) => {
            let chars: Vec<char> = name.chars().collect();
            let head: String = chars.iter().skip(9).take(6).collect();
            let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
            format!("0x{head}...{tail}")
        }
        Some(name) => name.to_string(),
    }
}

/// Trimmed username if it is 3 to 30 ASCII letters, digits or underscores.
pub fn validate_username(raw: &str) -> Result<String> {
    let username = raw.trim();
    let length = username.chars().count();

    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
        return Err(AuthError::validation(format!(
            "Username must be {MIN_USERNAME_LENGTH}-{MAX_USERNAME_LENGTH} characters."
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AuthError::validation(
            "Username may only contain letters, numbers and underscores.",
        ));
    }

    Ok(username.to_string())
}

/// Profile edits that need a signed-in session.
pub struct ProfileService {
    api: Arc<ApiClient>,
}

impl ProfileService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Save a username on the server, then refresh the cached profile.
    pub async fn set_username(&self, raw: &str) -> Result<UserProfile> {
        let username = validate_username(raw)?;
        let saved = self.api.update_username(&username).await?;

        let store = self.api.session_store();
        let Some(mut session) = store.load()? else {
            return Err(AuthError::session_expired(self.api.login_path()));
        };

        let mut profile = session.user.take().unwrap_or_default();
        profile.username = Some(saved.clone());
        profile.display_name = saved;
        session.user = Some(profile.clone());
        store.save(&session)?;

        info!("Username updated");
        Ok(profile)
    }
}
