use crate::error::{CliError, Result};

use fa_auth::{GuardDecision, LoginOutcome, UserProfile, display_name};

use serde_json::{Value, json};

/// Login result as printed; tokens never leave the session file.
pub fn outcome_json(outcome: &LoginOutcome) -> Value {
    let user = outcome.session.user.as_ref();
    json!({
        "signed_in": true,
        "greeting": format!("Welcome, {}", display_name(user)),
        "needs_username": outcome.needs_username,
        "user": user,
    })
}

pub fn guard_json(decision: &GuardDecision) -> Value {
    match decision {
        GuardDecision::Proceed {
            session,
            greeting,
            needs_username,
        } => json!({
            "signed_in": true,
            "greeting": greeting,
            "needs_username": needs_username,
            "user": session.user,
        }),
        GuardDecision::Redirect { location } => json!({
            "signed_in": false,
            "login_path": location,
        }),
    }
}

pub fn profile_json(profile: &UserProfile) -> Value {
    json!({
        "updated": true,
        "user": profile,
    })
}

pub fn render(value: &Value, pretty: bool) -> Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(output)
}

/// `Error [CODE]: message`, as written to stderr on failure.
pub fn error_line(error: &CliError) -> String {
    format!("Error [{}]: {}", error.error_code(), error.user_message())
}
