use crate::username::{display_name, needs_username};
use crate::{Session, SessionStore};

use std::sync::Arc;

use log::warn;

/// Outcome of checking a protected screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed {
        session: Session,
        greeting: String,
        needs_username: bool,
    },
    Redirect {
        location: String,
    },
}

/// Decides from local state alone whether a protected screen may render.
pub struct RouteGuard {
    store: Arc<dyn SessionStore>,
    login_path: String,
}

impl RouteGuard {
    pub fn new(store: Arc<dyn SessionStore>, login_path: &str) -> Self {
        Self {
            store,
            login_path: login_path.to_string(),
        }
    }

    pub fn check(&self) -> GuardDecision {
        let session = match self.store.load() {
            Ok(session) => session.filter(Session::is_active),
            Err(e) => {
                warn!("Session unreadable, redirecting to login: {e}");
                None
            }
        };

        match session {
            Some(session) => {
                let user = session.user.as_ref();
                GuardDecision::Proceed {
                    greeting: format!("Welcome, {}", display_name(user)),
                    needs_username: needs_username(user),
                    session,
                }
            }
            None => GuardDecision::Redirect {
                location: self.login_path.clone(),
            },
        }
    }
}
