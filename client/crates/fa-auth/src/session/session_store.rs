use crate::session::{Session, error::Result as SessionResult};

use log::warn;

/// Persistence seam for the process-wide session.
///
/// Implementations must write token and profile together: after `save`
/// returns, `load` yields either the whole new session or, on failure, the
/// previous one.
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, if any. Never touches the network.
    fn load(&self) -> SessionResult<Option<Session>>;

    /// Persist token, refresh token and profile as one unit.
    fn save(&self, session: &Session) -> SessionResult<()>;

    /// Remove every persisted key.
    fn clear(&self) -> SessionResult<()>;

    /// True iff a non-empty access token is present.
    fn is_active(&self) -> bool {
        match self.load() {
            Ok(Some(session)) => session.is_active(),
            Ok(None) => false,
            Err(e) => {
                warn!("Treating unreadable session as signed out: {e}");
                false
            }
        }
    }
}
