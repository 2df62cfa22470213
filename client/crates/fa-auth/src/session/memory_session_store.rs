use crate::session::{
    Session, SessionStore,
    error::{Result as SessionResult, SessionError},
};

use std::sync::Mutex;

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionResult<Option<Session>> {
        let guard = self.session.lock().map_err(|_| SessionError::poisoned())?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        let mut guard = self.session.lock().map_err(|_| SessionError::poisoned())?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let mut guard = self.session.lock().map_err(|_| SessionError::poisoned())?;
        *guard = None;
        Ok(())
    }
}
