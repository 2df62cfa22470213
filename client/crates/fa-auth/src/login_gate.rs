use crate::{AuthError, Result};

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

/// Admits one login flow at a time across every flow sharing the gate.
#[derive(Debug, Clone, Default)]
pub struct LoginGate {
    active: Arc<Mutex<Option<&'static str>>>,
}

impl LoginGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<&'static str>> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim the gate for `flow`, or fail with `FlowInProgress`.
    pub fn try_begin(&self, flow: &'static str) -> Result<LoginPermit> {
        let mut slot = self.slot();
        if let Some(active) = *slot {
            return Err(AuthError::flow_in_progress(active));
        }

        *slot = Some(flow);
        debug!("Login flow started: {flow}");
        Ok(LoginPermit {
            active: Arc::clone(&self.active),
            flow,
        })
    }

    pub fn active_flow(&self) -> Option<&'static str> {
        *self.slot()
    }
}

/// Held for the lifetime of a flow; dropping it reopens the gate.
#[derive(Debug)]
pub struct LoginPermit {
    active: Arc<Mutex<Option<&'static str>>>,
    flow: &'static str,
}

impl Drop for LoginPermit {
    fn drop(&mut self) {
        let mut slot = self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
        debug!("Login flow finished: {}", self.flow);
    }
}
