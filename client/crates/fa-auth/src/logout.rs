use crate::api::ApiClient;
use crate::Result;

use log::{info, warn};

/// Invalidate the refresh token if possible, then forget the local session.
///
/// Server failures are logged and ignored; the local session is always cleared.
pub async fn logout(api: &ApiClient) -> Result<()> {
    let store = api.session_store();
    let session = match store.load() {
        Ok(session) => session,
        Err(e) => {
            warn!("Could not read session before logout: {e}");
            None
        }
    };

    if let Some(refresh) = session.as_ref().and_then(|s| s.refresh_token.as_deref())
        && let Err(e) = api.logout(refresh).await
    {
        warn!("Server logout failed, clearing local session anyway: {e}");
    }

    store.clear()?;
    info!("Signed out");
    Ok(())
}
