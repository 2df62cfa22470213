use crate::{AuthError, Result};

use url::form_urlencoded;

/// Where the QR flow shows its progress: a modal, a terminal, a test double.
///
/// `close` may be called more than once.
pub trait PairingDisplay: Send + Sync {
    fn show_status(&self, status: &str);

    /// Render the connection URI as a scannable code.
    fn render_qr(&self, uri: &str) -> Result<()>;

    /// Fallback when no code can be rendered.
    fn show_copyable_uri(&self, uri: &str);

    fn close(&self);
}

/// Image URL for `uri` on a QR rendering service whose URL ends in the data parameter.
pub fn qr_image_url(service_prefix: &str, uri: &str) -> Result<String> {
    if service_prefix.trim().is_empty() {
        return Err(AuthError::qr_render("no QR image service configured"));
    }
    if uri.is_empty() {
        return Err(AuthError::qr_render("nothing to encode"));
    }

    let encoded: String = form_urlencoded::byte_serialize(uri.as_bytes()).collect();
    Ok(format!("{service_prefix}{encoded}"))
}

/// Display that discards everything; for headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDisplay;

impl PairingDisplay for SilentDisplay {
    fn show_status(&self, _status: &str) {}

    fn render_qr(&self, _uri: &str) -> Result<()> {
        Ok(())
    }

    fn show_copyable_uri(&self, _uri: &str) {}

    fn close(&self) {}
}
