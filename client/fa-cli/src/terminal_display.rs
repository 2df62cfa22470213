use fa_auth::wallet::{PairingDisplay, qr_image_url};

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use log::warn;

/// Pairing display for a terminal: status lines, a QR image link, and the raw
/// connection URI as a copyable fallback.
pub struct TerminalDisplay {
    qr_image_service: String,
    out: Mutex<Box<dyn Write + Send>>,
    closed: AtomicBool,
}

impl TerminalDisplay {
    /// Writes to stderr so stdout stays machine-readable.
    pub fn stderr(qr_image_service: &str) -> Self {
        Self::with_writer(qr_image_service, Box::new(std::io::stderr()))
    }

    pub fn with_writer(qr_image_service: &str, out: Box<dyn Write + Send>) -> Self {
        Self {
            qr_image_service: qr_image_service.to_string(),
            out: Mutex::new(out),
            closed: AtomicBool::new(false),
        }
    }

    fn write_line(&self, line: &str) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            warn!("Failed to write to terminal: {e}");
        }
    }
}

impl PairingDisplay for TerminalDisplay {
    fn show_status(&self, status: &str) {
        self.write_line(&format!("» {status}"));
    }

    fn render_qr(&self, uri: &str) -> fa_auth::Result<()> {
        let image_url = qr_image_url(&self.qr_image_service, uri)?;
        self.write_line("Open this QR code and scan it with your phone wallet:");
        self.write_line(&format!("  {image_url}"));
        Ok(())
    }

    fn show_copyable_uri(&self, uri: &str) {
        self.write_line("Copy this link into your wallet app:");
        self.write_line(&format!("  {uri}"));
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.write_line("» Done.");
        }
    }
}
