use crate::{ConfigError, ConfigErrorResult, DEFAULT_CHAIN_ID, DEFAULT_QR_IMAGE_SERVICE};

use serde::Deserialize;
use url::Url;

// Approval wait constraints for QR login
pub const MIN_APPROVAL_TIMEOUT_SECS: u64 = 10;
pub const MAX_APPROVAL_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_APPROVAL_TIMEOUT_SECS: u64 = 120;

/// Wallet login settings for both transports.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of a local wallet (extension transport)
    pub provider_url: Option<String>,
    /// Relay project identifier (QR transport)
    pub project_id: Option<String>,
    /// Relay bridge endpoint (QR transport)
    pub relay_url: Option<String>,
    /// Chain the pairing session is requested for
    pub chain_id: String,
    /// How long to wait for the phone wallet to approve pairing
    pub approval_timeout_secs: u64,
    /// Image service prefix; the URL-encoded pairing URI is appended
    pub qr_image_service: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            provider_url: None,
            project_id: None,
            relay_url: None,
            chain_id: String::from(DEFAULT_CHAIN_ID),
            approval_timeout_secs: DEFAULT_APPROVAL_TIMEOUT_SECS,
            qr_image_service: String::from(DEFAULT_QR_IMAGE_SERVICE),
        }
    }
}

impl WalletConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.approval_timeout_secs < MIN_APPROVAL_TIMEOUT_SECS
            || self.approval_timeout_secs > MAX_APPROVAL_TIMEOUT_SECS
        {
            return Err(ConfigError::wallet(format!(
                "wallet.approval_timeout_secs must be {}-{}, got {}",
                MIN_APPROVAL_TIMEOUT_SECS, MAX_APPROVAL_TIMEOUT_SECS, self.approval_timeout_secs
            )));
        }

        // CAIP-2: namespace:reference
        let mut parts = self.chain_id.splitn(2, ':');
        let namespace = parts.next().unwrap_or_default();
        let reference = parts.next().unwrap_or_default();
        if namespace.is_empty() || reference.is_empty() {
            return Err(ConfigError::wallet(format!(
                "wallet.chain_id must look like 'eip155:1', got {}",
                self.chain_id
            )));
        }

        for (name, value) in [
            ("wallet.provider_url", &self.provider_url),
            ("wallet.relay_url", &self.relay_url),
        ] {
            if let Some(raw) = value
                && let Err(e) = Url::parse(raw)
            {
                return Err(ConfigError::wallet(format!(
                    "{name} is not a valid URL ({raw}): {e}"
                )));
            }
        }

        if let Some(project_id) = &self.project_id
            && project_id.trim().is_empty()
        {
            return Err(ConfigError::wallet("wallet.project_id cannot be blank"));
        }

        Ok(())
    }

    /// The project id, if one is configured and non-blank.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
