use crate::api::{ApiClient, AuthPayload};
use crate::wallet::NonceChallenge;
use crate::{AuthError, LoginOutcome, Result, Session, WalletAddress, WalletProvider};

use std::sync::Arc;

use log::{info, warn};

/// Nonce, sign, verify, persist: the steps both wallet flows share.
pub(crate) struct WalletHandshake {
    api: Arc<ApiClient>,
}

impl WalletHandshake {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub(crate) async fn fetch_challenge(&self, address: &WalletAddress) -> Result<NonceChallenge> {
        self.api.wallet_nonce(address).await
    }

    /// Any provider failure is reported as a denied signature.
    pub(crate) async fn sign(
        &self,
        provider: &dyn WalletProvider,
        challenge: NonceChallenge,
        address: &WalletAddress,
    ) -> Result<String> {
        let message = challenge.into_message();
        match provider.sign(&message, address).await {
            Ok(signature) if !signature.trim().is_empty() => Ok(signature),
            Ok(_) => Err(AuthError::signature_denied("empty signature")),
            Err(e) => {
                warn!("{} provider did not sign: {e}", provider.name());
                Err(AuthError::signature_denied(e.user_message()))
            }
        }
    }

    pub(crate) async fn verify(
        &self,
        address: &WalletAddress,
        signature: &str,
    ) -> Result<AuthPayload> {
        self.api.wallet_verify(address, signature).await
    }

    /// Persist token, refresh token and profile together.
    pub(crate) fn establish(
        &self,
        address: &WalletAddress,
        payload: AuthPayload,
    ) -> Result<LoginOutcome> {
        let profile = payload.user.unwrap_or_default().into_wallet_profile(address);
        let session = Session::new(payload.access, payload.refresh, Some(profile));

        self.api.session_store().save(&session)?;
        info!("Wallet session established for {}", address.short());

        Ok(LoginOutcome {
            session,
            needs_username: payload.needs_username,
        })
    }
}
