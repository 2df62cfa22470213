use crate::api::ApiClient;
use crate::wallet::handshake::WalletHandshake;
use crate::{AuthError, LoginGate, LoginOutcome, Result, WalletAddress, WalletProvider};

use std::fmt;
use std::sync::Arc;

use log::{info, warn};

const FLOW_NAME: &str = "extension wallet";

/// Last step the extension flow reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionState {
    Idle,
    ProviderCheck,
    AddressRequested,
    NonceFetched,
    Signed,
    Verified,
    SessionEstablished,
    Failed,
}

impl fmt::Display for ExtensionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ProviderCheck => "provider-check",
            Self::AddressRequested => "address-requested",
            Self::NonceFetched => "nonce-fetched",
            Self::Signed => "signed",
            Self::Verified => "verified",
            Self::SessionEstablished => "session-established",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Sign in with a wallet the client can talk to directly.
pub struct ExtensionWalletFlow {
    api: Arc<ApiClient>,
    provider: Option<Arc<dyn WalletProvider>>,
    gate: LoginGate,
    state: ExtensionState,
}

impl ExtensionWalletFlow {
    /// `provider` is `None` when detection found nothing.
    pub fn new(
        api: Arc<ApiClient>,
        provider: Option<Arc<dyn WalletProvider>>,
        gate: LoginGate,
    ) -> Self {
        Self {
            api,
            provider,
            gate,
            state: ExtensionState::Idle,
        }
    }

    pub fn state(&self) -> ExtensionState {
        self.state
    }

    fn transition(&mut self, next: ExtensionState) {
        log::debug!("Extension flow: {} -> {next}", self.state);
        self.state = next;
    }

    /// Run the whole flow. The session store is only written on success.
    pub async fn connect(&mut self) -> Result<LoginOutcome> {
        let _permit = self.gate.try_begin(FLOW_NAME)?;
        self.state = ExtensionState::Idle;

        let result = self.run().await;
        if let Err(ref e) = result {
            warn!("Extension wallet sign-in failed at {}: {e}", self.state);
            self.transition(ExtensionState::Failed);
        }
        result
    }

    async fn run(&mut self) -> Result<LoginOutcome> {
        let provider = self.provider.clone().ok_or_else(AuthError::no_provider)?;
        self.transition(ExtensionState::ProviderCheck);

        let accounts = provider.request_accounts().await.map_err(|e| {
            warn!("{} provider refused accounts: {e}", provider.name());
            AuthError::user_denied(e.user_message())
        })?;
        let account = accounts
            .into_iter()
            .find(|a| !a.trim().is_empty())
            .ok_or_else(|| AuthError::user_denied("no account returned"))?;
        let address = WalletAddress::parse(&account)?;
        self.transition(ExtensionState::AddressRequested);

        let handshake = WalletHandshake::new(Arc::clone(&self.api));

        let challenge = handshake.fetch_challenge(&address).await?;
        self.transition(ExtensionState::NonceFetched);

        let signature = handshake
            .sign(provider.as_ref(), challenge, &address)
            .await?;
        self.transition(ExtensionState::Signed);

        let payload = handshake.verify(&address, &signature).await?;
        self.transition(ExtensionState::Verified);

        let outcome = handshake.establish(&address, payload)?;
        self.transition(ExtensionState::SessionEstablished);
        info!("Signed in with {} wallet", provider.name());

        Ok(outcome)
    }
}
