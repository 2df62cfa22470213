use crate::api::ApiClient;
use crate::wallet::handshake::WalletHandshake;
use crate::wallet::{
    PairingDisplay, RelayConnector, RelayWalletProvider, RequiredNamespaces,
    WalletPairingSession,
};
use crate::{AuthError, LoginGate, LoginOutcome, Result, WalletAddress};

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

const FLOW_NAME: &str = "QR wallet";

pub const DEFAULT_CHAIN_ID: &str = "eip155:1";
pub const DEFAULT_APPROVAL_TIMEOUT: Duration = Duration::from_secs(120);

/// Last step the QR flow reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrState {
    Idle,
    RelayConnecting,
    UriGenerated,
    AwaitingApproval,
    AccountReceived,
    NonceFetched,
    Signed,
    Verified,
    SessionEstablished,
    Cancelled,
    Failed,
}

impl fmt::Display for QrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::RelayConnecting => "relay-connecting",
            Self::UriGenerated => "uri-generated",
            Self::AwaitingApproval => "awaiting-approval",
            Self::AccountReceived => "account-received",
            Self::NonceFetched => "nonce-fetched",
            Self::Signed => "signed",
            Self::Verified => "verified",
            Self::SessionEstablished => "session-established",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Run `fut` unless `cancel` fires first. A result that lands after
/// cancellation is discarded.
async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AuthError::cancelled()),
        result = fut => {
            if cancel.is_cancelled() {
                Err(AuthError::cancelled())
            } else {
                result
            }
        }
    }
}

/// Sign in by pairing a phone wallet through a relay.
pub struct QrWalletFlow {
    api: Arc<ApiClient>,
    connector: Arc<dyn RelayConnector>,
    display: Arc<dyn PairingDisplay>,
    gate: LoginGate,
    project_id: Option<String>,
    chain_id: String,
    approval_timeout: Duration,
    cancel: CancellationToken,
    state: QrState,
    pairing: Option<WalletPairingSession>,
    failed_at: Option<QrState>,
}

impl QrWalletFlow {
    pub fn new(
        api: Arc<ApiClient>,
        connector: Arc<dyn RelayConnector>,
        display: Arc<dyn PairingDisplay>,
        gate: LoginGate,
    ) -> Self {
        Self {
            api,
            connector,
            display,
            gate,
            project_id: None,
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            approval_timeout: DEFAULT_APPROVAL_TIMEOUT,
            cancel: CancellationToken::new(),
            state: QrState::Idle,
            pairing: None,
            failed_at: None,
        }
    }

    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        self
    }

    pub fn with_chain_id(mut self, chain_id: &str) -> Self {
        self.chain_id = chain_id.to_string();
        self
    }

    pub fn with_approval_timeout(mut self, timeout: Duration) -> Self {
        self.approval_timeout = timeout;
        self
    }

    /// Handle for closing the flow from elsewhere (a dismissed modal, Ctrl-C).
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Fresh cancellation handle for another attempt after a cancel.
    pub fn reset(&mut self) {
        self.cancel = CancellationToken::new();
        self.state = QrState::Idle;
        self.pairing = None;
        self.failed_at = None;
    }

    pub fn state(&self) -> QrState {
        self.state
    }

    /// Step the last attempt was in when it failed or was cancelled.
    pub fn failed_at(&self) -> Option<QrState> {
        self.failed_at
    }

    /// Pairing in progress, if any.
    pub fn pairing(&self) -> Option<&WalletPairingSession> {
        self.pairing.as_ref()
    }

    fn transition(&mut self, next: QrState) {
        debug!("QR flow: {} -> {next}", self.state);
        self.state = next;
    }

    /// Run the whole flow. Cancelling at any point leaves the session store untouched.
    pub async fn connect(&mut self) -> Result<LoginOutcome> {
        let _permit = self.gate.try_begin(FLOW_NAME)?;
        self.state = QrState::Idle;
        self.failed_at = None;

        let result = self.run().await;
        if result.is_err() {
            self.failed_at = Some(self.state);
        }
        match &result {
            Ok(_) => {}
            Err(AuthError::Cancelled { .. }) => {
                info!("QR sign-in cancelled at {}", self.state);
                self.transition(QrState::Cancelled);
            }
            Err(e) => {
                warn!("QR sign-in failed at {}: {e}", self.state);
                self.transition(QrState::Failed);
            }
        }

        self.pairing = None;
        self.display.close();
        result
    }

    async fn run(&mut self) -> Result<LoginOutcome> {
        let cancel = self.cancel.clone();
        if cancel.is_cancelled() {
            return Err(AuthError::cancelled());
        }

        self.display.show_status("Preparing QR code…");
        self.transition(QrState::RelayConnecting);
        let project_id = self
            .project_id
            .clone()
            .ok_or_else(|| AuthError::relay_init("relay project id is not configured"))?;

        let connector = Arc::clone(&self.connector);
        let client = cancellable(&cancel, async {
            connector
                .init(&project_id)
                .await
                .map_err(|e| match e {
                    AuthError::RelayInit { .. } => e,
                    other => AuthError::relay_init(other.to_string()),
                })
        })
        .await?;

        let namespaces = RequiredNamespaces::for_chain(&self.chain_id);
        let proposal = cancellable(&cancel, client.connect(&namespaces)).await?;
        let uri = proposal
            .uri
            .filter(|uri| !uri.is_empty())
            .ok_or_else(AuthError::no_uri)?;
        self.pairing = Some(WalletPairingSession::new(uri.clone()));
        self.transition(QrState::UriGenerated);

        self.display
            .show_status("Scan with your phone wallet (MetaMask, Trust Wallet, etc.)");
        if let Err(e) = self.display.render_qr(&uri) {
            warn!("QR render failed, showing link instead: {e}");
            self.display.show_copyable_uri(&uri);
        }

        self.transition(QrState::AwaitingApproval);
        let timeout = self.approval_timeout;
        let approval = proposal.approval;
        let approved = cancellable(&cancel, async move {
            match tokio::time::timeout(timeout, approval).await {
                Ok(result) => result,
                Err(_) => Err(AuthError::approval_timeout(timeout.as_secs())),
            }
        })
        .await?;

        if let Some(pairing) = self.pairing.as_mut() {
            pairing.mark_approved(&approved.topic);
        }

        let account = approved
            .accounts
            .iter()
            .find(|a| !a.trim().is_empty())
            .ok_or_else(AuthError::no_account)?;
        let address = WalletAddress::from_account_id(account)?;
        self.transition(QrState::AccountReceived);

        let provider = RelayWalletProvider::new(
            client,
            approved.topic.clone(),
            self.chain_id.clone(),
            approved.accounts.clone(),
        );
        let handshake = WalletHandshake::new(Arc::clone(&self.api));

        self.display.show_status("Requesting sign-in challenge…");
        let challenge = cancellable(&cancel, handshake.fetch_challenge(&address)).await?;
        self.transition(QrState::NonceFetched);

        self.display
            .show_status("Approve the sign-in request in your wallet…");
        let signature =
            cancellable(&cancel, handshake.sign(&provider, challenge, &address)).await?;
        self.transition(QrState::Signed);

        self.display.show_status("Verifying…");
        let payload = cancellable(&cancel, handshake.verify(&address, &signature)).await?;
        self.transition(QrState::Verified);

        if cancel.is_cancelled() {
            return Err(AuthError::cancelled());
        }
        let outcome = handshake.establish(&address, payload)?;
        self.transition(QrState::SessionEstablished);
        info!("Signed in with phone wallet {}", address.short());

        Ok(outcome)
    }
}
