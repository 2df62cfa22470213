use crate::error::Result;

use fa_auth::api::resolve_csrf_token;
use fa_auth::wallet::{HttpRelayConnector, JsonRpcWalletProvider};
use fa_auth::{
    ApiClient, AuthError, CredentialLogin, ExtensionWalletFlow, FileSessionStore, LoginGate,
    PairingDisplay, ProfileService, QrWalletFlow, RouteGuard, WalletProvider,
};
use fa_config::Config;

use std::sync::Arc;
use std::time::Duration;

use log::info;

/// Everything a command needs, built once from configuration.
pub struct AppContext {
    pub config: Config,
    pub api: Arc<ApiClient>,
    pub gate: LoginGate,
    http: reqwest::Client,
}

impl AppContext {
    /// `server` replaces the configured API base URL.
    pub fn new(mut config: Config, server: Option<&str>) -> Result<Self> {
        if let Some(server) = server {
            config.api.base_url = server.to_string();
        }
        config.validate()?;

        let timeout = Duration::from_secs(config.api.timeout_secs);
        let store = Arc::new(FileSessionStore::new(config.session_path()?));
        let csrf_token = resolve_csrf_token(
            config.api.csrf_token.as_deref(),
            config.api.csrf_cookie.as_deref(),
        );
        let api = ApiClient::new(&config.api.base_url, store)
            .with_timeout(timeout)?
            .with_csrf_token(csrf_token)
            .with_login_path(&config.api.login_path);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AuthError::from)?;

        Ok(Self {
            config,
            api: Arc::new(api),
            gate: LoginGate::new(),
            http,
        })
    }

    pub fn credential_login(&self) -> CredentialLogin {
        CredentialLogin::new(Arc::clone(&self.api), self.gate.clone())
    }

    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(Arc::clone(&self.api))
    }

    pub fn route_guard(&self) -> RouteGuard {
        RouteGuard::new(
            Arc::clone(self.api.session_store()),
            &self.config.api.login_path,
        )
    }

    /// Probe the wallet endpoint; a missing or silent endpoint yields a flow
    /// that fails with `NoProvider`.
    pub async fn extension_flow(&self, provider_url: Option<&str>) -> ExtensionWalletFlow {
        let endpoint = provider_url.or(self.config.wallet.provider_url.as_deref());

        let provider: Option<Arc<dyn WalletProvider>> = match endpoint {
            Some(endpoint) => JsonRpcWalletProvider::detect(endpoint, self.http.clone())
                .await
                .map(|p| Arc::new(p) as Arc<dyn WalletProvider>),
            None => {
                info!("No wallet provider endpoint configured");
                None
            }
        };

        ExtensionWalletFlow::new(Arc::clone(&self.api), provider, self.gate.clone())
    }

    /// QR flow over the HTTP relay bridge. Without a relay URL the display
    /// still works but the relay init step fails.
    pub fn qr_flow(
        &self,
        project_id: Option<String>,
        relay_url: Option<&str>,
        display: Arc<dyn PairingDisplay>,
    ) -> QrWalletFlow {
        let wallet = &self.config.wallet;
        let relay_url = relay_url
            .or(wallet.relay_url.as_deref())
            .unwrap_or_default();
        let project_id = project_id.or_else(|| wallet.project_id().map(String::from));

        let connector = HttpRelayConnector::new(relay_url, self.http.clone());
        QrWalletFlow::new(
            Arc::clone(&self.api),
            Arc::new(connector),
            display,
            self.gate.clone(),
        )
        .with_project_id(project_id)
        .with_chain_id(&wallet.chain_id)
        .with_approval_timeout(Duration::from_secs(wallet.approval_timeout_secs))
    }
}
