//! Shared fixtures for fa-auth integration tests
#![allow(dead_code)]

use fa_auth::wallet::{
    ApprovedSession, PairingDisplay, PairingProposal, RelayClient, RelayConnector, RelayRequest,
    RequiredNamespaces,
};
use fa_auth::{
    ApiClient, AuthError, MemorySessionStore, Result, Session, SessionStore, UserProfile,
    WalletAddress, WalletProvider,
};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::FutureExt;
use serde_json::{Value, json};

pub const ADDRESS: &str = "0xAbCdEf0123456789aBcDeF0123456789AbCd1234";
pub const ACCOUNT: &str = "eip155:1:0xAbCdEf0123456789aBcDeF0123456789AbCd1234";
pub const NONCE: &str = "Sign in to FinanceAI: 8f3a";
pub const SIGNATURE: &str = "0xsig";

pub fn api_for(uri: &str) -> (Arc<ApiClient>, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let api = Arc::new(ApiClient::new(uri, store.clone()));
    (api, store)
}

pub fn signed_in_store() -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_session(Session::new(
        "tok1",
        Some("ref1".to_string()),
        Some(UserProfile {
            display_name: "Ada".to_string(),
            username: Some("wallet_0xabc123def4567890".to_string()),
            ..UserProfile::default()
        }),
    )))
}

pub fn success(data: Value) -> Value {
    json!({"status": "success", "data": data})
}

pub fn failure(message: &str) -> Value {
    json!({"status": "error", "message": message})
}

pub fn stored(store: &MemorySessionStore) -> Option<Session> {
    store.load().unwrap()
}

// =========================================================================
// Wallet provider double
// =========================================================================

pub struct FakeProvider {
    accounts: Result<Vec<String>>,
    signature: Option<String>,
    pub signed_messages: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn signing(accounts: &[&str], signature: &str) -> Self {
        Self {
            accounts: Ok(accounts.iter().map(|a| a.to_string()).collect()),
            signature: Some(signature.to_string()),
            signed_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn refusing_accounts() -> Self {
        Self {
            accounts: Err(AuthError::user_denied("User rejected the request.")),
            signature: None,
            signed_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn refusing_signature(accounts: &[&str]) -> Self {
        Self {
            accounts: Ok(accounts.iter().map(|a| a.to_string()).collect()),
            signature: None,
            signed_messages: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WalletProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        match &self.accounts {
            Ok(accounts) => Ok(accounts.clone()),
            Err(_) => Err(AuthError::user_denied("User rejected the request.")),
        }
    }

    async fn sign(&self, message: &str, _address: &WalletAddress) -> Result<String> {
        self.signed_messages.lock().unwrap().push(message.to_string());
        self.signature
            .clone()
            .ok_or_else(|| AuthError::user_denied("User rejected the signature."))
    }
}

// =========================================================================
// Relay doubles
// =========================================================================

#[derive(Clone)]
pub enum Approval {
    Accounts(Vec<String>),
    After(Duration, Vec<String>),
    Never,
}

pub struct FakeRelay {
    pub uri: Option<String>,
    pub approval: Approval,
    pub fail_init: bool,
    pub approval_resolved: AtomicBool,
    pub init_calls: AtomicUsize,
    pub requests: Mutex<Vec<RelayRequest>>,
}

impl FakeRelay {
    pub fn approving(accounts: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            uri: Some("wc:pairing1@2?relay-protocol=irn&symKey=k".to_string()),
            approval: Approval::Accounts(accounts.iter().map(|a| a.to_string()).collect()),
            fail_init: false,
            approval_resolved: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn never_approving() -> Arc<Self> {
        Arc::new(Self {
            uri: Some("wc:pairing1@2?relay-protocol=irn&symKey=k".to_string()),
            approval: Approval::Never,
            fail_init: false,
            approval_resolved: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Approval that only lands once `delay` has passed.
    pub fn approving_after(delay: Duration, accounts: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            uri: Some("wc:pairing1@2?relay-protocol=irn&symKey=k".to_string()),
            approval: Approval::After(
                delay,
                accounts.iter().map(|a| a.to_string()).collect(),
            ),
            fail_init: false,
            approval_resolved: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            uri: None,
            approval: Approval::Never,
            fail_init: true,
            approval_resolved: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn without_uri() -> Arc<Self> {
        Arc::new(Self {
            uri: None,
            approval: Approval::Never,
            fail_init: false,
            approval_resolved: AtomicBool::new(false),
            init_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn init_count(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }
}

/// Connector handing out clients that share the relay's recorded state.
pub struct FakeConnector(pub Arc<FakeRelay>);

#[async_trait]
impl RelayConnector for FakeConnector {
    async fn init(&self, _project_id: &str) -> Result<Arc<dyn RelayClient>> {
        self.0.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_init {
            return Err(AuthError::relay_init("relay unreachable"));
        }
        Ok(Arc::new(FakeRelayClient(Arc::clone(&self.0))))
    }
}

pub struct FakeRelayClient(Arc<FakeRelay>);

#[async_trait]
impl RelayClient for FakeRelayClient {
    async fn connect(&self, _namespaces: &RequiredNamespaces) -> Result<PairingProposal> {
        let approval = match self.0.approval.clone() {
            Approval::Accounts(accounts) => futures::future::ready(Ok(ApprovedSession {
                topic: "session1".to_string(),
                accounts,
            }))
            .boxed(),
            Approval::After(delay, accounts) => {
                let relay = Arc::clone(&self.0);
                async move {
                    tokio::time::sleep(delay).await;
                    relay.approval_resolved.store(true, Ordering::SeqCst);
                    Ok(ApprovedSession {
                        topic: "session1".to_string(),
                        accounts,
                    })
                }
                .boxed()
            }
            Approval::Never => futures::future::pending::<Result<ApprovedSession>>().boxed(),
        };

        Ok(PairingProposal {
            uri: self.0.uri.clone(),
            approval,
        })
    }

    async fn request(&self, _topic: &str, _chain_id: &str, request: RelayRequest) -> Result<Value> {
        self.0.requests.lock().unwrap().push(request);
        Ok(Value::String(SIGNATURE.to_string()))
    }
}

// =========================================================================
// Display double
// =========================================================================

#[derive(Default)]
pub struct RecordingDisplay {
    pub fail_render: bool,
    pub statuses: Mutex<Vec<String>>,
    pub rendered: Mutex<Vec<String>>,
    pub copyable: Mutex<Vec<String>>,
    pub closed: AtomicUsize,
}

impl RecordingDisplay {
    pub fn failing_render() -> Self {
        Self {
            fail_render: true,
            ..Self::default()
        }
    }
}

impl PairingDisplay for RecordingDisplay {
    fn show_status(&self, status: &str) {
        self.statuses.lock().unwrap().push(status.to_string());
    }

    fn render_qr(&self, uri: &str) -> Result<()> {
        if self.fail_render {
            return Err(AuthError::qr_render("renderer offline"));
        }
        self.rendered.lock().unwrap().push(uri.to_string());
        Ok(())
    }

    fn show_copyable_uri(&self, uri: &str) {
        self.copyable.lock().unwrap().push(uri.to_string());
    }

    fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
