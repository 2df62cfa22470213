use crate::Result;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SIGNING_METHODS: [&str; 2] = ["personal_sign", "eth_sign"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRequirements {
    pub chains: Vec<String>,
    pub methods: Vec<String>,
    pub events: Vec<String>,
}

/// What the pairing asks the phone wallet to grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredNamespaces {
    pub eip155: NamespaceRequirements,
}

impl RequiredNamespaces {
    /// Signing on a single CAIP-2 chain.
    pub fn for_chain(chain_id: &str) -> Self {
        Self {
            eip155: NamespaceRequirements {
                chains: vec![chain_id.to_string()],
                methods: SIGNING_METHODS.iter().map(|m| m.to_string()).collect(),
                events: Vec::new(),
            },
        }
    }
}

/// A session the phone wallet approved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApprovedSession {
    pub topic: String,
    /// CAIP-10 account ids, first one is used.
    pub accounts: Vec<String>,
}

/// Result of starting a pairing: the link to show and a future that resolves
/// once the wallet approves (or rejects).
pub struct PairingProposal {
    pub uri: Option<String>,
    pub approval: BoxFuture<'static, Result<ApprovedSession>>,
}

/// JSON-RPC call forwarded through the relay to the wallet.
#[derive(Debug, Clone, Serialize)]
pub struct RelayRequest {
    pub method: String,
    pub params: Vec<Value>,
}

/// A connected relay client.
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn connect(&self, namespaces: &RequiredNamespaces) -> Result<PairingProposal>;

    async fn request(&self, topic: &str, chain_id: &str, request: RelayRequest) -> Result<Value>;
}

/// Creates relay clients for a project id.
#[async_trait]
pub trait RelayConnector: Send + Sync {
    async fn init(&self, project_id: &str) -> Result<Arc<dyn RelayClient>>;
}

/// Topic embedded in a pairing URI (`wc:<topic>@2?...`).
pub fn pairing_topic(uri: &str) -> Option<String> {
    let rest = uri.strip_prefix("wc:")?;
    let topic = rest.split(['@', '?']).next()?;
    (!topic.is_empty()).then(|| topic.to_string())
}
