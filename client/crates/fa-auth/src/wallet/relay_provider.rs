use crate::wallet::{RelayClient, RelayRequest};
use crate::{AuthError, Result, WalletAddress, WalletProvider};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// Signs through an approved relay session on the user's phone.
pub struct RelayWalletProvider {
    client: Arc<dyn RelayClient>,
    topic: String,
    chain_id: String,
    accounts: Vec<String>,
}

impl RelayWalletProvider {
    pub fn new(
        client: Arc<dyn RelayClient>,
        topic: String,
        chain_id: String,
        accounts: Vec<String>,
    ) -> Self {
        Self {
            client,
            topic,
            chain_id,
            accounts,
        }
    }
}

#[async_trait]
impl WalletProvider for RelayWalletProvider {
    fn name(&self) -> &str {
        "relay"
    }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        Ok(self.accounts.clone())
    }

    async fn sign(&self, message: &str, address: &WalletAddress) -> Result<String> {
        let request = RelayRequest {
            method: "personal_sign".to_string(),
            params: vec![
                Value::String(message.to_string()),
                Value::String(address.to_string()),
            ],
        };

        match self.client.request(&self.topic, &self.chain_id, request).await? {
            Value::String(signature) if !signature.is_empty() => Ok(signature),
            _ => Err(AuthError::signature_denied("Signature was not received.")),
        }
    }
}
