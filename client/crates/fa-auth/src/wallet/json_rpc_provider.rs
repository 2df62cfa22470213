use crate::{AuthError, Result, WalletAddress, WalletProvider};

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const JSON_RPC_VERSION: &str = "2.0";

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// EIP-1193 style provider reached over JSON-RPC (a local wallet bridge).
pub struct JsonRpcWalletProvider {
    endpoint: String,
    client: ReqwestClient,
    next_id: AtomicU64,
}

impl JsonRpcWalletProvider {
    pub fn new(endpoint: &str, client: ReqwestClient) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client,
            next_id: AtomicU64::new(1),
        }
    }

    /// Probe `endpoint` with `eth_chainId`; `None` when nothing answers.
    pub async fn detect(endpoint: &str, client: ReqwestClient) -> Option<Self> {
        let provider = Self::new(endpoint, client);
        match provider.call("eth_chainId", json!([])).await {
            Ok(chain) => {
                info!("Wallet provider detected at {endpoint} (chain {chain})");
                Some(provider)
            }
            Err(e) => {
                debug!("No wallet provider at {endpoint}: {e}");
                None
            }
        }
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = RpcRequest {
            jsonrpc: JSON_RPC_VERSION,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let response: RpcResponse = response
            .json()
            .await
            .map_err(|e| AuthError::malformed(format!("Invalid JSON-RPC response: {e}")))?;

        if let Some(error) = response.error {
            return Err(AuthError::user_denied(format!(
                "{} (code {})",
                error.message, error.code
            )));
        }

        response
            .result
            .ok_or_else(|| AuthError::malformed(format!("{method} returned no result")))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWalletProvider {
    fn name(&self) -> &str {
        "json-rpc"
    }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        let result = self.call("eth_requestAccounts", json!([])).await?;
        serde_json::from_value(result)
            .map_err(|e| AuthError::malformed(format!("Accounts were not a list: {e}")))
    }

    async fn sign(&self, message: &str, address: &WalletAddress) -> Result<String> {
        let result = self
            .call("personal_sign", json!([message, address.as_str()]))
            .await?;
        match result {
            Value::String(signature) => Ok(signature),
            other => Err(AuthError::malformed(format!(
                "Signature was not a string: {other}"
            ))),
        }
    }
}
