use crate::wallet::{
    ApprovedSession, PairingProposal, RelayClient, RelayConnector, RelayRequest,
    RequiredNamespaces,
};
use crate::{AuthError, Result};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use log::{debug, info};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Connects to a relay bridge that speaks plain HTTP:
///
/// * `POST {relay}/v1/pairings` starts a pairing
/// * `GET {relay}/v1/pairings/{topic}` reports approval
/// * `POST {relay}/v1/sessions/{topic}/requests` forwards a wallet call
pub struct HttpRelayConnector {
    relay_url: String,
    client: ReqwestClient,
    poll_interval: Duration,
}

impl HttpRelayConnector {
    pub fn new(relay_url: &str, client: ReqwestClient) -> Self {
        Self {
            relay_url: relay_url.trim_end_matches('/').to_string(),
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

#[async_trait]
impl RelayConnector for HttpRelayConnector {
    async fn init(&self, project_id: &str) -> Result<Arc<dyn RelayClient>> {
        if project_id.trim().is_empty() {
            return Err(AuthError::relay_init("relay project id is empty"));
        }
        Url::parse(&self.relay_url)
            .map_err(|e| AuthError::relay_init(format!("invalid relay URL: {e}")))?;

        info!("Relay client ready at {}", self.relay_url);
        Ok(Arc::new(HttpRelayClient {
            base_url: self.relay_url.clone(),
            project_id: project_id.trim().to_string(),
            client: self.client.clone(),
            poll_interval: self.poll_interval,
        }))
    }
}

pub struct HttpRelayClient {
    base_url: String,
    project_id: String,
    client: ReqwestClient,
    poll_interval: Duration,
}

#[derive(Serialize)]
struct CreatePairing<'a> {
    project_id: &'a str,
    required_namespaces: &'a RequiredNamespaces,
}

#[derive(Deserialize)]
struct PairingCreated {
    topic: String,
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Deserialize)]
struct PairingStatus {
    #[serde(default)]
    approved: bool,
    #[serde(default)]
    rejected: bool,
    #[serde(default)]
    session_topic: Option<String>,
    #[serde(default)]
    accounts: Vec<String>,
}

#[derive(Serialize)]
struct ForwardRequest<'a> {
    chain_id: &'a str,
    request: &'a RelayRequest,
}

#[derive(Deserialize)]
struct ForwardResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ForwardError>,
}

#[derive(Deserialize)]
struct ForwardError {
    message: String,
}

async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if text.trim().is_empty() {
        format!("relay returned status {}", status.as_u16())
    } else {
        text
    }
}

/// Poll a pairing until the wallet decides.
async fn wait_for_approval(
    client: ReqwestClient,
    status_url: String,
    pairing_topic: String,
    poll_interval: Duration,
) -> Result<ApprovedSession> {
    loop {
        let response = client.get(&status_url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(AuthError::rejected(status, error_body(response).await));
        }

        let status: PairingStatus = response
            .json()
            .await
            .map_err(|e| AuthError::malformed(format!("Invalid pairing status: {e}")))?;

        if status.rejected {
            return Err(AuthError::user_denied("Pairing was rejected in the wallet."));
        }
        if status.approved {
            let topic = status
                .session_topic
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| pairing_topic.clone());
            debug!("Pairing {pairing_topic} approved as session {topic}");
            return Ok(ApprovedSession {
                topic,
                accounts: status.accounts,
            });
        }

        tokio::time::sleep(poll_interval).await;
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn connect(&self, namespaces: &RequiredNamespaces) -> Result<PairingProposal> {
        let url = format!("{}/v1/pairings", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreatePairing {
                project_id: &self.project_id,
                required_namespaces: namespaces,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(AuthError::rejected(status, error_body(response).await));
        }

        let created: PairingCreated = response
            .json()
            .await
            .map_err(|e| AuthError::malformed(format!("Invalid pairing response: {e}")))?;

        let status_url = format!("{}/v1/pairings/{}", self.base_url, created.topic);
        let approval = wait_for_approval(
            self.client.clone(),
            status_url,
            created.topic,
            self.poll_interval,
        )
        .boxed();

        Ok(PairingProposal {
            uri: created.uri,
            approval,
        })
    }

    async fn request(&self, topic: &str, chain_id: &str, request: RelayRequest) -> Result<Value> {
        let url = format!("{}/v1/sessions/{}/requests", self.base_url, topic);
        let response = self
            .client
            .post(&url)
            .json(&ForwardRequest {
                chain_id,
                request: &request,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(AuthError::rejected(status, error_body(response).await));
        }

        let forwarded: ForwardResponse = response
            .json()
            .await
            .map_err(|e| AuthError::malformed(format!("Invalid relay response: {e}")))?;

        if let Some(error) = forwarded.error {
            return Err(AuthError::signature_denied(error.message));
        }

        forwarded
            .result
            .ok_or_else(|| AuthError::malformed(format!("{} returned no result", request.method)))
    }
}
