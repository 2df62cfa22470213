use crate::wallet::pairing_topic;

/// Transient state of one QR pairing. Lives only while the QR flow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletPairingSession {
    pub connection_uri: String,
    pub topic: Option<String>,
    pub approved: bool,
}

impl WalletPairingSession {
    pub fn new(connection_uri: String) -> Self {
        let topic = pairing_topic(&connection_uri);
        Self {
            connection_uri,
            topic,
            approved: false,
        }
    }

    pub fn mark_approved(&mut self, session_topic: &str) {
        self.topic = Some(session_topic.to_string());
        self.approved = true;
    }
}
