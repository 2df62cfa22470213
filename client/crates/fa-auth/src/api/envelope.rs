use serde::Deserialize;
use serde_json::Value;

/// `{status: "success"|"error", data?, message?}` wrapper used by every endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    /// Framework-level errors sometimes arrive as `detail` instead of `message`
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Server-provided message, falling back to `detail`.
    pub fn error_message(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return Some(message.to_string());
        }

        match &self.detail {
            Some(Value::String(detail)) if !detail.trim().is_empty() => Some(detail.clone()),
            Some(Value::Null) | None => None,
            Some(Value::String(_)) => None,
            Some(other) => Some(other.to_string()),
        }
    }
}
