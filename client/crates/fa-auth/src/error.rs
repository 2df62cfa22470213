use crate::session::SessionError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

pub const NO_PROVIDER_MESSAGE: &str = "No Web3 wallet found. Install MetaMask (https://metamask.io/download/) or another Web3 wallet, then refresh this page.";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server.";
pub const CHALLENGE_UNAVAILABLE_MESSAGE: &str = "Could not get sign-in challenge. Try again.";
pub const VERIFICATION_FAILED_MESSAGE: &str = "Sign-in verification failed. Please try again.";

/// Every way a login flow or an authenticated request can fail.
///
/// Flows return these as values; `user_message()` is the text to show.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP request error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed response: {message} {location}")]
    MalformedResponse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Rejected by server (status {status}): {message} {location}")]
    AuthRejected {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Session expired, sign in again at {login_path} {location}")]
    SessionExpired {
        login_path: String,
        location: ErrorLocation,
    },

    #[error("No wallet provider detected {location}")]
    NoProvider { location: ErrorLocation },

    #[error("Wallet request denied: {message} {location}")]
    UserDenied {
        message: String,
        location: ErrorLocation,
    },

    #[error("Sign-in challenge unavailable: {} {location}", .message.as_deref().unwrap_or("no nonce returned"))]
    ChallengeUnavailable {
        message: Option<String>,
        location: ErrorLocation,
    },

    #[error("Signature denied: {message} {location}")]
    SignatureDenied {
        message: String,
        location: ErrorLocation,
    },

    #[error("Signature verification failed: {} {location}", .message.as_deref().unwrap_or("no message"))]
    Verification {
        message: Option<String>,
        location: ErrorLocation,
    },

    #[error("Relay initialization failed: {message} {location}")]
    RelayInit {
        message: String,
        location: ErrorLocation,
    },

    #[error("Relay returned no pairing URI {location}")]
    NoUri { location: ErrorLocation },

    #[error("Wallet approval timed out after {timeout_secs}s {location}")]
    ApprovalTimeout {
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("No account received from wallet {location}")]
    NoAccount { location: ErrorLocation },

    #[error("Invalid account from wallet: {account} {location}")]
    InvalidAccount {
        account: String,
        location: ErrorLocation,
    },

    #[error("Login cancelled {location}")]
    Cancelled { location: ErrorLocation },

    #[error("Another login is already in progress ({active}) {location}")]
    FlowInProgress {
        active: &'static str,
        location: ErrorLocation,
    },

    #[error("QR code could not be rendered: {message} {location}")]
    QrRender {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session storage error: {source} {location}")]
    Session {
        #[source]
        source: SessionError,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Text suitable for showing to the user. Backend messages pass through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Network { .. } => NETWORK_MESSAGE.to_string(),
            Self::MalformedResponse { message, .. } => message.clone(),
            Self::AuthRejected { message, .. } => message.clone(),
            Self::SessionExpired { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            Self::NoProvider { .. } => NO_PROVIDER_MESSAGE.to_string(),
            Self::UserDenied { .. } => "Wallet connection was denied or failed.".to_string(),
            Self::ChallengeUnavailable { message, .. } => message
                .clone()
                .unwrap_or_else(|| CHALLENGE_UNAVAILABLE_MESSAGE.to_string()),
            Self::SignatureDenied { .. } => {
                "You need to sign the message in your wallet to continue.".to_string()
            }
            Self::Verification { message, .. } => message
                .clone()
                .unwrap_or_else(|| VERIFICATION_FAILED_MESSAGE.to_string()),
            Self::RelayInit { .. } => {
                "QR login failed. Try again or use email / extension.".to_string()
            }
            Self::NoUri { .. } => "Could not generate connection link.".to_string(),
            Self::ApprovalTimeout { .. } => {
                "Timed out waiting for your phone wallet. Scan the QR code again.".to_string()
            }
            Self::NoAccount { .. } => "No account received from wallet.".to_string(),
            Self::InvalidAccount { .. } => "Invalid account from wallet.".to_string(),
            Self::Cancelled { .. } => "Sign-in was cancelled.".to_string(),
            Self::FlowInProgress { .. } => {
                "A sign-in is already in progress. Finish or cancel it first.".to_string()
            }
            Self::QrRender { .. } => "QR image could not be rendered.".to_string(),
            Self::Session { source, .. } => source.recovery_hint().to_string(),
        }
    }

    /// Only transport failures are worth re-triggering unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION",
            Self::Network { .. } => "NETWORK",
            Self::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            Self::AuthRejected { .. } => "AUTH_REJECTED",
            Self::SessionExpired { .. } => "SESSION_EXPIRED",
            Self::NoProvider { .. } => "NO_PROVIDER",
            Self::UserDenied { .. } => "USER_DENIED",
            Self::ChallengeUnavailable { .. } => "CHALLENGE_UNAVAILABLE",
            Self::SignatureDenied { .. } => "SIGNATURE_DENIED",
            Self::Verification { .. } => "VERIFICATION_FAILED",
            Self::RelayInit { .. } => "RELAY_INIT",
            Self::NoUri { .. } => "NO_URI",
            Self::ApprovalTimeout { .. } => "APPROVAL_TIMEOUT",
            Self::NoAccount { .. } => "NO_ACCOUNT",
            Self::InvalidAccount { .. } => "INVALID_ACCOUNT",
            Self::Cancelled { .. } => "CANCELLED",
            Self::FlowInProgress { .. } => "FLOW_IN_PROGRESS",
            Self::QrRender { .. } => "QR_RENDER",
            Self::Session { .. } => "SESSION_STORAGE",
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::AuthRejected {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn session_expired(login_path: impl Into<String>) -> Self {
        Self::SessionExpired {
            login_path: login_path.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_provider() -> Self {
        Self::NoProvider {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn user_denied(message: impl Into<String>) -> Self {
        Self::UserDenied {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn challenge_unavailable(message: Option<String>) -> Self {
        Self::ChallengeUnavailable {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn signature_denied(message: impl Into<String>) -> Self {
        Self::SignatureDenied {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn verification(message: Option<String>) -> Self {
        Self::Verification {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn relay_init(message: impl Into<String>) -> Self {
        Self::RelayInit {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_uri() -> Self {
        Self::NoUri {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn approval_timeout(timeout_secs: u64) -> Self {
        Self::ApprovalTimeout {
            timeout_secs,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_account() -> Self {
        Self::NoAccount {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_account(account: impl Into<String>) -> Self {
        Self::InvalidAccount {
            account: account.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn cancelled() -> Self {
        Self::Cancelled {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn flow_in_progress(active: &'static str) -> Self {
        Self::FlowInProgress {
            active,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn qr_render(message: impl Into<String>) -> Self {
        Self::QrRender {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for AuthError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

impl From<SessionError> for AuthError {
    #[track_caller]
    fn from(source: SessionError) -> Self {
        AuthError::Session {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
