//! Client-side authentication for FinanceAI: email/password, browser-style
//! wallet extensions and QR pairing with phone wallets, all ending in one
//! persisted session.

pub mod api;
pub(crate) mod credential_login;
pub(crate) mod error;
pub(crate) mod login_gate;
pub(crate) mod login_outcome;
pub(crate) mod logout;
pub(crate) mod route_guard;
pub mod session;
pub(crate) mod username;
pub mod wallet;

#[cfg(test)]
mod tests;

pub use api::{ApiClient, AuthPayload, RegisterRequest};
pub use credential_login::{CredentialLogin, Registration};
pub use error::{
    AuthError, CHALLENGE_UNAVAILABLE_MESSAGE, INVALID_RESPONSE_MESSAGE, NETWORK_MESSAGE,
    NO_PROVIDER_MESSAGE, Result, VERIFICATION_FAILED_MESSAGE,
};
pub use login_gate::{LoginGate, LoginPermit};
pub use login_outcome::LoginOutcome;
pub use logout::logout;
pub use route_guard::{GuardDecision, RouteGuard};
pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionError, SessionResult, SessionStore,
    UserProfile,
};
pub use username::{
    MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH, ProfileService, display_name, needs_username,
    validate_username,
};
pub use wallet::{
    ExtensionState, ExtensionWalletFlow, JsonRpcWalletProvider, PairingDisplay, QrState,
    QrWalletFlow, WalletAddress, WalletProvider,
};
