pub(crate) mod address;
pub(crate) mod extension_flow;
pub(crate) mod handshake;
pub(crate) mod http_relay;
pub(crate) mod json_rpc_provider;
pub(crate) mod nonce;
pub(crate) mod pairing_display;
pub(crate) mod pairing_session;
pub(crate) mod qr_flow;
pub(crate) mod relay;
pub(crate) mod relay_provider;
pub(crate) mod wallet_provider;

pub use address::WalletAddress;
pub use extension_flow::{ExtensionState, ExtensionWalletFlow};
pub use http_relay::{DEFAULT_POLL_INTERVAL, HttpRelayClient, HttpRelayConnector};
pub use json_rpc_provider::JsonRpcWalletProvider;
pub use nonce::NonceChallenge;
pub use pairing_display::{PairingDisplay, SilentDisplay, qr_image_url};
pub use pairing_session::WalletPairingSession;
pub use qr_flow::{DEFAULT_APPROVAL_TIMEOUT, DEFAULT_CHAIN_ID, QrState, QrWalletFlow};
pub use relay::{
    ApprovedSession, NamespaceRequirements, PairingProposal, RelayClient, RelayConnector,
    RelayRequest, RequiredNamespaces, pairing_topic,
};
pub use relay_provider::RelayWalletProvider;
pub use wallet_provider::WalletProvider;
