use crate::{Result, WalletAddress};

use async_trait::async_trait;

/// Anything that can hand out accounts and produce `personal_sign` signatures.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// Ask the wallet for its accounts; may prompt the user.
    async fn request_accounts(&self) -> Result<Vec<String>>;

    /// Sign `message` as `address`; may prompt the user.
    async fn sign(&self, message: &str, address: &WalletAddress) -> Result<String>;
}
