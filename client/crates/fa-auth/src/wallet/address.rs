use crate::{AuthError, Result};

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static ADDRESS_PATTERN: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$"));

/// A checked `0x`-prefixed 20-byte account address. Case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(raw: &str) -> Result<Self> {
        let pattern = ADDRESS_PATTERN
            .as_ref()
            .map_err(|e| AuthError::validation(format!("Invalid address pattern: {e}")))?;

        let trimmed = raw.trim();
        if pattern.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(AuthError::invalid_account(raw))
        }
    }

    /// Accepts a CAIP-10 account id (`eip155:1:0xAbC...`) or a bare address.
    pub fn from_account_id(account: &str) -> Result<Self> {
        let trimmed = account.trim();
        if !trimmed.contains(':') {
            return Self::parse(trimmed);
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            [namespace, reference, address]
                if !namespace.is_empty() && !reference.is_empty() =>
            {
                Self::parse(address).map_err(|_| AuthError::invalid_account(account))
            }
            _ => Err(AuthError::invalid_account(account)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0xAbCd...1234`
    pub fn short(&self) -> String {
        let len = self.0.len();
        format!("{}...{}", &self.0[..6], &self.0[len - 4..])
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
