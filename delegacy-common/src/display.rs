//! Display helpers for listings and notifications

use serde::{Deserialize, Serialize};

use crate::types::{Address, DelegationKind, Network, TransactionHash};

/// Default block explorer
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer.aptoslabs.com";

/// Label for a raw delegation type code
pub fn delegation_type_label(code: u64) -> &'static str {
    DelegationKind::from_code(code).label()
}

/// Builds block explorer links for a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explorer {
    base_url: String,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORER_URL)
    }
}

impl Explorer {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Link to a submitted transaction
    pub fn transaction_url(&self, hash: &TransactionHash, network: Network) -> String {
        format!("{}/txn/{}?network={}", self.base_url, hash, network.as_str())
    }

    /// Link to an account's published modules
    pub fn account_url(&self, address: &Address, network: Network) -> String {
        format!(
            "{}/account/{}/modules?network={}",
            self.base_url,
            address,
            network.as_str()
        )
    }
}
