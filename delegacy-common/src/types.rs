//! Common type definitions used throughout Delegacy

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DelegacyError, DelegacyResult};

/// Chain account address, kept as the string the wallet reports
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Hash of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHash(String);

impl TransactionHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Network the program is deployed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Devnet,
    Testnet,
    /// Reserved until the program is deployed there
    Mainnet,
}

impl Network {
    /// Lower-case name, as used in config keys and explorer links
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = DelegacyError;

    fn from_str(s: &str) -> DelegacyResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Self::Devnet),
            "testnet" => Ok(Self::Testnet),
            "mainnet" => Ok(Self::Mainnet),
            _ => Err(DelegacyError::unsupported_network(s)),
        }
    }
}

/// Delegation type code as stored by the program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationKind {
    Wallet,
    Nft,
    Unknown(u64),
}

impl DelegationKind {
    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Wallet,
            2 => Self::Nft,
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> u64 {
        match self {
            Self::Wallet => 1,
            Self::Nft => 2,
            Self::Unknown(code) => *code,
        }
    }

    /// Human readable label for listings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wallet => "Delegate Wallet",
            Self::Nft => "Delegate NFT",
            Self::Unknown(_) => "Unknown Type",
        }
    }
}

/// One delegation returned by `get_delegates_by_vault`.
///
/// Field names on the wire follow the program's struct, which spells
/// `delegatation`; the correct spelling is accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationRecord {
    #[serde(rename = "delegatation_hash", alias = "delegation_hash")]
    pub delegation_hash: String,
    #[serde(
        rename = "delegatation_type",
        alias = "delegation_type",
        deserialize_with = "code_from_number_or_string"
    )]
    pub delegation_type: u64,
    pub delegate: Address,
    pub vault: Address,
}

impl DelegationRecord {
    pub fn kind(&self) -> DelegationKind {
        DelegationKind::from_code(self.delegation_type)
    }
}

// Move integers come back either as JSON numbers or as decimal strings
fn code_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(u64),
        Text(String),
    }

    match Code::deserialize(deserializer)? {
        Code::Number(n) => Ok(n),
        Code::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
