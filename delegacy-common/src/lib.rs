//! # Delegacy Common
//!
//! Common types and helpers shared by the Delegacy crates: chain addresses,
//! networks, delegation records, the error taxonomy and the formatting used
//! when records and transactions are shown to a user.
//!
//! ## Modules
//!
//! - **error**: `DelegacyError` and the `DelegacyResult` alias
//! - **types**: addresses, networks, transaction hashes, delegation records
//! - **validation**: address checks and shortening
//! - **display**: delegation type labels and block explorer links
//!
//! ## Example Usage
//!
//! ```rust
//! use delegacy_common::prelude::*;
//!
//! assert_eq!(truncate_address("0x1234567890abcdef"), "0x1234…cdef");
//! assert_eq!(delegation_type_label(2), "Delegate NFT");
//!
//! let network: Network = "Devnet".parse().unwrap();
//! let link = Explorer::default().transaction_url(&TransactionHash::new("0xab"), network);
//! assert_eq!(link, "https://explorer.aptoslabs.com/txn/0xab?network=devnet");
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

pub mod display;
pub mod error;
pub mod types;
pub mod validation;

pub use error::{DelegacyError, DelegacyResult};

/// Re-export commonly used types and traits
pub mod prelude {
    pub use crate::display::{delegation_type_label, Explorer, DEFAULT_EXPLORER_URL};
    pub use crate::error::{DelegacyError, DelegacyResult};
    pub use crate::types::{Address, DelegationKind, DelegationRecord, Network, TransactionHash};
    pub use crate::validation::{short_account, truncate_address, ValidationUtils};

    // Re-export essential external crates
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
}

/// Delegacy Common crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Module of the on-chain program that holds every entry point
pub const PROGRAM_MODULE: &str = "delegate";
