// lib.rs - Delegacy Core Library
//! # Delegacy Core
//!
//! Workflows for delegating on-chain authority from a cold vault wallet to a
//! hot delegate wallet.
//!
//! ## Architecture
//!
//! - **Context**: the wallet session plus the chain gateway, notifier and
//!   explorer every workflow acts through
//! - **Registration**: vault and delegate registry status and registration
//! - **Delegation**: wallet, NFT and contract delegation forms
//! - **Listing**: delegations recorded for the connected vault
//! - **Shell**: Register, Delegate and View steps, one page mounted at a time
//!
//! ## Example
//!
//! ```no_run
//! use delegacy_core::prelude::*;
//! use delegacy_rpc::{Gateway, RemoteWallet};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::load("delegacy.toml")?;
//!     let wallet = RemoteWallet::new(&config.wallet_url, config.request_timeout())?;
//!     let network = wallet.network().await?;
//!     let account = wallet.account().await?.map(|a| a.address);
//!
//!     let gateway = Gateway::new(config.endpoint(network)?, Arc::new(wallet), config.request_timeout())?;
//!     let ctx = Context::new(
//!         Session { account, network },
//!         Arc::new(gateway),
//!         Arc::new(ConsoleNotifier),
//!         config.explorer(),
//!     )?;
//!
//!     let shell = Shell::start(ctx).await;
//!     println!("on step {}", shell.step());
//!     Ok(())
//! }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

/// Client configuration
pub mod config;

/// Session and workflow context
pub mod context;

/// User notifications
pub mod notify;

/// Step navigation
pub mod shell;

/// Registration, delegation and listing workflows
pub mod workflow;

#[cfg(test)]
mod testing;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::config::{ClientConfig, EndpointConfig};
    pub use crate::context::{Context, Session};
    pub use crate::notify::{ConsoleNotifier, Notifier};
    pub use crate::shell::{Page, Shell, Step};
    pub use crate::workflow::delegation::{
        DelegateTarget, DelegationForm, DelegationOutcome, DelegationWorkflow, FormField,
        ModalState,
    };
    pub use crate::workflow::listing::{DelegationRow, ListingView, ListingWorkflow};
    pub use crate::workflow::registration::{
        RegistrationIntent, RegistrationReceipt, RegistrationStatus, RegistrationView,
        RegistrationWorkflow, Registry,
    };
    pub use crate::workflow::SubmitOutcome;

    pub use delegacy_common::prelude::*;
}

pub use config::ClientConfig;
pub use context::{Context, Session};
pub use shell::{Shell, Step};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
