//! # Delegacy RPC - Chain Gateway and Wallet Bridge
//!
//! Everything the client says to the outside world goes through this crate.
//! The delegation program offers two operation kinds:
//!
//! - **Queries**: read-only view functions, executed by a fullnode
//!   (`POST <rpc_url>/view`)
//! - **Submissions**: entry functions, signed and submitted by the user's
//!   wallet over the JSON-RPC wallet bridge
//!
//! [`ChainGateway`] puts both behind one trait. [`Gateway`] is the
//! production implementation; tests in `delegacy-core` drive the workflows
//! through an in-memory fake instead.
//!
//! ## Entry Points
//!
//! | Entry point                      | Kind   |
//! |----------------------------------|--------|
//! | `is_vault_registered(address)`   | view   |
//! | `is_delegate_registered(address)`| view   |
//! | `get_delegates_by_vault(address)`| view   |
//! | `register_vault()`               | submit |
//! | `register_delegate()`            | submit |
//! | `delegate_for_all(address, bool)`| submit |
//!
//! Function identifiers are fully qualified as
//! `<program_address>::delegate::<entry_point>`.

pub mod fullnode;
pub mod function;
pub mod gateway;
pub mod wallet;

pub use fullnode::FullnodeClient;
pub use function::{EntryFunctionPayload, EntryPoint, FunctionId, ViewRequest};
pub use gateway::{ChainGateway, Gateway, NetworkEndpoint};
pub use wallet::{
    serve_wallet, PendingTransaction, RemoteWallet, Signer, WalletAccount, WalletApiClient,
    WalletApiServer,
};
