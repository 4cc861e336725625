//! Wallet bridge
//!
//! The wallet lives outside this process and is reached over JSON-RPC 2.0.
//! It owns the keys, the connected account and the selected network; this
//! crate only asks it for the current account and hands it payloads to sign
//! and submit.
//!
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "method": "wallet_signAndSubmitTransaction",
//!   "params": [{
//!     "type": "entry_function_payload",
//!     "function": "0xcafe::delegate::register_vault",
//!     "type_arguments": [],
//!     "arguments": []
//!   }],
//!   "id": 1
//! }
//! ```

use async_trait::async_trait;
use delegacy_common::prelude::*;
use jsonrpsee::{
    core::RpcResult,
    http_client::{HttpClient, HttpClientBuilder},
    proc_macros::rpc,
    server::{ServerBuilder, ServerHandle},
};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, info};

use crate::function::EntryFunctionPayload;

/// Account the wallet is connected with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Name service alias, preferred over the address in labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ans_name: Option<String>,
}

impl WalletAccount {
    /// Label for headers: the alias if set, otherwise the shortened address
    pub fn label(&self) -> String {
        match &self.ans_name {
            Some(name) => name.clone(),
            None => short_account(self.address.as_str()),
        }
    }
}

/// Transaction accepted by the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: TransactionHash,
}

/// JSON-RPC interface exposed by a wallet bridge
#[rpc(server, client, namespace = "wallet")]
pub trait WalletApi {
    /// Currently connected account, `None` while disconnected
    #[method(name = "account")]
    async fn account(&self) -> RpcResult<Option<WalletAccount>>;

    /// Name of the network the wallet is pointed at
    #[method(name = "network")]
    async fn network(&self) -> RpcResult<String>;

    /// Ask the wallet to connect using the named wallet provider
    #[method(name = "connect")]
    async fn connect(&self, wallet_name: String) -> RpcResult<WalletAccount>;

    #[method(name = "disconnect")]
    async fn disconnect(&self) -> RpcResult<()>;

    /// Sign the payload with the connected account and submit it
    #[method(name = "signAndSubmitTransaction")]
    async fn sign_and_submit_transaction(
        &self,
        payload: EntryFunctionPayload,
    ) -> RpcResult<PendingTransaction>;
}

/// Signing capability used for state-changing calls
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign_and_submit(&self, payload: EntryFunctionPayload) -> DelegacyResult<TransactionHash>;
}

/// Client side of the wallet bridge
#[derive(Clone)]
pub struct RemoteWallet {
    client: HttpClient,
    url: String,
}

impl RemoteWallet {
    pub fn new(url: &str, timeout: Duration) -> DelegacyResult<Self> {
        let client = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(url)
            .map_err(|e| DelegacyError::wallet(format!("Failed to reach wallet at {}: {}", url, e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn account(&self) -> DelegacyResult<Option<WalletAccount>> {
        WalletApiClient::account(&self.client)
            .await
            .map_err(|e| DelegacyError::wallet(format!("wallet_account failed: {}", e)))
    }

    /// Network the wallet reports; names this client does not know are rejected
    pub async fn network(&self) -> DelegacyResult<Network> {
        let name = WalletApiClient::network(&self.client)
            .await
            .map_err(|e| DelegacyError::wallet(format!("wallet_network failed: {}", e)))?;
        name.parse()
    }

    pub async fn connect(&self, wallet_name: &str) -> DelegacyResult<WalletAccount> {
        let account = WalletApiClient::connect(&self.client, wallet_name.to_string())
            .await
            .map_err(|e| DelegacyError::wallet(format!("wallet_connect failed: {}", e)))?;
        info!("Connected {} as {}", wallet_name, account.address);
        Ok(account)
    }

    pub async fn disconnect(&self) -> DelegacyResult<()> {
        WalletApiClient::disconnect(&self.client)
            .await
            .map_err(|e| DelegacyError::wallet(format!("wallet_disconnect failed: {}", e)))
    }
}

#[async_trait]
impl Signer for RemoteWallet {
    async fn sign_and_submit(&self, payload: EntryFunctionPayload) -> DelegacyResult<TransactionHash> {
        debug!(function = %payload.function, "requesting signature");
        let pending = WalletApiClient::sign_and_submit_transaction(&self.client, payload)
            .await
            .map_err(|e| DelegacyError::submission(e.to_string()))?;
        Ok(pending.hash)
    }
}

/// Start a wallet bridge server with the provided implementation.
///
/// Returns the bound address and the handle that keeps the server alive;
/// dropping or stopping the handle shuts the server down.
pub async fn serve_wallet<T: WalletApiServer>(
    listen_addr: SocketAddr,
    api_impl: T,
) -> DelegacyResult<(SocketAddr, ServerHandle)> {
    let server = ServerBuilder::default()
        .build(listen_addr)
        .await
        .map_err(|e| DelegacyError::network(format!("Failed to build server: {}", e)))?;

    let addr = server
        .local_addr()
        .map_err(|e| DelegacyError::network(format!("Failed to get local address: {}", e)))?;
    let handle = server.start(api_impl.into_rpc());

    info!("Wallet bridge listening on {}", addr);
    Ok((addr, handle))
}
