//! The chain gateway: the two operation kinds the delegation program offers.

use async_trait::async_trait;
use delegacy_common::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::fullnode::FullnodeClient;
use crate::function::{EntryFunctionPayload, EntryPoint, FunctionId, ViewRequest};
use crate::wallet::Signer;

/// Where the program lives on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEndpoint {
    pub network: Network,
    pub program_address: Address,
    pub rpc_url: String,
}

/// Read-only queries and state-changing submissions against the program.
///
/// A gateway is bound to one network and one program address; every
/// function it is asked to call must belong to that program.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Network this gateway talks to
    fn network(&self) -> Network;

    /// Address of the deployed delegation program
    fn program_address(&self) -> &Address;

    /// Qualify an entry point with this gateway's program address
    fn function(&self, entry: EntryPoint) -> FunctionId {
        FunctionId::new(self.program_address().clone(), entry)
    }

    /// Call a view function
    async fn query(&self, function: &FunctionId, args: Vec<Value>) -> DelegacyResult<Vec<Value>>;

    /// Sign and submit an entry function, returning the transaction hash
    async fn submit(&self, function: &FunctionId, args: Vec<Value>)
        -> DelegacyResult<TransactionHash>;
}

/// Production gateway: fullnode for queries, wallet for submissions
pub struct Gateway {
    endpoint: NetworkEndpoint,
    fullnode: FullnodeClient,
    signer: Arc<dyn Signer>,
}

impl Gateway {
    pub fn new(
        endpoint: NetworkEndpoint,
        signer: Arc<dyn Signer>,
        timeout: Duration,
    ) -> DelegacyResult<Self> {
        let fullnode = FullnodeClient::new(&endpoint.rpc_url, timeout)?;
        info!(
            "Gateway bound to {} (program {}, node {})",
            endpoint.network,
            endpoint.program_address,
            fullnode.base_url()
        );
        Ok(Self {
            endpoint,
            fullnode,
            signer,
        })
    }

    pub fn endpoint(&self) -> &NetworkEndpoint {
        &self.endpoint
    }

    fn check_program(&self, function: &FunctionId) -> DelegacyResult<()> {
        if function.program != self.endpoint.program_address {
            return Err(DelegacyError::config(format!(
                "{} does not belong to the {} program {}",
                function, self.endpoint.network, self.endpoint.program_address
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainGateway for Gateway {
    fn network(&self) -> Network {
        self.endpoint.network
    }

    fn program_address(&self) -> &Address {
        &self.endpoint.program_address
    }

    async fn query(&self, function: &FunctionId, args: Vec<Value>) -> DelegacyResult<Vec<Value>> {
        self.check_program(function)?;
        self.fullnode.view(&ViewRequest::new(function, args)).await
    }

    async fn submit(
        &self,
        function: &FunctionId,
        args: Vec<Value>,
    ) -> DelegacyResult<TransactionHash> {
        self.check_program(function)?;
        if function.entry.is_view() {
            return Err(DelegacyError::validation(format!(
                "{} is a view function and cannot be submitted",
                function
            )));
        }
        let hash = self
            .signer
            .sign_and_submit(EntryFunctionPayload::new(function, args))
            .await?;
        debug!(function = %function, hash = %hash, "transaction submitted");
        Ok(hash)
    }
}
