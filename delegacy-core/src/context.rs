//! Session state and the collaborators every workflow is handed

use delegacy_common::prelude::*;
use delegacy_rpc::ChainGateway;
use std::sync::Arc;

use crate::notify::Notifier;

/// What the wallet currently reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Connected account, `None` while the wallet is disconnected
    pub account: Option<Address>,
    pub network: Network,
}

impl Session {
    pub fn connected(account: impl Into<Address>, network: Network) -> Self {
        Self {
            account: Some(account.into()),
            network,
        }
    }

    pub fn disconnected(network: Network) -> Self {
        Self {
            account: None,
            network,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}

/// Session plus the gateway, notifier and explorer a workflow acts through
#[derive(Clone)]
pub struct Context {
    session: Session,
    gateway: Arc<dyn ChainGateway>,
    notifier: Arc<dyn Notifier>,
    explorer: Explorer,
}

impl Context {
    /// Refuses a gateway bound to a different network than the session
    pub fn new(
        session: Session,
        gateway: Arc<dyn ChainGateway>,
        notifier: Arc<dyn Notifier>,
        explorer: Explorer,
    ) -> DelegacyResult<Self> {
        if gateway.network() != session.network {
            return Err(DelegacyError::config(format!(
                "gateway is bound to {} but the wallet is on {}",
                gateway.network(),
                session.network
            )));
        }

        Ok(Self {
            session,
            gateway,
            notifier,
            explorer,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn account(&self) -> Option<&Address> {
        self.session.account.as_ref()
    }

    pub fn network(&self) -> Network {
        self.session.network
    }

    pub fn gateway(&self) -> &dyn ChainGateway {
        self.gateway.as_ref()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    /// Same collaborators, different wallet account
    pub fn with_account(&self, account: Option<Address>) -> Self {
        Self {
            session: Session {
                account,
                network: self.session.network,
            },
            ..self.clone()
        }
    }

    pub fn transaction_link(&self, hash: &TransactionHash) -> String {
        self.explorer.transaction_url(hash, self.session.network)
    }

    pub fn account_link(&self, address: &Address) -> String {
        self.explorer.account_url(address, self.session.network)
    }
}
