//! Delegating a wallet, an NFT or a contract.
//!
//! Picking a target opens a form scoped to it:
//!
//! | Target   | delegate address | contract address | token id |
//! |----------|------------------|------------------|----------|
//! | Wallet   | required         |                  |          |
//! | NFT      | required         | required         | required |
//! | Contract | required         | required         |          |
//!
//! Submitting always closes the form. Only wallet delegation has an entry
//! point on chain (`delegate_for_all`); NFT and contract forms resolve to
//! [`DelegationOutcome::NotImplemented`]. Fields are not validated here,
//! malformed input is left for the chain to reject.

use delegacy_common::prelude::*;
use delegacy_rpc::EntryPoint;
use serde_json::json;
use std::fmt;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::context::Context;
use crate::workflow::{submit_and_report, SubmitOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegateTarget {
    Wallet,
    Nft,
    Contract,
}

impl DelegateTarget {
    pub const ALL: [DelegateTarget; 3] = [Self::Wallet, Self::Nft, Self::Contract];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Wallet => "Delegate a wallet",
            Self::Nft => "Delegate a NFT",
            Self::Contract => "Delegate a contract",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Wallet => "Delegate your entire wallet.",
            Self::Nft => "Will only delegate a specific token on a specific contract.",
            Self::Contract => "Will delegate every token of a specific contract.",
        }
    }

    /// Fields the form for this target asks for
    pub fn fields(&self) -> &'static [FormField] {
        match self {
            Self::Wallet => &[FormField::DelegateAddress],
            Self::Nft => &[
                FormField::DelegateAddress,
                FormField::ContractAddress,
                FormField::TokenId,
            ],
            Self::Contract => &[FormField::DelegateAddress, FormField::ContractAddress],
        }
    }
}

impl fmt::Display for DelegateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wallet => "Wallet",
            Self::Nft => "NFT",
            Self::Contract => "Contract",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    DelegateAddress,
    ContractAddress,
    TokenId,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DelegateAddress => "Delegate Address",
            Self::ContractAddress => "Contract Address",
            Self::TokenId => "Token ID",
        }
    }
}

/// A draft delegation; each variant carries only the fields it uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegationForm {
    Wallet {
        delegate_address: String,
    },
    Nft {
        delegate_address: String,
        contract_address: String,
        token_id: String,
    },
    Contract {
        delegate_address: String,
        contract_address: String,
    },
}

impl DelegationForm {
    pub fn empty(target: DelegateTarget) -> Self {
        match target {
            DelegateTarget::Wallet => Self::Wallet {
                delegate_address: String::new(),
            },
            DelegateTarget::Nft => Self::Nft {
                delegate_address: String::new(),
                contract_address: String::new(),
                token_id: String::new(),
            },
            DelegateTarget::Contract => Self::Contract {
                delegate_address: String::new(),
                contract_address: String::new(),
            },
        }
    }

    pub fn target(&self) -> DelegateTarget {
        match self {
            Self::Wallet { .. } => DelegateTarget::Wallet,
            Self::Nft { .. } => DelegateTarget::Nft,
            Self::Contract { .. } => DelegateTarget::Contract,
        }
    }

    fn slot(&mut self, field: FormField) -> Option<&mut String> {
        match (self, field) {
            (Self::Wallet { delegate_address }, FormField::DelegateAddress)
            | (Self::Nft { delegate_address, .. }, FormField::DelegateAddress)
            | (Self::Contract { delegate_address, .. }, FormField::DelegateAddress) => {
                Some(delegate_address)
            }
            (Self::Nft { contract_address, .. }, FormField::ContractAddress)
            | (Self::Contract { contract_address, .. }, FormField::ContractAddress) => {
                Some(contract_address)
            }
            (Self::Nft { token_id, .. }, FormField::TokenId) => Some(token_id),
            _ => None,
        }
    }

    /// Set a field; returns false if this form has no such field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> bool {
        match self.slot(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        match (self, field) {
            (Self::Wallet { delegate_address }, FormField::DelegateAddress)
            | (Self::Nft { delegate_address, .. }, FormField::DelegateAddress)
            | (Self::Contract { delegate_address, .. }, FormField::DelegateAddress) => {
                Some(delegate_address.as_str())
            }
            (Self::Nft { contract_address, .. }, FormField::ContractAddress)
            | (Self::Contract { contract_address, .. }, FormField::ContractAddress) => {
                Some(contract_address.as_str())
            }
            (Self::Nft { token_id, .. }, FormField::TokenId) => Some(token_id.as_str()),
            _ => None,
        }
    }

    /// Fields still blank. Informational only, submission is never blocked.
    pub fn missing_fields(&self) -> Vec<FormField> {
        self.target()
            .fields()
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_some_and(|v| v.trim().is_empty()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(DelegationForm),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegationOutcome {
    Submitted(TransactionHash),
    Failed(String),
    /// No entry point exists yet for this target; nothing was sent
    NotImplemented(DelegateTarget),
    /// No wallet connected; nothing was sent
    Disconnected,
}

impl From<SubmitOutcome> for DelegationOutcome {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Submitted(hash) => Self::Submitted(hash),
            SubmitOutcome::Failed(reason) => Self::Failed(reason),
        }
    }
}

pub struct DelegationWorkflow {
    ctx: RwLock<Context>,
    modal: RwLock<ModalState>,
}

impl DelegationWorkflow {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx: RwLock::new(ctx),
            modal: RwLock::new(ModalState::Closed),
        }
    }

    /// Nothing to query on mount; kept for symmetry with the other pages
    pub async fn mount(ctx: Context) -> Self {
        Self::new(ctx)
    }

    pub async fn set_context(&self, ctx: Context) {
        *self.ctx.write().await = ctx;
    }

    pub async fn is_connected(&self) -> bool {
        self.ctx.read().await.session().is_connected()
    }

    pub async fn modal(&self) -> ModalState {
        self.modal.read().await.clone()
    }

    /// Open a blank form for `target`, discarding any open draft
    pub async fn open(&self, target: DelegateTarget) {
        debug!(%target, "opening delegation form");
        *self.modal.write().await = ModalState::Open(DelegationForm::empty(target));
    }

    /// Type into the open form. False if closed or the field does not apply.
    pub async fn edit(&self, field: FormField, value: impl Into<String>) -> bool {
        match &mut *self.modal.write().await {
            ModalState::Open(form) => form.set(field, value),
            ModalState::Closed => false,
        }
    }

    /// Close without side effects
    pub async fn cancel(&self) {
        *self.modal.write().await = ModalState::Closed;
    }

    /// Close the form and act on it; `None` if no form was open
    pub async fn submit(&self) -> Option<DelegationOutcome> {
        let form = match std::mem::replace(&mut *self.modal.write().await, ModalState::Closed) {
            ModalState::Open(form) => form,
            ModalState::Closed => return None,
        };
        let ctx = self.ctx.read().await.clone();

        if !ctx.session().is_connected() {
            ctx.notifier().report_notice("Connect a wallet before delegating");
            return Some(DelegationOutcome::Disconnected);
        }

        let missing = form.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "submitting with blank fields");
        }

        let target = form.target();
        let outcome = match form {
            DelegationForm::Wallet { delegate_address } => submit_and_report(
                &ctx,
                EntryPoint::DelegateForAll,
                vec![json!(delegate_address), json!(true)],
                "Delegated successfully. Check the transaction hash.",
                "Failed to delegate",
            )
            .await
            .into(),
            DelegationForm::Nft { .. } | DelegationForm::Contract { .. } => {
                warn!("{} delegation has no entry point yet; nothing submitted", target);
                ctx.notifier()
                    .report_failure(&format!("{} delegation is not available yet", target));
                DelegationOutcome::NotImplemented(target)
            }
        };

        Some(outcome)
    }
}
