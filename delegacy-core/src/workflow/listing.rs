//! Delegations made by the connected vault.

use delegacy_common::prelude::*;
use delegacy_rpc::EntryPoint;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::context::Context;
use crate::workflow::{Generation, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingView {
    Disconnected,
    Loading,
    Loaded,
}

/// One record prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationRow {
    /// Row identity, the record's delegation hash
    pub key: String,
    pub vault: String,
    pub vault_link: String,
    pub delegate: String,
    pub delegate_link: String,
    pub kind: &'static str,
}

struct ListingState {
    view: ListingView,
    records: Vec<DelegationRecord>,
}

pub struct ListingWorkflow {
    ctx: RwLock<Context>,
    generation: Generation,
    state: RwLock<ListingState>,
}

impl ListingWorkflow {
    pub fn new(ctx: Context) -> Self {
        let view = if ctx.session().is_connected() {
            ListingView::Loading
        } else {
            ListingView::Disconnected
        };
        Self {
            ctx: RwLock::new(ctx),
            generation: Generation::default(),
            state: RwLock::new(ListingState {
                view,
                records: Vec::new(),
            }),
        }
    }

    pub async fn mount(ctx: Context) -> Self {
        let workflow = Self::new(ctx);
        workflow.refresh().await;
        workflow
    }

    pub async fn set_context(&self, ctx: Context) {
        *self.ctx.write().await = ctx;
        self.refresh().await;
    }

    pub async fn view(&self) -> ListingView {
        self.state.read().await.view
    }

    pub async fn records(&self) -> Vec<DelegationRecord> {
        self.state.read().await.records.clone()
    }

    /// Fetch the vault's delegations.
    ///
    /// A vault that never registered makes the program abort; that and any
    /// other query failure shows as an empty list.
    pub async fn refresh(&self) -> ListingView {
        let ctx = self.ctx.read().await.clone();
        let ticket = self.generation.begin();

        let Some(account) = ctx.account().cloned() else {
            self.publish(ticket, ListingView::Disconnected, Vec::new())
                .await;
            return self.view().await;
        };

        {
            let mut state = self.state.write().await;
            if self.generation.is_current(ticket) {
                state.view = ListingView::Loading;
            }
        }

        let records = match fetch_records(&ctx, &account).await {
            Ok(records) => records,
            Err(e) => {
                info!("No delegations for {}, wallet has not yet registered: {}", account, e);
                Vec::new()
            }
        };

        self.publish(ticket, ListingView::Loaded, records).await;
        self.view().await
    }

    async fn publish(&self, ticket: Ticket, view: ListingView, records: Vec<DelegationRecord>) {
        let mut state = self.state.write().await;
        if self.generation.is_current(ticket) {
            state.view = view;
            state.records = records;
        } else {
            debug!("Discarding stale listing of {} records", records.len());
        }
    }

    /// Records formatted for a table, in the order the program returned them
    pub async fn rows(&self) -> Vec<DelegationRow> {
        let ctx = self.ctx.read().await.clone();
        self.records()
            .await
            .iter()
            .map(|record| DelegationRow {
                key: record.delegation_hash.clone(),
                vault: truncate_address(record.vault.as_str()),
                vault_link: ctx.account_link(&record.vault),
                delegate: truncate_address(record.delegate.as_str()),
                delegate_link: ctx.account_link(&record.delegate),
                kind: record.kind().label(),
            })
            .collect()
    }
}

async fn fetch_records(ctx: &Context, account: &Address) -> DelegacyResult<Vec<DelegationRecord>> {
    let gateway = ctx.gateway();
    let function = gateway.function(EntryPoint::GetDelegatesByVault);
    let values = gateway.query(&function, vec![json!(account)]).await?;

    match values.into_iter().next() {
        Some(list) => serde_json::from_value(list)
            .map_err(|e| DelegacyError::decode(format!("{}: {}", function, e))),
        None => Ok(Vec::new()),
    }
}
