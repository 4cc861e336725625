//! The three user workflows: registration, delegation and listing.
//!
//! Workflows never return errors for chain failures. Query failures fall
//! back to an empty or unavailable view and are logged; submission failures
//! are reported through the context's [`Notifier`](crate::notify::Notifier).

use delegacy_common::prelude::*;
use delegacy_rpc::EntryPoint;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error};

use crate::context::Context;

pub mod delegation;
pub mod listing;
pub mod registration;

/// Hands out tickets so that only the latest refresh may publish its result
#[derive(Debug, Default)]
pub struct Generation(AtomicU64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    /// Start a new request, superseding every earlier ticket
    pub fn begin(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }
}

/// Result of one state-changing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(TransactionHash),
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// Submit one entry function and tell the user how it went
pub(crate) async fn submit_and_report(
    ctx: &Context,
    entry: EntryPoint,
    args: Vec<Value>,
    success: &str,
    failure: &str,
) -> SubmitOutcome {
    let gateway = ctx.gateway();
    let function = gateway.function(entry);
    debug!(function = %function, "submitting");

    match gateway.submit(&function, args).await {
        Ok(hash) => {
            ctx.notifier().report_success(success, &ctx.transaction_link(&hash));
            SubmitOutcome::Submitted(hash)
        }
        Err(e) => {
            error!("{} failed: {}", function, e);
            ctx.notifier().report_failure(failure);
            SubmitOutcome::Failed(e.to_string())
        }
    }
}
