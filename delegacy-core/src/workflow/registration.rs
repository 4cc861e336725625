//! Registration in the vault and delegate registries.
//!
//! On mount, and whenever the account or network changes, both registries
//! are asked about the connected account concurrently; the status is only
//! published once both have answered. Registering submits one transaction
//! per registry the user opted into, one after the other, each isolated
//! from the other's failure.

use delegacy_common::prelude::*;
use delegacy_rpc::EntryPoint;
use serde_json::{json, Value};
use std::fmt;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::context::Context;
use crate::workflow::{submit_and_report, Generation, SubmitOutcome, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    Vault,
    Delegate,
}

impl Registry {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vault => "Vault",
            Self::Delegate => "Delegate",
        }
    }

    fn status_entry(&self) -> EntryPoint {
        match self {
            Self::Vault => EntryPoint::IsVaultRegistered,
            Self::Delegate => EntryPoint::IsDelegateRegistered,
        }
    }

    fn register_entry(&self) -> EntryPoint {
        match self {
            Self::Vault => EntryPoint::RegisterVault,
            Self::Delegate => EntryPoint::RegisterDelegate,
        }
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationStatus {
    pub vault_registered: bool,
    pub delegate_registered: bool,
}

impl RegistrationStatus {
    pub fn is_registered(&self, registry: Registry) -> bool {
        match registry {
            Registry::Vault => self.vault_registered,
            Registry::Delegate => self.delegate_registered,
        }
    }
}

/// Registries the user ticked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationIntent {
    pub wants_vault: bool,
    pub wants_delegate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationView {
    /// No wallet connected; nothing is queried
    Disconnected,
    Loading,
    Ready(RegistrationStatus),
    /// A status query failed; the status is unknown
    Unavailable,
}

/// Outcome of one `register` call, per registry; `None` means not attempted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationReceipt {
    pub delegate: Option<SubmitOutcome>,
    pub vault: Option<SubmitOutcome>,
}

impl RegistrationReceipt {
    pub fn attempted(&self) -> usize {
        self.delegate.iter().chain(self.vault.iter()).count()
    }
}

pub struct RegistrationWorkflow {
    ctx: RwLock<Context>,
    generation: Generation,
    view: RwLock<RegistrationView>,
    intent: RwLock<RegistrationIntent>,
}

impl RegistrationWorkflow {
    pub fn new(ctx: Context) -> Self {
        let view = if ctx.session().is_connected() {
            RegistrationView::Loading
        } else {
            RegistrationView::Disconnected
        };
        Self {
            ctx: RwLock::new(ctx),
            generation: Generation::default(),
            view: RwLock::new(view),
            intent: RwLock::new(RegistrationIntent::default()),
        }
    }

    /// Create the workflow and run its initial status query
    pub async fn mount(ctx: Context) -> Self {
        let workflow = Self::new(ctx);
        workflow.refresh().await;
        workflow
    }

    /// Account or network changed
    pub async fn set_context(&self, ctx: Context) {
        *self.ctx.write().await = ctx;
        self.refresh().await;
    }

    pub async fn view(&self) -> RegistrationView {
        *self.view.read().await
    }

    pub async fn intent(&self) -> RegistrationIntent {
        *self.intent.read().await
    }

    pub async fn set_wants_vault(&self, wants: bool) {
        self.intent.write().await.wants_vault = wants;
    }

    pub async fn set_wants_delegate(&self, wants: bool) {
        self.intent.write().await.wants_delegate = wants;
    }

    /// Untick both registries. `register` leaves the intent as it was.
    pub async fn clear_intent(&self) {
        *self.intent.write().await = RegistrationIntent::default();
    }

    /// Re-query both registries for the connected account
    pub async fn refresh(&self) -> RegistrationView {
        let ctx = self.ctx.read().await.clone();
        let ticket = self.generation.begin();

        let Some(account) = ctx.account().cloned() else {
            self.publish(ticket, RegistrationView::Disconnected).await;
            return self.view().await;
        };

        self.publish(ticket, RegistrationView::Loading).await;

        let (vault, delegate) = futures::join!(
            query_registered(&ctx, Registry::Vault, &account),
            query_registered(&ctx, Registry::Delegate, &account),
        );

        let next = match (vault, delegate) {
            (Ok(vault_registered), Ok(delegate_registered)) => {
                RegistrationView::Ready(RegistrationStatus {
                    vault_registered,
                    delegate_registered,
                })
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Registry status for {} unavailable: {}", account, e);
                RegistrationView::Unavailable
            }
        };

        self.publish(ticket, next).await;
        self.view().await
    }

    async fn publish(&self, ticket: Ticket, next: RegistrationView) {
        let mut view = self.view.write().await;
        if self.generation.is_current(ticket) {
            *view = next;
        } else {
            debug!("Discarding stale registry status {:?}", next);
        }
    }

    /// Submit one registration per ticked registry
    pub async fn register(&self) -> RegistrationReceipt {
        let ctx = self.ctx.read().await.clone();
        let intent = self.intent().await;
        let mut receipt = RegistrationReceipt::default();

        if !ctx.session().is_connected() {
            ctx.notifier()
                .report_notice("Connect a wallet before registering");
            return receipt;
        }

        debug!(
            wants_vault = intent.wants_vault,
            wants_delegate = intent.wants_delegate,
            "registering"
        );

        if intent.wants_delegate {
            receipt.delegate = Some(submit_registration(&ctx, Registry::Delegate).await);
        }
        if intent.wants_vault {
            receipt.vault = Some(submit_registration(&ctx, Registry::Vault).await);
        }

        receipt
    }
}

async fn query_registered(
    ctx: &Context,
    registry: Registry,
    account: &Address,
) -> DelegacyResult<bool> {
    let gateway = ctx.gateway();
    let function = gateway.function(registry.status_entry());
    let values = gateway.query(&function, vec![json!(account)]).await?;

    values
        .first()
        .and_then(Value::as_bool)
        .ok_or_else(|| DelegacyError::decode(format!("{} did not return a bool", function)))
}

async fn submit_registration(ctx: &Context, registry: Registry) -> SubmitOutcome {
    submit_and_report(
        ctx,
        registry.register_entry(),
        Vec::new(),
        &format!(
            "Submitted to {} Registry successfully. Check the transaction hash.",
            registry
        ),
        &format!("Failed to submit to {} Registry", registry),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, FakeGateway, RecordingNotifier, ACCOUNT};
    use std::sync::Arc;
    use std::time::Duration;

    fn fakes() -> (Arc<FakeGateway>, Arc<RecordingNotifier>) {
        (
            Arc::new(FakeGateway::new(Network::Testnet)),
            Arc::new(RecordingNotifier::default()),
        )
    }

    #[tokio::test]
    async fn test_disconnected_issues_no_queries() {
        let (gateway, notifier) = fakes();
        let workflow = RegistrationWorkflow::mount(context(&gateway, &notifier, None)).await;

        assert_eq!(workflow.view().await, RegistrationView::Disconnected);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_status_from_both_registries() {
        let (gateway, notifier) = fakes();
        gateway
            .answer(EntryPoint::IsVaultRegistered, vec![json!(true)])
            .answer(EntryPoint::IsDelegateRegistered, vec![json!(false)]);

        let workflow =
            RegistrationWorkflow::mount(context(&gateway, &notifier, Some(ACCOUNT))).await;

        assert_eq!(
            workflow.view().await,
            RegistrationView::Ready(RegistrationStatus {
                vault_registered: true,
                delegate_registered: false,
            })
        );
        let queries = gateway.queries();
        assert_eq!(queries.len(), 2);
        assert!(queries.iter().all(|q| q.args == vec![json!(ACCOUNT)]));
    }

    #[tokio::test]
    async fn test_status_independent_of_arrival_order() {
        for (vault_delay, delegate_delay) in [(40, 0), (0, 40)] {
            let (gateway, notifier) = fakes();
            gateway
                .answer_after(
                    EntryPoint::IsVaultRegistered,
                    vec![json!(true)],
                    Duration::from_millis(vault_delay),
                )
                .answer_after(
                    EntryPoint::IsDelegateRegistered,
                    vec![json!(false)],
                    Duration::from_millis(delegate_delay),
                );

            let workflow =
                RegistrationWorkflow::mount(context(&gateway, &notifier, Some(ACCOUNT))).await;
            assert_eq!(
                workflow.view().await,
                RegistrationView::Ready(RegistrationStatus {
                    vault_registered: true,
                    delegate_registered: false,
                })
            );
        }
    }

    #[tokio::test]
    async fn test_failed_status_query_is_unavailable() {
        let (gateway, notifier) = fakes();
        gateway
            .answer(EntryPoint::IsVaultRegistered, vec![json!(true)])
            .fail_view(EntryPoint::IsDelegateRegistered, "node unreachable");

        let workflow =
            RegistrationWorkflow::mount(context(&gateway, &notifier, Some(ACCOUNT))).await;

        assert_eq!(workflow.view().await, RegistrationView::Unavailable);
        assert!(notifier.all().is_empty());
    }

    #[tokio::test]
    async fn test_stale_status_is_discarded() {
        let (gateway, notifier) = fakes();
        gateway
            .answer_after(
                EntryPoint::IsVaultRegistered,
                vec![json!(false)],
                Duration::from_millis(80),
            )
            .answer(EntryPoint::IsVaultRegistered, vec![json!(true)])
            .answer(EntryPoint::IsDelegateRegistered, vec![json!(true)]);

        let workflow = RegistrationWorkflow::new(context(&gateway, &notifier, Some(ACCOUNT)));
        let slow = workflow.refresh();
        let fast = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            workflow.refresh().await
        };
        let (_, latest) = tokio::join!(slow, fast);

        let expected = RegistrationView::Ready(RegistrationStatus {
            vault_registered: true,
            delegate_registered: true,
        });
        assert_eq!(latest, expected);
        assert_eq!(workflow.view().await, expected);
    }

    #[tokio::test]
    async fn test_account_change_requeries() {
        let (gateway, notifier) = fakes();
        gateway
            .answer(EntryPoint::IsVaultRegistered, vec![json!(false)])
            .answer(EntryPoint::IsDelegateRegistered, vec![json!(false)]);

        let ctx = context(&gateway, &notifier, None);
        let workflow = RegistrationWorkflow::mount(ctx.clone()).await;
        assert!(gateway.calls().is_empty());

        workflow
            .set_context(ctx.with_account(Some(Address::from(ACCOUNT))))
            .await;
        assert!(matches!(workflow.view().await, RegistrationView::Ready(_)));
        assert_eq!(gateway.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_register_vault_only() {
        let (gateway, notifier) = fakes();
        let workflow = RegistrationWorkflow::new(context(&gateway, &notifier, Some(ACCOUNT)));
        workflow.set_wants_vault(true).await;

        let receipt = workflow.register().await;

        let submissions = gateway.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].entry, EntryPoint::RegisterVault);
        assert!(submissions[0].args.is_empty());
        assert_eq!(receipt.attempted(), 1);
        assert!(receipt.delegate.is_none());

        let successes = notifier.successes();
        assert_eq!(successes.len(), 1);
        assert_eq!(
            successes[0].0,
            "Submitted to Vault Registry successfully. Check the transaction hash."
        );
        assert_eq!(
            successes[0].1,
            "https://explorer.aptoslabs.com/txn/0xregister_vault?network=testnet"
        );
    }

    #[tokio::test]
    async fn test_rejected_registration_becomes_notification() {
        let (gateway, notifier) = fakes();
        gateway.reject_submit(EntryPoint::RegisterVault, "User rejected the request");
        let workflow = RegistrationWorkflow::new(context(&gateway, &notifier, Some(ACCOUNT)));
        workflow.set_wants_vault(true).await;

        let receipt = workflow.register().await;

        assert!(matches!(receipt.vault, Some(SubmitOutcome::Failed(_))));
        assert_eq!(notifier.failures(), vec!["Failed to submit to Vault Registry"]);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_the_other() {
        let (gateway, notifier) = fakes();
        gateway.reject_submit(EntryPoint::RegisterDelegate, "out of gas");
        let workflow = RegistrationWorkflow::new(context(&gateway, &notifier, Some(ACCOUNT)));
        workflow.set_wants_vault(true).await;
        workflow.set_wants_delegate(true).await;

        let receipt = workflow.register().await;

        let entries: Vec<EntryPoint> = gateway.submissions().iter().map(|c| c.entry).collect();
        assert_eq!(
            entries,
            vec![EntryPoint::RegisterDelegate, EntryPoint::RegisterVault]
        );
        assert!(matches!(receipt.delegate, Some(SubmitOutcome::Failed(_))));
        assert!(receipt.vault.as_ref().is_some_and(SubmitOutcome::is_submitted));
        assert_eq!(notifier.failures(), vec!["Failed to submit to Delegate Registry"]);
        assert_eq!(notifier.successes().len(), 1);

        // ticks survive submission
        assert_eq!(
            workflow.intent().await,
            RegistrationIntent {
                wants_vault: true,
                wants_delegate: true
            }
        );
        workflow.clear_intent().await;
        assert_eq!(workflow.intent().await, RegistrationIntent::default());
    }

    #[tokio::test]
    async fn test_register_without_account_submits_nothing() {
        let (gateway, notifier) = fakes();
        let workflow = RegistrationWorkflow::new(context(&gateway, &notifier, None));
        workflow.set_wants_vault(true).await;

        let receipt = workflow.register().await;

        assert_eq!(receipt.attempted(), 0);
        assert!(gateway.calls().is_empty());
        assert!(notifier.failures().is_empty());
        assert_eq!(notifier.notices(), vec!["Connect a wallet before registering"]);
    }
}
