//! Three-step navigation: Register, Delegate, View.
//!
//! Exactly one page is mounted at a time. Switching steps always mounts a
//! fresh page, so its queries run again even when returning to the same step.

use delegacy_common::prelude::*;
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::context::Context;
use crate::workflow::delegation::DelegationWorkflow;
use crate::workflow::listing::ListingWorkflow;
use crate::workflow::registration::RegistrationWorkflow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Register,
    Delegate,
    View,
}

impl Step {
    pub const ALL: [Step; 3] = [Self::Register, Self::Delegate, Self::View];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Delegate => "delegate",
            Self::View => "view",
        }
    }

    /// 1-based position shown in the step header
    pub fn number(&self) -> usize {
        match self {
            Self::Register => 1,
            Self::Delegate => 2,
            Self::View => 3,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Step {
    type Err = DelegacyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "register" | "1" => Ok(Self::Register),
            "delegate" | "2" => Ok(Self::Delegate),
            "view" | "3" => Ok(Self::View),
            other => Err(DelegacyError::validation(format!("unknown step: {}", other))),
        }
    }
}

/// The mounted page
pub enum Page {
    Register(RegistrationWorkflow),
    Delegate(DelegationWorkflow),
    View(ListingWorkflow),
}

impl Page {
    pub async fn mount(step: Step, ctx: Context) -> Self {
        match step {
            Step::Register => Self::Register(RegistrationWorkflow::mount(ctx).await),
            Step::Delegate => Self::Delegate(DelegationWorkflow::mount(ctx).await),
            Step::View => Self::View(ListingWorkflow::mount(ctx).await),
        }
    }

    pub fn step(&self) -> Step {
        match self {
            Self::Register(_) => Step::Register,
            Self::Delegate(_) => Step::Delegate,
            Self::View(_) => Step::View,
        }
    }

    pub async fn set_context(&self, ctx: Context) {
        match self {
            Self::Register(page) => page.set_context(ctx).await,
            Self::Delegate(page) => page.set_context(ctx).await,
            Self::View(page) => page.set_context(ctx).await,
        }
    }
}

pub struct Shell {
    ctx: Context,
    page: Page,
}

impl Shell {
    /// Mount the first step
    pub async fn start(ctx: Context) -> Self {
        Self::open(ctx, Step::default()).await
    }

    pub async fn open(ctx: Context, step: Step) -> Self {
        let page = Page::mount(step, ctx.clone()).await;
        Self { ctx, page }
    }

    pub fn step(&self) -> Step {
        self.page.step()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Unmount the current page and mount `step`
    pub async fn goto(&mut self, step: Step) -> &Page {
        info!("Step {} ({})", step.number(), step);
        self.page = Page::mount(step, self.ctx.clone()).await;
        &self.page
    }

    /// Wallet account or network changed
    pub async fn set_context(&mut self, ctx: Context) {
        self.ctx = ctx.clone();
        self.page.set_context(ctx).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, FakeGateway, RecordingNotifier, ACCOUNT};
    use crate::workflow::registration::RegistrationView;
    use delegacy_rpc::EntryPoint;
    use serde_json::json;
    use std::sync::Arc;

    fn setup(account: Option<&str>) -> (Arc<FakeGateway>, Context) {
        let gateway = Arc::new(FakeGateway::new(Network::Testnet));
        gateway
            .answer(EntryPoint::IsVaultRegistered, vec![json!(true)])
            .answer(EntryPoint::IsDelegateRegistered, vec![json!(false)])
            .answer(EntryPoint::GetDelegatesByVault, vec![json!([])]);
        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = context(&gateway, &notifier, account);
        (gateway, ctx)
    }

    #[test]
    fn test_step_parsing() {
        assert_eq!("View".parse::<Step>().unwrap(), Step::View);
        assert_eq!("2".parse::<Step>().unwrap(), Step::Delegate);
        assert!("settings".parse::<Step>().is_err());
        assert_eq!(Step::ALL.map(|s| s.number()), [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_starts_on_register() {
        let (gateway, ctx) = setup(Some(ACCOUNT));
        let shell = Shell::start(ctx).await;

        assert_eq!(shell.step(), Step::Register);
        assert_eq!(gateway.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_returning_to_a_step_queries_again() {
        let (gateway, ctx) = setup(Some(ACCOUNT));
        let mut shell = Shell::start(ctx).await;

        shell.goto(Step::View).await;
        shell.goto(Step::Register).await;

        let entries: Vec<_> = gateway.queries().iter().map(|c| c.entry).collect();
        assert_eq!(entries.len(), 5);
        assert_eq!(
            entries
                .iter()
                .filter(|e| **e == EntryPoint::IsVaultRegistered)
                .count(),
            2
        );
        assert!(entries.contains(&EntryPoint::GetDelegatesByVault));
    }

    #[tokio::test]
    async fn test_delegate_page_issues_no_queries() {
        let (gateway, ctx) = setup(Some(ACCOUNT));
        let mut shell = Shell::open(ctx, Step::Delegate).await;
        assert!(matches!(shell.page(), Page::Delegate(_)));
        assert!(gateway.calls().is_empty());

        shell.goto(Step::Delegate).await;
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_context_change_reaches_mounted_page() {
        let (gateway, ctx) = setup(None);
        let mut shell = Shell::start(ctx.clone()).await;
        assert!(gateway.calls().is_empty());

        shell
            .set_context(ctx.with_account(Some(Address::from(ACCOUNT))))
            .await;

        let Page::Register(page) = shell.page() else {
            panic!("register page should stay mounted");
        };
        assert!(matches!(page.view().await, RegistrationView::Ready(_)));
        assert!(shell.context().session().is_connected());
    }
}
