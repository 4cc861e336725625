//! In-memory gateway and notifier for workflow tests

use async_trait::async_trait;
use delegacy_common::prelude::*;
use delegacy_rpc::{ChainGateway, EntryPoint, FunctionId};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::context::{Context, Session};
use crate::notify::Notifier;

pub(crate) const PROGRAM: &str = "0xcafe";
pub(crate) const ACCOUNT: &str = "0x1234567890abcdef1234567890abcdef";

/// Testnet context over the given fakes
pub(crate) fn context(
    gateway: &Arc<FakeGateway>,
    notifier: &Arc<RecordingNotifier>,
    account: Option<&str>,
) -> Context {
    let session = Session {
        account: account.map(Address::from),
        network: Network::Testnet,
    };
    Context::new(
        session,
        gateway.clone(),
        notifier.clone(),
        Explorer::default(),
    )
    .unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    Query,
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub kind: CallKind,
    pub entry: EntryPoint,
    pub args: Vec<Value>,
}

#[derive(Debug, Clone)]
struct Scripted {
    result: Result<Vec<Value>, String>,
    delay: Duration,
}

/// Gateway whose answers are scripted per entry point.
///
/// Several scripted answers for one entry point are handed out in order;
/// the last one keeps being repeated.
pub(crate) struct FakeGateway {
    network: Network,
    program: Address,
    views: Mutex<HashMap<EntryPoint, VecDeque<Scripted>>>,
    rejected: Mutex<HashMap<EntryPoint, String>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGateway {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            program: Address::from(PROGRAM),
            views: Mutex::new(HashMap::new()),
            rejected: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn answer(&self, entry: EntryPoint, values: Vec<Value>) -> &Self {
        self.answer_after(entry, values, Duration::ZERO)
    }

    pub fn answer_after(&self, entry: EntryPoint, values: Vec<Value>, delay: Duration) -> &Self {
        self.push(entry, Ok(values), delay)
    }

    pub fn fail_view(&self, entry: EntryPoint, message: &str) -> &Self {
        self.push(entry, Err(message.to_string()), Duration::ZERO)
    }

    pub fn reject_submit(&self, entry: EntryPoint, message: &str) -> &Self {
        self.rejected
            .lock()
            .unwrap()
            .insert(entry, message.to_string());
        self
    }

    fn push(&self, entry: EntryPoint, result: Result<Vec<Value>, String>, delay: Duration) -> &Self {
        self.views
            .lock()
            .unwrap()
            .entry(entry)
            .or_default()
            .push_back(Scripted { result, delay });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<Call> {
        self.calls_of(CallKind::Query)
    }

    pub fn submissions(&self) -> Vec<Call> {
        self.calls_of(CallKind::Submit)
    }

    fn calls_of(&self, kind: CallKind) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.kind == kind)
            .collect()
    }

    fn record(&self, kind: CallKind, function: &FunctionId, args: &[Value]) {
        assert_eq!(function.program, self.program, "call to a foreign program");
        self.calls.lock().unwrap().push(Call {
            kind,
            entry: function.entry,
            args: args.to_vec(),
        });
    }
}

#[async_trait]
impl ChainGateway for FakeGateway {
    fn network(&self) -> Network {
        self.network
    }

    fn program_address(&self) -> &Address {
        &self.program
    }

    async fn query(&self, function: &FunctionId, args: Vec<Value>) -> DelegacyResult<Vec<Value>> {
        self.record(CallKind::Query, function, &args);
        let scripted = {
            let mut views = self.views.lock().unwrap();
            match views.get_mut(&function.entry) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        let Some(scripted) = scripted else {
            return Err(DelegacyError::query(format!("no answer scripted for {}", function)));
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result.map_err(DelegacyError::query)
    }

    async fn submit(
        &self,
        function: &FunctionId,
        args: Vec<Value>,
    ) -> DelegacyResult<TransactionHash> {
        self.record(CallKind::Submit, function, &args);
        if let Some(message) = self.rejected.lock().unwrap().get(&function.entry) {
            return Err(DelegacyError::submission(message.clone()));
        }
        Ok(TransactionHash::new(format!("0x{}", function.entry)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notification {
    Success { message: String, link: String },
    Failure { message: String },
    Notice { message: String },
}

#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Failure { message } => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Notice { message } => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<(String, String)> {
        self.all()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Success { message, link } => Some((message, link)),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn report_success(&self, message: &str, link: &str) {
        self.seen.lock().unwrap().push(Notification::Success {
            message: message.to_string(),
            link: link.to_string(),
        });
    }

    fn report_failure(&self, message: &str) {
        self.seen.lock().unwrap().push(Notification::Failure {
            message: message.to_string(),
        });
    }

    fn report_notice(&self, message: &str) {
        self.seen.lock().unwrap().push(Notification::Notice {
            message: message.to_string(),
        });
    }
}
