//! Observable state of a bound operation

use super::error::RequestError;
use serde::{Deserialize, Serialize};

/// Latest result, error and pending flag of one binding
///
/// A new invocation clears `error` and sets `pending`, but leaves `data` in
/// place until that invocation settles.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationState<T> {
    pub data: Option<T>,
    pub pending: bool,
    pub error: Option<RequestError>,
}

impl<T> OperationState<T> {
    /// Idle state: no data, not pending, no error
    pub fn idle() -> Self {
        Self {
            data: None,
            pending: false,
            error: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.data.is_none() && !self.pending && self.error.is_none()
    }
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// What a view should render for a state
///
/// Precedence is pending, then error, then data. `Empty` means nothing has
/// been loaded yet.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Failed(RequestError),
    Success(T),
    Empty,
}

impl<T> From<OperationState<T>> for LoadState<T> {
    fn from(state: OperationState<T>) -> Self {
        if state.pending {
            return LoadState::Pending;
        }
        if let Some(err) = state.error {
            return LoadState::Failed(err);
        }
        match state.data {
            Some(data) => LoadState::Success(data),
            None => LoadState::Empty,
        }
    }
}

/// Who may write state when invocations overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettlePolicy {
    /// Only the most recently issued invocation writes state; older ones are discarded
    #[default]
    LatestIssued,
    /// Whichever invocation settles last overwrites state
    LastSettled,
}

impl SettlePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlePolicy::LatestIssued => "latestIssued",
            SettlePolicy::LastSettled => "lastSettled",
        }
    }
}

impl std::str::FromStr for SettlePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latestIssued" => Ok(SettlePolicy::LatestIssued),
            "lastSettled" => Ok(SettlePolicy::LastSettled),
            other => Err(format!(
                "unknown settle policy '{}' (expected latestIssued or lastSettled)",
                other
            )),
        }
    }
}

/// State plus the bookkeeping needed to order settlements
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) state: OperationState<T>,
    issued: u64,
    in_flight: usize,
}

impl<T> Slot<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: OperationState::idle(),
            issued: 0,
            in_flight: 0,
        }
    }

    /// Start an invocation and return its sequence token
    pub(crate) fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight += 1;
        self.state.pending = true;
        self.state.error = None;
        self.issued
    }

    /// Record an outcome. Returns false when the outcome was discarded as stale.
    pub(crate) fn settle(
        &mut self,
        seq: u64,
        policy: SettlePolicy,
        outcome: Result<T, RequestError>,
    ) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if policy == SettlePolicy::LatestIssued && seq != self.issued {
            return false;
        }

        match outcome {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.error = None;
            }
            Err(err) => self.state.error = Some(err),
        }
        self.state.pending = self.still_pending(policy);
        true
    }

    /// Forget an invocation that was dropped before settling
    pub(crate) fn abandon(&mut self, seq: u64, policy: SettlePolicy) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if policy == SettlePolicy::LastSettled || seq == self.issued {
            self.state.pending = self.still_pending(policy);
        }
    }

    fn still_pending(&self, policy: SettlePolicy) -> bool {
        match policy {
            SettlePolicy::LatestIssued => false,
            SettlePolicy::LastSettled => self.in_flight > 0,
        }
    }
}
