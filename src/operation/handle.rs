//! Bound operation handle

use super::error::{RequestError, TransportFault};
use super::response::RawResponse;
use super::state::{LoadState, OperationState, SettlePolicy, Slot};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Pending computation yielding a raw response
pub type ResponseFuture = BoxFuture<'static, Result<RawResponse, TransportFault>>;

/// Pending result of one `invoke`
pub type Invocation<T> = BoxFuture<'static, Result<T, RequestError>>;

type Operation<P> = dyn Fn(P) -> ResponseFuture + Send + Sync;

/// A caller-supplied operation together with the state of its latest invocation
///
/// Clones share the same state. Binding the same function twice gives two
/// independent handles.
pub struct AsyncOperation<P, T> {
    operation: Arc<Operation<P>>,
    slot: Arc<Mutex<Slot<T>>>,
    policy: SettlePolicy,
}

impl<P, T> Clone for AsyncOperation<P, T> {
    fn clone(&self) -> Self {
        Self {
            operation: Arc::clone(&self.operation),
            slot: Arc::clone(&self.slot),
            policy: self.policy,
        }
    }
}

impl<P, T> AsyncOperation<P, T>
where
    P: Send + 'static,
    T: DeserializeOwned + Clone + Send + 'static,
{
    /// Bind an operation with the default settle policy
    pub fn bind<F, Fut>(operation: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<RawResponse, TransportFault>> + Send + 'static,
    {
        Self::bind_with_policy(operation, SettlePolicy::default())
    }

    pub fn bind_with_policy<F, Fut>(operation: F, policy: SettlePolicy) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<RawResponse, TransportFault>> + Send + 'static,
    {
        Self {
            operation: Arc::new(move |params| operation(params).boxed()),
            slot: Arc::new(Mutex::new(Slot::new())),
            policy,
        }
    }

    /// Start the bound operation
    ///
    /// `pending` is set and `error` cleared before this returns. The returned
    /// future yields the decoded value or the normalized error; the same
    /// outcome is written to state unless a newer invocation has been issued
    /// (under `SettlePolicy::LatestIssued`).
    pub fn invoke(&self, params: P) -> Invocation<T> {
        let seq = lock(&self.slot).begin();
        tracing::debug!(seq, policy = self.policy.as_str(), "Invocation issued");

        let call = (self.operation)(params);
        let mut guard = SettleGuard {
            slot: Arc::downgrade(&self.slot),
            seq,
            policy: self.policy,
            armed: true,
        };

        async move {
            let outcome = match call.await {
                Ok(response) => response.into_result::<T>(),
                Err(fault) => Err(RequestError::from(fault)),
            };
            guard.settle(outcome.clone());
            outcome
        }
        .boxed()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> OperationState<T> {
        lock(&self.slot).state.clone()
    }

    pub fn data(&self) -> Option<T> {
        lock(&self.slot).state.data.clone()
    }

    pub fn error(&self) -> Option<RequestError> {
        lock(&self.slot).state.error.clone()
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.slot).state.pending
    }

    /// Tagged view of the current state
    pub fn load_state(&self) -> LoadState<T> {
        LoadState::from(self.state())
    }

    pub fn policy(&self) -> SettlePolicy {
        self.policy
    }
}

/// Writes the outcome back, or releases `pending` if the invocation is dropped
struct SettleGuard<T> {
    slot: Weak<Mutex<Slot<T>>>,
    seq: u64,
    policy: SettlePolicy,
    armed: bool,
}

impl<T> SettleGuard<T> {
    fn settle(&mut self, outcome: Result<T, RequestError>) {
        self.armed = false;
        let Some(slot) = self.slot.upgrade() else {
            tracing::debug!(seq = self.seq, "Handle dropped before settlement, outcome ignored");
            return;
        };
        let failed = outcome.is_err();
        if lock(&slot).settle(self.seq, self.policy, outcome) {
            tracing::debug!(seq = self.seq, failed, "Invocation settled");
        } else {
            tracing::debug!(seq = self.seq, "Superseded invocation discarded");
        }
    }
}

impl<T> Drop for SettleGuard<T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(slot) = self.slot.upgrade() {
            tracing::debug!(seq = self.seq, "Invocation abandoned before settlement");
            lock(&slot).abandon(self.seq, self.policy);
        }
    }
}

// Slot updates never leave it half-written, so a poisoned lock is still usable
fn lock<T>(slot: &Mutex<Slot<T>>) -> MutexGuard<'_, Slot<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok_response(body: serde_json::Value) -> Result<RawResponse, TransportFault> {
        Ok(RawResponse::json(200, "OK", &body))
    }

    #[tokio::test]
    async fn test_invoke_success_sets_data() {
        let op: AsyncOperation<(), serde_json::Value> =
            AsyncOperation::bind(|()| async { ok_response(json!({"id": 1})) });

        assert!(op.state().is_idle());
        let value = op.invoke(()).await.unwrap();
        assert_eq!(value, json!({"id": 1}));
        assert_eq!(op.data(), Some(json!({"id": 1})));
        assert!(!op.is_pending());
        assert!(op.error().is_none());
    }

    #[tokio::test]
    async fn test_params_forwarded() {
        let op: AsyncOperation<u64, u64> =
            AsyncOperation::bind(|id: u64| async move { ok_response(json!(id * 2)) });

        assert_eq!(op.invoke(21).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_pending_set_before_first_poll() {
        let op: AsyncOperation<(), u8> = AsyncOperation::bind(|()| async { ok_response(json!(1)) });

        let invocation = op.invoke(());
        assert!(op.is_pending());
        assert_eq!(op.load_state(), LoadState::Pending);

        invocation.await.unwrap();
        assert_eq!(op.load_state(), LoadState::Success(1));
    }

    #[tokio::test]
    async fn test_dropped_invocation_releases_pending() {
        let op: AsyncOperation<(), u8> = AsyncOperation::bind(|()| async { ok_response(json!(1)) });

        let invocation = op.invoke(());
        assert!(op.is_pending());
        drop(invocation);
        assert!(!op.is_pending());
        assert!(op.data().is_none());
    }

    #[tokio::test]
    async fn test_settlement_after_handle_dropped() {
        let op: AsyncOperation<(), u8> = AsyncOperation::bind(|()| async { ok_response(json!(5)) });

        let invocation = op.invoke(());
        drop(op);
        // The caller still gets its value, there is just no state to write
        assert_eq!(invocation.await.unwrap(), 5);
    }
}
