//! Generic asynchronous operation binding
//!
//! Wraps a caller-supplied async call (normally one REST endpoint), tracks the
//! lifecycle of its invocations and exposes the latest data, error and
//! pending flag to whatever view owns the binding.
//!
//! Overlapping invocations are ordered by a sequence token: by default only
//! the most recently issued invocation may write state, so a slow stale
//! response can never clobber a fresher one.

mod error;
mod handle;
mod response;
mod state;

pub use error::{RequestError, TransportFault};
pub use handle::{AsyncOperation, Invocation, ResponseFuture};
pub use response::RawResponse;
pub use state::{LoadState, OperationState, SettlePolicy};
