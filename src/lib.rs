//! schoolboard library
//!
//! Async operation bindings over a typed REST client for the school
//! management API, plus the page-level services and CLI built on them.

pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod operation;
pub mod services;

// Re-export commonly used types for convenience
pub use api::{HttpTransport, SchoolApi, Transport};
pub use operation::{
    AsyncOperation, LoadState, OperationState, RawResponse, RequestError, SettlePolicy,
    TransportFault,
};
