//! Service layer for page-level data
//!
//! Each service owns the bound operations one page needs, so views only deal
//! with `AsyncOperation` state and never with requests or transports.

pub mod account;
pub mod analytics;
pub mod communication;
pub mod directory;

pub use account::AccountService;
pub use analytics::{AnalyticsOverview, AnalyticsService};
pub use communication::CommunicationService;
pub use directory::{DirectoryService, DirectoryView};

use crate::operation::RequestError;

/// Failure of a service call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// Rejected before any request was issued
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Reject blank form fields, naming the first one that is missing
pub(crate) fn require_filled(fields: &[(&str, &str)]) -> Result<(), ServiceError> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{} is required", name)));
        }
    }
    Ok(())
}
