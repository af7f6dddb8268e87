//! Failure types produced by bound operations

use thiserror::Error;

/// The underlying call could not complete (connection refused, DNS, timeout...)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportFault {
    message: String,
}

impl TransportFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display omits the source chain, which is where the useful bit usually is
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        Self { message }
    }
}

/// Normalized failure of a single invocation
///
/// Both transport faults and non-success statuses end up here, so views only
/// ever have one error shape to render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Request failed: {0}")]
    Transport(#[from] TransportFault),

    #[error("API error: {}", remote_message(.status, .status_text))]
    Remote { status: u16, status_text: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

fn remote_message(status: &u16, status_text: &str) -> String {
    match status_text.trim() {
        "" => status.to_string(),
        text => format!("{} {}", status, text),
    }
}

impl RequestError {
    /// Status code reported by the remote end, if the call got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_contains_status_and_text() {
        let err = RequestError::Remote {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 Not Found");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_remote_message_without_status_text() {
        let err = RequestError::Remote {
            status: 599,
            status_text: String::new(),
        };
        assert_eq!(err.to_string(), "API error: 599");
    }

    #[test]
    fn test_transport_message_wraps_fault() {
        let err = RequestError::from(TransportFault::new("network down"));
        assert!(err.to_string().contains("network down"));
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }
}
