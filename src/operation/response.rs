//! Raw response handed back by a bound operation

use super::error::RequestError;
use serde::de::DeserializeOwned;

/// Status line plus undecoded body of a completed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Build a response carrying a JSON body
    pub fn json(status: u16, status_text: impl Into<String>, body: &serde_json::Value) -> Self {
        Self::new(status, status_text, body.to_string().into_bytes())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body, treating an empty body as JSON `null`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(body).map_err(|e| RequestError::Decode(e.to_string()))
    }

    /// Turn a non-success status into a `RequestError`, otherwise decode
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        if !self.is_success() {
            return Err(RequestError::Remote {
                status: self.status,
                status_text: self.status_text,
            });
        }
        self.decode()
    }
}
