//! HTTP transport behind the REST client

use crate::config::{ApiConfig, parse_duration};
use crate::operation::{RawResponse, TransportFault};
use anyhow::{Context, Result};
use async_trait::async_trait;
use url::Url;

/// HTTP verb of an API request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One request relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with '/', e.g. "/classes/3"
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Sends API requests and hands back raw responses
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportFault>;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpTransport {
    /// Create a transport from explicit configuration
    ///
    /// `token` is sent as a bearer token on every request when present.
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid API base URL: {}", config.base_url))?;
        let timeout = parse_duration(&config.timeout)
            .with_context(|| format!("Invalid API timeout: {}", config.timeout))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        tracing::debug!("Created HTTP transport for: {}", base_url);

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Absolute URL for a request
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportFault> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| TransportFault::new(format!("Invalid request URL {}: {}", raw, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportFault> {
        let url = self.url_for(&request)?;
        tracing::debug!("{} {}", request.method.as_str(), url);

        let mut req = self.client.request(request.method.into(), url.clone());
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        tracing::debug!("{} {} -> {}", request.method.as_str(), url, status);

        Ok(RawResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body.to_vec(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> HttpTransport {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        HttpTransport::new(&config, None).unwrap()
    }

    #[test]
    fn test_url_joins_base_path_and_query() {
        let t = transport("https://api.school.example/v1/");
        let req = ApiRequest::get("/analytics/attendance").with_query("period", "week");
        assert_eq!(
            t.url_for(&req).unwrap().as_str(),
            "https://api.school.example/v1/analytics/attendance?period=week"
        );
    }

    #[test]
    fn test_url_without_query_has_no_question_mark() {
        let t = transport("http://localhost:8080");
        let req = ApiRequest::delete("/classes/3");
        assert_eq!(
            t.url_for(&req).unwrap().as_str(),
            "http://localhost:8080/classes/3"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ApiConfig {
            timeout: "eventually".to_string(),
            ..ApiConfig::default()
        };
        assert!(HttpTransport::new(&config, None).is_err());

        let config = ApiConfig {
            base_url: "::nope".to_string(),
            ..ApiConfig::default()
        };
        assert!(HttpTransport::new(&config, None).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_fault() {
        // Port 9 on loopback is the discard port and is closed on test machines
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: "2s".to_string(),
            token_env: None,
        };
        let t = HttpTransport::new(&config, None).unwrap();
        let err = t.send(ApiRequest::get("/classes")).await.unwrap_err();
        assert!(!err.message().is_empty());
    }
}
