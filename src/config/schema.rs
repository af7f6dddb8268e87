//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use crate::operation::SettlePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// REST API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Behaviour of bound operations
    #[serde(default)]
    pub operations: OperationsConfig,

    /// Command output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout ("500ms", "30s", "1m", "2h")
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Name of the environment variable holding a bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}

/// Operation binding configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationsConfig {
    /// Which invocation may write state when calls overlap
    #[serde(default)]
    pub settle_policy: SettlePolicy,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Rendering of command results on stdout
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Table => "table",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "table" => Ok(OutputFormat::Table),
            other => Err(format!(
                "invalid output format '{}' (expected json, yaml or table)",
                other
            )),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.schoolmanagement.example".to_string()
}

fn default_timeout() -> String {
    "30s".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            token_env: None,
        }
    }
}
