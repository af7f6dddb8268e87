//! Configuration system for schoolboard
//!
//! A YAML file under the user config directory, overridable through
//! environment variables and command-line flags. The resolved `ApiConfig` is
//! handed explicitly to the HTTP transport.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use defaults::parse_duration;
pub use loader::ConfigLoader;
pub use schema::{ApiConfig, Config, OperationsConfig, OutputConfig, OutputFormat};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "api.baseUrl" => Ok(config.api.base_url.clone()),
        "api.timeout" => Ok(config.api.timeout.clone()),
        "api.tokenEnv" => Ok(config.api.token_env.clone().unwrap_or_default()),
        "operations.settlePolicy" => Ok(config.operations.settle_policy.as_str().to_string()),
        "output.format" => Ok(config.output.format.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "api.baseUrl" => {
            url::Url::parse(value).context("api.baseUrl must be an absolute URL")?;
            config.api.base_url = value.trim_end_matches('/').to_string();
        }
        "api.timeout" => {
            parse_duration(value).context("api.timeout must look like '500ms', '30s' or '1m'")?;
            config.api.timeout = value.to_string();
        }
        "api.tokenEnv" => {
            if value.is_empty() {
                config.api.token_env = None;
            } else {
                config.api.token_env = Some(value.to_string());
            }
        }
        "operations.settlePolicy" => {
            config.operations.settle_policy = value
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
        }
        "output.format" => {
            config.output.format = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
