//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{
    defaults, paths,
    schema::{Config, OutputFormat},
};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load() -> Result<Config> {
        Self::load_layered(&paths::root_config_path(), |key| std::env::var(key).ok())
    }

    /// Load from an explicit file with an explicit environment lookup
    pub fn load_layered<F>(path: &Path, env: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config, env))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate a loaded configuration
    ///
    /// Fails on a base URL that is not an absolute http(s) URL or an
    /// unparseable timeout.
    pub fn validate(config: &Config) -> Result<()> {
        let url = url::Url::parse(&config.api.base_url)
            .with_context(|| format!("api.baseUrl is not a valid URL: {}", config.api.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "api.baseUrl must use http or https, got '{}'",
                url.scheme()
            );
        }

        defaults::parse_duration(&config.api.timeout)
            .with_context(|| format!("api.timeout is invalid: {}", config.api.timeout))?;

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides<F>(mut config: Config, env: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        // SCHOOLBOARD_API_BASE_URL override
        if let Some(base_url) = env("SCHOOLBOARD_API_BASE_URL") {
            config.api.base_url = base_url;
        }

        // SCHOOLBOARD_API_TIMEOUT override
        if let Some(timeout) = env("SCHOOLBOARD_API_TIMEOUT") {
            config.api.timeout = timeout;
        }

        // SCHOOLBOARD_OUTPUT override
        if let Some(format) = env("SCHOOLBOARD_OUTPUT") {
            match format.parse::<OutputFormat>() {
                Ok(format) => config.output.format = format,
                Err(e) => tracing::warn!("Ignoring SCHOOLBOARD_OUTPUT: {}", e),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
