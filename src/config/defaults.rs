//! Default configuration values
//!
//! Provides default configuration instances and helper functions.

use super::schema::Config;
use anyhow::{Context, Result};
use std::time::Duration;

/// Get the default configuration
pub fn default_config() -> Config {
    Config::default()
}

/// Parse duration string (e.g., "30s", "1m", "500ms")
pub fn parse_duration(s: &str) -> Result<Duration> {
    if let Some(ms) = s.strip_suffix("ms") {
        let ms: u64 = ms.parse().context("Invalid duration")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(secs) = s.strip_suffix('s') {
        let secs: u64 = secs.parse().context("Invalid duration")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(mins) = s.strip_suffix('m') {
        let mins: u64 = mins.parse().context("Invalid duration")?;
        let secs = mins.checked_mul(60).context("Duration too large")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(hours) = s.strip_suffix('h') {
        let hours: u64 = hours.parse().context("Invalid duration")?;
        let secs = hours.checked_mul(3600).context("Duration too large")?;
        Ok(Duration::from_secs(secs))
    } else {
        anyhow::bail!("Invalid duration format: {}", s)
    }
}
