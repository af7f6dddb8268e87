//! schoolboard - command-line client for the school management API

use anyhow::{Context, Result};
use clap::Parser;
use schoolboard::api::{HttpTransport, SchoolApi};
use schoolboard::cli::{self, Args, Command};
use schoolboard::config::{ConfigLoader, set_config_value};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.debug);

    let command = match args.command {
        Command::Config { subcommand } => return cli::handle_config_command(subcommand),
        Command::Version => {
            cli::display_version();
            return Ok(());
        }
        other => other,
    };

    // Load configuration, then apply command-line overrides on top
    let mut config = ConfigLoader::load().context("Failed to load configuration")?;
    if let Some(base_url) = &args.base_url {
        set_config_value(&mut config, "api.baseUrl", base_url)?;
    }
    if let Some(format) = args.output {
        config.output.format = format;
    }
    ConfigLoader::validate(&config)?;

    tracing::debug!(
        "Configuration loaded: baseUrl={}, settlePolicy={}",
        config.api.base_url,
        config.operations.settle_policy.as_str()
    );

    let token = match &config.api.token_env {
        Some(var) => Some(
            std::env::var(var)
                .with_context(|| format!("Environment variable {} not set (api.tokenEnv)", var))?,
        ),
        None => None,
    };

    let transport = HttpTransport::new(&config.api, token)?;
    let api = SchoolApi::new(Arc::new(transport));

    cli::run(command, &api, &config).await
}
