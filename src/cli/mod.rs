//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod config;
mod logging;
mod output;
mod version;

pub use commands::{Args, Command, run};
pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use output::{render, render_table};
pub use version::display_version;
