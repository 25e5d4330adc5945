//! CLI module for equity-rs
//!
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command dispatch to the serve and migrate handlers

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;
use crate::logger::{LoggerError, init_logger};

/// Loads the configuration files and applies CLI overrides.
///
/// # Errors
/// Returns `ConfigError` if loading, merging or validation fails
pub fn load_and_merge_config(cli: &Cli) -> Result<Settings, ConfigError> {
    ConfigurationMerger::from_cli(cli)?.merge_cli_args(cli)
}

/// Installs the global tracing subscriber described by `settings.logger`.
pub fn init_logger_from_settings(settings: &Settings) -> Result<(), LoggerError> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .map_err(|e| LoggerError::config(e.to_string()))?;
    init_logger(logger_config)
}
