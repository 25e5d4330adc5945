//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Dispatches the parsed command. No subcommand means `serve`.
///
/// For `serve` without `--dry-run` this only returns once the server has
/// shut down.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run }) => {
            MigrateCommandHandler::new(settings).execute(*dry_run).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/equity".to_string();
        config.auth.jwks_uri = "https://clerk.example.dev/.well-known/jwks.json".to_string();
        config.provider.fmp_api_key = "demo".to_string();
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["equity-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run_invalid_config() {
        let cli = Cli::try_parse_from(["equity-rs", "serve", "--dry-run"]).unwrap();
        let mut config = valid_config();
        config.server.port = 0;
        assert!(execute_command(&cli, config).await.is_err());
    }
}
