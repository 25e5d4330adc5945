//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// Company fundamentals and watchlist API server
#[derive(Parser, Debug)]
#[command(name = "equity-rs")]
#[command(about = "Company fundamentals and watchlist API server")]
#[command(long_about = "
equity-rs serves company snapshots, historical price charts and per-user
watchlists. Financial data comes from Financial Modeling Prep or Alpha
Vantage; users and followed stocks live in PostgreSQL.

EXAMPLES:
    # Start the server with default configuration
    equity-rs serve

    # Start server on custom host and port
    equity-rs serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    equity-rs --config /etc/equity/production.toml serve

    # Check configuration without starting the server
    equity-rs serve --dry-run

    # Apply database migrations, or list the pending ones
    equity-rs migrate
    equity-rs migrate --dry-run
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute. Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Use a single TOML file instead of the layered config/ directory.
    /// EQUITY_* environment variables still apply on top.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection (EQUITY_APP_ENV)
    ///
    /// Selects which `{env}.toml` layer is loaded on top of default.toml.
    ///
    /// Available values: development (dev), test, staging, production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level, showing detailed information
    /// about provider calls and request handling. Useful for troubleshooting.
    /// Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only, hiding informational messages.
    /// Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Binds to the configured host and port, opens the database pool,
    /// connects the market data provider and begins accepting requests.
    ///
    /// Examples:
    ///   equity-rs serve                           # Start with defaults
    ///   equity-rs serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   equity-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections from any interface.
        /// Must be a valid IPv4 address, hostname, or 'localhost'.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Must be between 1 and 65535. Ports below 1024 typically require root privileges.
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over both the configuration file and the global
        /// --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Performs a complete configuration validation check without starting the server.
        /// Returns exit code 0 if valid, non-zero if invalid.
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply embedded database migrations
    ///
    /// Examples:
    ///   equity-rs migrate            # Apply all pending migrations
    ///   equity-rs migrate --dry-run  # Show pending migrations without applying
    Migrate {
        /// Show pending migrations without applying
        ///
        /// Lists all migrations that would be applied without actually running them.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["equity-rs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["equity-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "equity-rs", "serve", "--host", "0.0.0.0", "--port", "8080", "--log-level", "warn",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Serve { host, port, log_level, dry_run }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert_eq!(log_level.map(|l| l.as_str()), Some("warn"));
                assert!(!dry_run);
            }
            other => panic!("Expected Serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_serve_rejects_port_zero() {
        assert!(Cli::try_parse_from(["equity-rs", "serve", "--port", "0"]).is_err());
    }

    #[test]
    fn test_migrate_dry_run() {
        let cli = Cli::try_parse_from(["equity-rs", "migrate", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Migrate { dry_run: true })));
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["equity-rs", "--env", "prod"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Production)));
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["equity-rs", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
