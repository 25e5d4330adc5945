//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validates the configuration, then either reports and exits
    /// (`dry_run`) or runs the server until shutdown.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        self.config.validate()?;

        if dry_run {
            self.report();
            return Ok(());
        }

        Server::new(self.config)
            .run()
            .await
            .map_err(|source| AppError::Internal { source })
    }

    fn report(&self) {
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Market data provider: {}", self.config.provider.kind);
        println!("✓ JWKS endpoint: {}", self.config.auth.jwks_uri);
        println!(
            "✓ Migrations at startup: {}",
            if self.config.database.auto_migrate { "yes" } else { "no" }
        );
        println!("Dry run completed successfully - configuration is ready for deployment");
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
