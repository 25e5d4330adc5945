//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, settings::Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::external::{build_http_client, build_provider};
use crate::state::AppState;
use crate::utils::JwksVerifier;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal arrives.
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Applies pending migrations when `database.auto_migrate` is set
    /// 3. Initializes the database pool, HTTP client, provider and verifier
    /// 4. Binds to the configured address and serves with graceful shutdown
    ///
    /// # Errors
    /// - Migration and connection pool errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %settings.server.host,
            port = %settings.server.port,
            request_timeout = %settings.server.request_timeout,
            cors_origins = settings.server.cors_allowed_origins.len(),
            "Server configuration loaded"
        );

        // The URL carries credentials and is never logged.
        tracing::info!(
            max_connections = %settings.database.max_connections,
            min_connections = %settings.database.min_connections,
            connection_timeout = %settings.database.connection_timeout,
            auto_migrate = %settings.database.auto_migrate,
            "Database configuration loaded"
        );

        tracing::info!(
            provider = %settings.provider.kind,
            base_url = %settings.provider.base_url(),
            timeout = %settings.provider.timeout,
            api_key_configured = %(!settings.provider.api_key().is_empty()),
            "Market data provider configuration loaded"
        );

        tracing::info!(
            jwks_uri = %settings.auth.jwks_uri,
            issuer = ?settings.auth.issuer,
            audience = ?settings.auth.audience,
            "Auth configuration loaded"
        );

        if settings.database.auto_migrate {
            tracing::info!("Applying pending migrations...");
            let applied = run_pending_migrations(settings.database.url.clone()).await?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
        }

        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&settings.database).await?;
        tracing::info!("Database connection pool initialized");

        let http = build_http_client(&settings.provider)?;
        let provider = build_provider(&settings.provider, http.clone());
        let verifier = Arc::new(JwksVerifier::new(http, &settings.auth));

        let address = settings.server.address();
        let state = AppState::new(pool, provider, verifier, Arc::new(settings));
        let router = create_router(state);
        tracing::info!("Router configured");

        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed the failure is logged and that signal is
/// never observed; the other one still triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
