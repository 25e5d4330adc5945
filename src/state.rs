//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::external::MarketDataProvider;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::utils::JwksVerifier;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap: every field is an `Arc` or holds `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Bearer token verification for the followed-stocks routes
    pub verifier: Arc<JwksVerifier>,
    pub settings: Arc<Settings>,
    /// Pool used by the health check. `None` when running on in-memory
    /// repositories.
    pub db_pool: Option<AsyncDbPool>,
    /// Name of the configured market data provider
    pub provider_name: &'static str,
}

impl AppState {
    /// Production state backed by PostgreSQL.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, provider, verifier, settings);
    /// ```
    pub fn new(
        pool: AsyncDbPool,
        provider: Arc<dyn MarketDataProvider>,
        verifier: Arc<JwksVerifier>,
        settings: Arc<Settings>,
    ) -> Self {
        let repos = Repositories::new(pool.clone());
        Self::from_parts(repos, provider, verifier, settings, Some(pool))
    }

    /// Assembles a state from already-built parts. Router tests use this with
    /// [`Repositories::from_store`].
    pub fn from_parts(
        repos: Repositories,
        provider: Arc<dyn MarketDataProvider>,
        verifier: Arc<JwksVerifier>,
        settings: Arc<Settings>,
        db_pool: Option<AsyncDbPool>,
    ) -> Self {
        let provider_name = provider.name();
        Self {
            services: Services::new(repos, provider),
            verifier,
            settings,
            db_pool,
            provider_name,
        }
    }
}
