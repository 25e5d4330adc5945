//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL connections.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Async connection pool type alias.
///
/// bb8::Pool is Arc-backed, so cloning it into each repository is cheap.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

fn manager(config: &DatabaseConfig) -> AsyncDieselConnectionManager<AsyncPgConnection> {
    AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.clone())
}

fn builder(config: &DatabaseConfig) -> bb8::Builder<AsyncDieselConnectionManager<AsyncPgConnection>> {
    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
}

/// Creates the connection pool and opens `min_connections` connections.
///
/// # Errors
///
/// `AppError::ConnectionPool` when the initial connections cannot be made.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    builder(config)
        .build(manager(config))
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })
}

/// Creates the pool without connecting. Connections are opened on first use.
pub fn lazy_connection_pool(config: &DatabaseConfig) -> AsyncDbPool {
    builder(config).build_unchecked(manager(config))
}
