//! Embedded diesel migrations.
//!
//! `diesel_migrations` only drives synchronous connections, so every entry
//! point here runs a `PgConnection` on the blocking pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn establish(database_url: &str, operation: &str) -> AppResult<PgConnection> {
    PgConnection::establish(database_url).map_err(|e| AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("Connection error: {}", e),
    })
}

async fn blocking<T, F>(f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
}

/// Names of migrations not yet applied.
pub async fn pending_migrations(database_url: String) -> AppResult<Vec<String>> {
    blocking(move || {
        let mut conn = establish(&database_url, "establish connection for migration check")?;
        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "check pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })?;
        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
}

/// Applies all pending migrations and returns their versions.
pub async fn run_pending_migrations(database_url: String) -> AppResult<Vec<String>> {
    blocking(move || {
        let mut conn = establish(&database_url, "establish connection for migrations")?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })?;
        Ok(applied.iter().map(|v| v.to_string()).collect())
    })
    .await
}
