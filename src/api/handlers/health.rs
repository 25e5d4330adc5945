//! Health check endpoint handlers.
//!
//! The database is checked directly through the pool rather than through a
//! repository. Market data providers are not called; a health check should
//! not spend API quota.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::db::AsyncDbPool;
use crate::state::AppState;

/// Creates health check routes.
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health_check))
}

/// GET /health - Service and database status
///
/// # Responses
/// - `200 OK` - Service is healthy
/// - `503 Service Unavailable` - The database check failed
///
/// # Example Response
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T12:00:00Z",
///   "provider": "fmp",
///   "checks": {
///     "database": {
///       "status": "healthy",
///       "message": "Connected",
///       "response_time_ms": 5
///     }
///   }
/// }
/// ```
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = BTreeMap::new();
    if let Some(pool) = &state.db_pool {
        checks.insert("database".to_string(), check_database(pool).await);
    }

    let status = HealthResponse::overall(&checks);
    let response = HealthResponse {
        status,
        version: state.settings.application.version.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
        provider: state.provider_name.to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response))
}

/// Check database connectivity by directly accessing the connection pool.
async fn check_database(pool: &AsyncDbPool) -> ComponentHealth {
    use diesel_async::RunQueryDsl;

    let start = Instant::now();
    let result = match pool.get().await {
        Ok(mut conn) => diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| format!("Query failed: {}", e)),
        Err(e) => Err(format!("Connection failed: {}", e)),
    };
    let elapsed = Some(start.elapsed().as_millis() as u64);

    match result {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("Connected".to_string()),
            response_time_ms: elapsed,
        },
        Err(message) => {
            tracing::warn!(error = %message, "Database health check failed");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(message),
                response_time_ms: elapsed,
            }
        }
    }
}
