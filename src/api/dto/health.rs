//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Health check response structure.
///
/// Provides information about the application's health status
/// and various system components.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2024-01-01T12:00:00Z",
    "provider": "fmp",
    "checks": {
        "database": {
            "status": "healthy",
            "message": "Connected",
            "response_time_ms": 5
        }
    }
}))]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// RFC 3339 time of the check.
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    /// Market data provider serving company requests.
    #[schema(example = "fmp")]
    pub provider: String,
    /// Detailed checks for various components
    pub checks: BTreeMap<String, ComponentHealth>,
}

/// Health status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// A component check failed
    Unhealthy,
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    /// Component status
    pub status: HealthStatus,
    /// Optional message with details
    #[schema(example = "Connected")]
    pub message: Option<String>,
    /// Response time in milliseconds
    #[schema(example = 5)]
    pub response_time_ms: Option<u64>,
}

impl HealthResponse {
    /// Unhealthy as soon as one component is.
    pub fn overall(checks: &BTreeMap<String, ComponentHealth>) -> HealthStatus {
        if checks.values().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        }
    }
}
