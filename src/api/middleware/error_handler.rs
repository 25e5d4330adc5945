//! Error handler for converting AppError to HTTP responses.
//!
//! Internal and upstream failures are logged here with their full source
//! chain and answered with an opaque body.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Maps an AppError variant to its HTTP status code.
///
/// # Status Code Mapping
/// - NotFound → 404 NOT_FOUND
/// - Duplicate → 409 CONFLICT
/// - Validation, ValidationErrors, BadRequest → 400 BAD_REQUEST
/// - Unauthorized → 401 UNAUTHORIZED
/// - ConnectionPool → 503 SERVICE_UNAVAILABLE
/// - Upstream, Database, Configuration, Internal → 500 INTERNAL_SERVER_ERROR
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Upstream { .. }
        | AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing body. Server-side variants never expose their source.
fn error_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::NotFound { entity, field, value } => {
            ErrorResponse::not_found_error(entity, field, value)
        }
        AppError::Duplicate { entity, field, value } => {
            ErrorResponse::duplicate_error(entity, field, value)
        }
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => {
            ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                .with_details(json!({ "errors": errors }))
        }
        AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
        AppError::Unauthorized { message } => ErrorResponse::new("UNAUTHORIZED", message),
        AppError::Upstream { .. } => ErrorResponse::new(
            "UPSTREAM_ERROR",
            "Failed to fetch data from the market data provider",
        ),
        AppError::Database { .. } => {
            ErrorResponse::new("DATABASE_ERROR", "A database error occurred")
        }
        AppError::Configuration { .. } => {
            ErrorResponse::new("CONFIGURATION_ERROR", "The server is misconfigured")
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
        }
        AppError::Internal { .. } => {
            ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
        }
    }
}

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// 5xx errors are logged with their source chain at error level, the
    /// rest at debug. The body is also stored as a response extension.
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = error_body(&self);
        let mut response = (status, Json(body.clone())).into_response();
        // Lets the request-id middleware re-render the body with the id.
        response.extensions_mut().insert(body);
        response
    }
}

/// Converts axum JSON rejection errors to a 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(_) => "Invalid JSON body",
            JsonRejection::JsonSyntaxError(_) => "JSON syntax error",
            JsonRejection::MissingJsonContentType(_) => {
                "Missing or invalid Content-Type header, expected application/json"
            }
            JsonRejection::BytesRejection(_) => "Failed to read request body",
            _ => "Failed to parse JSON request",
        };
        AppError::BadRequest {
            message: format!("{}: {}", message, rejection.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid path parameters: {}", rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid query parameters: {}", rejection.body_text()),
        }
    }
}

/// Rewrites non-JSON error responses produced outside the handlers (unknown
/// route, wrong method, timeouts) into the standard [`ErrorResponse`] shape.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (code, default_message) = match status {
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request payload too large"),
        s if s.is_server_error() => ("INTERNAL_SERVER_ERROR", "An internal server error occurred"),
        _ => ("BAD_REQUEST", "Bad request"),
    };

    let (parts, body) = response.into_parts();
    let original = axum::body::to_bytes(body, 64 * 1024)
        .await
        .map(|b| String::from_utf8_lossy(&b).trim().to_string())
        .unwrap_or_default();
    let message = if original.is_empty() || status.is_server_error() {
        default_message.to_string()
    } else {
        original
    };

    let error = ErrorResponse::new(code, &message);
    let mut rewritten = (parts.status, Json(error.clone())).into_response();
    rewritten.extensions_mut().insert(error);
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            error_to_status_code(&AppError::not_found("user", "clerk_id", "x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_to_status_code(&AppError::Duplicate {
                entity: "users".into(),
                field: "id".into(),
                value: "u1".into(),
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_to_status_code(&AppError::unauthorized("no")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_to_status_code(&AppError::upstream("fmp", "profile", anyhow::anyhow!("x"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_to_status_code(&AppError::ConnectionPool {
                source: anyhow::anyhow!("timed out"),
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_upstream_body_is_opaque() {
        let err = AppError::upstream(
            "fmp",
            "profile AAPL",
            anyhow::anyhow!("apikey=secret rejected"),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["code"], "UPSTREAM_ERROR");
        assert!(!json.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_validation_errors_listed_in_details() {
        let err = AppError::ValidationErrors {
            errors: vec![crate::error::ValidationFieldError {
                field: "email".into(),
                message: "Invalid email format".into(),
            }],
        };
        let json = body_json(err.into_response()).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["errors"][0]["field"], "email");
    }

    #[test]
    fn test_error_body_is_attached_as_extension() {
        let response = AppError::unauthorized("bad token").into_response();
        let body = response.extensions().get::<ErrorResponse>().unwrap();
        assert_eq!(body.code, "UNAUTHORIZED");
    }
}
