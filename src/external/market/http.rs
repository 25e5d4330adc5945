//! JSON fetching shared by the provider clients.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Sends `request` and returns the decoded JSON body.
///
/// Transport failures, non-2xx statuses, non-JSON bodies and bodies that
/// `error_body` recognizes as a provider error all become
/// `AppError::Upstream`.
pub(super) async fn fetch_json(
    provider: &'static str,
    operation: &str,
    request: reqwest::RequestBuilder,
    error_body: fn(&Value) -> Option<String>,
) -> AppResult<Value> {
    tracing::debug!(provider, operation, "Calling market data provider");

    let response = request
        .send()
        .await
        .map_err(|e| AppError::upstream(provider, operation, e))?
        .error_for_status()
        .map_err(|e| AppError::upstream(provider, operation, e))?;

    let body: Value = response
        .json()
        .await
        .map_err(|e| AppError::upstream(provider, operation, e))?;

    if let Some(message) = error_body(&body) {
        return Err(AppError::upstream(
            provider,
            operation,
            anyhow::anyhow!("provider returned an error: {}", message),
        ));
    }

    Ok(body)
}

/// Checks a JSON body against its schema.
pub(super) fn decode<T: DeserializeOwned>(
    provider: &'static str,
    operation: &str,
    body: Value,
) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| {
        AppError::upstream(
            provider,
            operation,
            anyhow::anyhow!("unexpected payload: {}", e),
        )
    })
}

/// Returns the string value of the first of `keys` present in a JSON object.
pub(super) fn message_under(body: &Value, keys: &[&str]) -> Option<String> {
    let object = body.as_object()?;
    keys.iter().find_map(|key| {
        object.get(*key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    })
}
