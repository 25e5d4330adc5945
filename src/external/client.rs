use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};

/// Builds the outbound HTTP client shared by the market data providers and
/// the JWKS fetcher.
///
/// The client pools connections internally, so one instance is created at
/// startup and cloned wherever it is needed.
pub fn build_http_client(config: &ProviderConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e).context("failed to build HTTP client"),
        })
}
