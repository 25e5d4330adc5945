//! Market data providers.
//!
//! Each provider declares its response schema, validates payloads at the
//! boundary and maps them into the shared types in [`types`].

mod alpha_vantage;
mod fmp;
mod http;
mod provider;
mod types;

pub use alpha_vantage::AlphaVantageProvider;
pub use fmp::FmpProvider;
pub use provider::MarketDataProvider;
pub use types::{
    BarInterval, CompanyProfile, Financials, Fundamentals, KeyMetrics, PeriodRecords, PricePoint,
    Timeframe,
};

use std::sync::Arc;

use crate::config::{ProviderConfig, ProviderKind};

/// Builds the provider selected by `provider.kind`, sharing `http`.
pub fn build_provider(config: &ProviderConfig, http: reqwest::Client) -> Arc<dyn MarketDataProvider> {
    match config.kind {
        ProviderKind::Fmp => Arc::new(FmpProvider::new(
            http,
            config.fmp_base_url.clone(),
            config.fmp_api_key.clone(),
        )),
        ProviderKind::AlphaVantage => Arc::new(AlphaVantageProvider::new(
            http,
            config.alpha_vantage_base_url.clone(),
            config.alpha_vantage_api_key.clone(),
        )),
    }
}
