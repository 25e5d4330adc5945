//! Outbound HTTP: the shared client and the market data providers.

pub mod client;
pub mod market;

pub use client::build_http_client;
pub use market::{MarketDataProvider, build_provider};
