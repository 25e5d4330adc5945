use async_trait::async_trait;
use jiff::civil::Date;

use super::types::{Financials, Fundamentals, PricePoint, Timeframe};
use crate::charting::InstitutionalHolder;
use crate::error::AppResult;

/// A source of company fundamentals and prices.
///
/// Implementations map their own payloads into the shared domain types and
/// report every failure (transport, status, error body, schema mismatch) as
/// `AppError::Upstream`. Each call requests every upstream document it needs
/// exactly once.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short identifier used in logs and error values.
    fn name(&self) -> &'static str;

    /// Profile, valuation ratios, share count and price target.
    async fn fundamentals(&self, ticker: &str) -> AppResult<Fundamentals>;

    /// Income, cash flow and balance sheet statements for both periods.
    async fn financials(&self, ticker: &str) -> AppResult<Financials>;

    async fn institutional_holders(&self, ticker: &str) -> AppResult<Vec<InstitutionalHolder>>;

    /// Closing prices from the timeframe's start date up to `today`, oldest first.
    async fn price_history(
        &self,
        ticker: &str,
        timeframe: Timeframe,
        today: Date,
    ) -> AppResult<Vec<PricePoint>>;
}
