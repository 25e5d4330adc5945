use async_trait::async_trait;
use jiff::civil::Date;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{
    AvBalanceReport, AvCashFlowReport, AvIncomeReport, AvOverview, AvReports, price_points,
};
use crate::charting::{FinancialRecord, InstitutionalHolder};
use crate::error::{AppError, AppResult};
use crate::external::market::http::{decode, fetch_json, message_under};
use crate::external::market::provider::MarketDataProvider;
use crate::external::market::types::{
    Financials, Fundamentals, PeriodRecords, PricePoint, Timeframe,
};

const PROVIDER: &str = "alpha_vantage";

/// Alpha Vantage client. Every call goes to the single `query` endpoint with
/// a `function` parameter.
pub struct AlphaVantageProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Rate limits and premium-only endpoints come back as 200 with a
    /// `Note` or `Information` body.
    fn error_body(body: &Value) -> Option<String> {
        message_under(body, &["Error Message", "Note", "Information"])
    }

    async fn query(&self, operation: &str, params: &[(&str, &str)]) -> AppResult<Value> {
        let request = self
            .http
            .get(&self.base_url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())]);
        fetch_json(PROVIDER, operation, request, Self::error_body).await
    }

    /// One statement function. The response holds annual and quarterly
    /// reports together.
    async fn reports<T>(&self, ticker: &str, function: &'static str) -> AppResult<PeriodRecords>
    where
        T: DeserializeOwned,
        for<'r> FinancialRecord: From<&'r T>,
    {
        let operation = format!("{} {}", function, ticker);
        let body = self
            .query(&operation, &[("function", function), ("symbol", ticker)])
            .await?;
        Ok(decode::<AvReports<T>>(PROVIDER, &operation, body)?.into_records())
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fundamentals(&self, ticker: &str) -> AppResult<Fundamentals> {
        let operation = format!("overview {}", ticker);
        let body = self
            .query(&operation, &[("function", "OVERVIEW"), ("symbol", ticker)])
            .await?;
        let overview: AvOverview = decode(PROVIDER, &operation, body)?;
        Ok(overview.into())
    }

    async fn financials(&self, ticker: &str) -> AppResult<Financials> {
        let (income, cash_flow, balance_sheet) = tokio::try_join!(
            self.reports::<AvIncomeReport>(ticker, "INCOME_STATEMENT"),
            self.reports::<AvCashFlowReport>(ticker, "CASH_FLOW"),
            self.reports::<AvBalanceReport>(ticker, "BALANCE_SHEET"),
        )?;
        Ok(Financials {
            income,
            cash_flow,
            balance_sheet,
        })
    }

    async fn institutional_holders(&self, ticker: &str) -> AppResult<Vec<InstitutionalHolder>> {
        tracing::debug!(ticker, "Alpha Vantage has no institutional holder data");
        Ok(Vec::new())
    }

    /// Always daily bars: the intraday series only reaches back about a
    /// month, shorter than the narrowest timeframe.
    async fn price_history(
        &self,
        ticker: &str,
        timeframe: Timeframe,
        today: Date,
    ) -> AppResult<Vec<PricePoint>> {
        let operation = format!("price history {} {}", ticker, timeframe);
        let from = timeframe.start_date(today).to_string();

        let body = self
            .query(
                &operation,
                &[
                    ("function", "TIME_SERIES_DAILY"),
                    ("symbol", ticker),
                    ("outputsize", "full"),
                ],
            )
            .await?;

        price_points(&body, "Time Series (Daily)", &from).map_err(|message| {
            AppError::upstream(
                PROVIDER,
                operation,
                anyhow::anyhow!("unexpected payload: {}", message),
            )
        })
    }
}
