use async_trait::async_trait;
use jiff::civil::Date;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{
    FmpBalanceSheet, FmpCashFlowStatement, FmpHistoricalBar, FmpIncomeStatement,
    FmpInstitutionalHolder, FmpKeyMetricsTtm, FmpPriceTargetConsensus, FmpProfile,
    FmpSharesFloat, balance_records, price_points,
};
use crate::charting::{FinancialRecord, InstitutionalHolder, Period};
use crate::error::{AppError, AppResult};
use crate::external::market::http::{decode, fetch_json, message_under};
use crate::external::market::provider::MarketDataProvider;
use crate::external::market::types::{
    BarInterval, CompanyProfile, Financials, Fundamentals, KeyMetrics, PeriodRecords, PricePoint,
    Timeframe,
};

const PROVIDER: &str = "fmp";

/// Financial Modeling Prep client.
pub struct FmpProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FmpProvider {
    /// `base_url` is the API root without the version segment, e.g.
    /// `https://financialmodelingprep.com/api`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn error_body(body: &Value) -> Option<String> {
        message_under(body, &["Error Message"])
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let request = self
            .http
            .get(&url)
            .query(query)
            .query(&[("apikey", self.api_key.as_str())]);
        let body = fetch_json(PROVIDER, operation, request, Self::error_body).await?;
        decode(PROVIDER, operation, body)
    }

    async fn profile(&self, ticker: &str) -> AppResult<CompanyProfile> {
        let operation = format!("profile {}", ticker);
        let profiles: Vec<FmpProfile> = self
            .get(&operation, &format!("v3/profile/{}", ticker), &[])
            .await?;

        profiles
            .into_iter()
            .next()
            .map(CompanyProfile::from)
            .ok_or_else(|| {
                AppError::upstream(PROVIDER, operation, anyhow::anyhow!("empty profile list"))
            })
    }

    async fn key_metrics(&self, ticker: &str) -> AppResult<KeyMetrics> {
        let metrics: Vec<FmpKeyMetricsTtm> = self
            .get(
                &format!("key metrics {}", ticker),
                &format!("v3/key-metrics-ttm/{}", ticker),
                &[],
            )
            .await?;
        Ok(metrics.into_iter().next().map(KeyMetrics::from).unwrap_or_default())
    }

    async fn shares_outstanding(&self, ticker: &str) -> AppResult<f64> {
        let floats: Vec<FmpSharesFloat> = self
            .get(
                &format!("shares float {}", ticker),
                "v4/shares_float",
                &[("symbol", ticker)],
            )
            .await?;
        Ok(floats
            .into_iter()
            .find_map(|f| f.outstanding_shares)
            .unwrap_or(0.0))
    }

    async fn price_target(&self, ticker: &str) -> AppResult<Option<f64>> {
        let targets: Vec<FmpPriceTargetConsensus> = self
            .get(
                &format!("price target {}", ticker),
                "v4/price-target-consensus",
                &[("symbol", ticker)],
            )
            .await?;
        Ok(targets.into_iter().find_map(|t| t.target_consensus))
    }

    async fn income(&self, ticker: &str, period: Period) -> AppResult<Vec<FmpIncomeStatement>> {
        self.get(
            &format!("income statement {}", ticker),
            &format!("v3/income-statement/{}", ticker),
            &[("period", period_param(period))],
        )
        .await
    }

    async fn cash_flow(&self, ticker: &str, period: Period) -> AppResult<Vec<FmpCashFlowStatement>> {
        self.get(
            &format!("cash flow statement {}", ticker),
            &format!("v3/cash-flow-statement/{}", ticker),
            &[("period", period_param(period))],
        )
        .await
    }

    async fn balance_sheet(&self, ticker: &str, period: Period) -> AppResult<Vec<FmpBalanceSheet>> {
        self.get(
            &format!("balance sheet {}", ticker),
            &format!("v3/balance-sheet-statement/{}", ticker),
            &[("period", period_param(period))],
        )
        .await
    }
}

fn period_param(period: Period) -> &'static str {
    match period {
        Period::Quarterly => "quarter",
        Period::Yearly => "annual",
    }
}

fn interval_segment(interval: BarInterval) -> &'static str {
    match interval {
        BarInterval::FifteenMinutes => "15min",
        BarInterval::Daily => "1day",
    }
}

fn records<T>(rows: &[T]) -> Vec<FinancialRecord>
where
    for<'r> FinancialRecord: From<&'r T>,
{
    rows.iter().map(FinancialRecord::from).collect()
}

#[async_trait]
impl MarketDataProvider for FmpProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fundamentals(&self, ticker: &str) -> AppResult<Fundamentals> {
        let (profile, metrics, shares_outstanding, price_target) = tokio::try_join!(
            self.profile(ticker),
            self.key_metrics(ticker),
            self.shares_outstanding(ticker),
            self.price_target(ticker),
        )?;
        Ok(Fundamentals {
            profile,
            metrics,
            shares_outstanding,
            price_target,
        })
    }

    /// Balance sheets carry no share count; it is joined from the income
    /// statements fetched in the same call.
    async fn financials(&self, ticker: &str) -> AppResult<Financials> {
        let (income_q, income_y, cash_q, cash_y, balance_q, balance_y) = tokio::try_join!(
            self.income(ticker, Period::Quarterly),
            self.income(ticker, Period::Yearly),
            self.cash_flow(ticker, Period::Quarterly),
            self.cash_flow(ticker, Period::Yearly),
            self.balance_sheet(ticker, Period::Quarterly),
            self.balance_sheet(ticker, Period::Yearly),
        )?;

        Ok(Financials {
            balance_sheet: PeriodRecords {
                quarterly: balance_records(&balance_q, &income_q),
                yearly: balance_records(&balance_y, &income_y),
            },
            income: PeriodRecords {
                quarterly: records(&income_q),
                yearly: records(&income_y),
            },
            cash_flow: PeriodRecords {
                quarterly: records(&cash_q),
                yearly: records(&cash_y),
            },
        })
    }

    async fn institutional_holders(&self, ticker: &str) -> AppResult<Vec<InstitutionalHolder>> {
        let holders: Vec<FmpInstitutionalHolder> = self
            .get(
                &format!("institutional holders {}", ticker),
                &format!("v3/institutional-holder/{}", ticker),
                &[],
            )
            .await?;
        Ok(holders.into_iter().map(InstitutionalHolder::from).collect())
    }

    async fn price_history(
        &self,
        ticker: &str,
        timeframe: Timeframe,
        today: Date,
    ) -> AppResult<Vec<PricePoint>> {
        let from = timeframe.start_date(today).to_string();
        let to = today.to_string();
        let bars: Vec<FmpHistoricalBar> = self
            .get(
                &format!("price history {} {}", ticker, timeframe),
                &format!(
                    "v3/historical-chart/{}/{}",
                    interval_segment(timeframe.interval()),
                    ticker
                ),
                &[("from", from.as_str()), ("to", to.as_str())],
            )
            .await?;
        Ok(price_points(bars))
    }
}
