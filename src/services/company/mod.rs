//! Company snapshot aggregation.

mod derived;
mod snapshot;

pub use snapshot::{
    CompanyInformation, CompanySnapshot, CompanySummary, GrowthMetrics, Technicals, Valuation,
};

use std::sync::Arc;

use crate::charting::{Period, StatementField, build_statement_charts, ownership_breakdown};
use crate::error::{AppError, AppResult};
use crate::external::market::{Fundamentals, MarketDataProvider};

/// Longest ticker accepted, exchange suffix included.
const MAX_TICKER_LEN: usize = 12;

/// Trims and upper-cases a ticker, rejecting anything that is not a plain
/// symbol such as `AAPL`, `BRK.B` or `RDS-A`.
pub fn normalize_ticker(raw: &str) -> AppResult<String> {
    let ticker = raw.trim().to_ascii_uppercase();
    let valid = !ticker.is_empty()
        && ticker.len() <= MAX_TICKER_LEN
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if valid {
        Ok(ticker)
    } else {
        Err(AppError::BadRequest {
            message: format!("Invalid ticker '{}'", raw),
        })
    }
}

/// Builds [`CompanySnapshot`]s from the configured provider.
#[derive(Clone)]
pub struct CompanyService {
    provider: Arc<dyn MarketDataProvider>,
}

impl CompanyService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetches everything the snapshot needs concurrently and composes it.
    ///
    /// Any failed upstream call fails the whole snapshot.
    pub async fn snapshot(&self, ticker: &str) -> AppResult<CompanySnapshot> {
        let ticker = normalize_ticker(ticker)?;
        let p = self.provider.as_ref();
        let t = ticker.as_str();

        tracing::debug!(ticker = t, provider = p.name(), "Fetching company data");

        let (fundamentals, financials, holders) = tokio::try_join!(
            p.fundamentals(t),
            p.financials(t),
            p.institutional_holders(t),
        )
        .inspect_err(|e| {
            tracing::error!(ticker = t, provider = p.name(), error = ?e, "Company data fetch failed");
        })?;

        let Fundamentals {
            profile,
            metrics,
            shares_outstanding,
            price_target,
        } = fundamentals;
        let income_y = &financials.income.yearly;
        let quarterly =
            build_statement_charts(financials.statement_set(Period::Quarterly), Period::Quarterly);
        let yearly =
            build_statement_charts(financials.statement_set(Period::Yearly), Period::Yearly);

        Ok(CompanySnapshot {
            company: CompanySummary {
                name: profile.company_name.clone(),
                logo_url: profile.logo_url.clone(),
                ticker: profile.symbol.clone(),
                sector: profile.sector.clone(),
                industry: profile.industry.clone(),
                currency_symbol: profile.currency.clone(),
                exchange: profile.exchange.clone(),
            },
            growth_metrics: GrowthMetrics {
                revenue_growth_yoy: derived::growth_yoy(income_y, StatementField::Revenue),
                profits_growth_yoy: derived::growth_yoy(income_y, StatementField::NetIncome),
            },
            valuation: Valuation {
                pe_ratio: metrics.pe_ratio,
                forward_pe_ratio: metrics.forward_pe_ratio,
                ps_ratio: metrics.ps_ratio,
                pb_ratio: metrics.pb_ratio,
            },
            technicals: Technicals {
                week_52_high: profile.year_high,
                week_52_low: profile.year_low,
                revenue: derived::latest(income_y, StatementField::Revenue),
                wall_street_target_price: price_target,
                ebitda: derived::latest(income_y, StatementField::Ebitda),
            },
            market_cap: profile.market_cap,
            dividend: metrics.dividend_yield,
            gross_margin: derived::gross_margin(income_y),
            quarterly,
            yearly,
            company_information: CompanyInformation {
                ceo: profile.ceo.clone(),
                employees: profile.employees.clone(),
                headquarters: profile.headquarters(),
                industry: profile.industry.clone(),
                website: profile.website.clone(),
                short_interest: None,
                shares_short: None,
            },
            ownership: ownership_breakdown(&holders, shares_outstanding),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker(" aapl ").unwrap(), "AAPL");
        assert_eq!(normalize_ticker("brk.b").unwrap(), "BRK.B");
        assert!(matches!(normalize_ticker(""), Err(AppError::BadRequest { .. })));
        assert!(matches!(normalize_ticker("AA PL"), Err(AppError::BadRequest { .. })));
        assert!(normalize_ticker("../etc").is_err());
    }
}
