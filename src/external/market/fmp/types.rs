//! Financial Modeling Prep response schemas.
//!
//! Only the fields the service reads are declared. Required fields are plain
//! types so a payload without them fails to decode.

use jiff::civil::Date;
use serde::Deserialize;

use crate::charting::{FinancialRecord, InstitutionalHolder, StatementField};
use crate::external::market::types::{CompanyProfile, KeyMetrics, PricePoint};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FmpProfile {
    pub symbol: String,
    pub company_name: String,
    pub image: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub currency: Option<String>,
    pub exchange_short_name: Option<String>,
    pub ceo: Option<String>,
    pub full_time_employees: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub mkt_cap: Option<f64>,
    /// 52-week range, formatted `"low-high"`.
    pub range: Option<String>,
}

/// Splits `"164.08-199.62"` into `(low, high)`.
fn parse_range(range: &str) -> (Option<f64>, Option<f64>) {
    match range.split_once('-') {
        Some((low, high)) => (low.trim().parse().ok(), high.trim().parse().ok()),
        None => (None, None),
    }
}

impl From<FmpProfile> for CompanyProfile {
    fn from(p: FmpProfile) -> Self {
        let (year_low, year_high) = p.range.as_deref().map(parse_range).unwrap_or((None, None));
        CompanyProfile {
            symbol: p.symbol,
            company_name: p.company_name,
            logo_url: p.image,
            sector: p.sector,
            industry: p.industry,
            currency: p.currency,
            exchange: p.exchange_short_name,
            ceo: p.ceo,
            employees: p.full_time_employees,
            website: p.website,
            address: p.address,
            city: p.city,
            state: p.state,
            country: p.country,
            market_cap: p.mkt_cap,
            year_high,
            year_low,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FmpIncomeStatement {
    pub date: Date,
    pub revenue: Option<f64>,
    pub gross_profit: Option<f64>,
    pub operating_expenses: Option<f64>,
    pub net_income: Option<f64>,
    pub ebitda: Option<f64>,
    pub weighted_average_shs_out: Option<f64>,
}

impl From<&FmpIncomeStatement> for FinancialRecord {
    fn from(s: &FmpIncomeStatement) -> Self {
        let mut record = FinancialRecord::new(s.date);
        record.set(StatementField::Revenue, s.revenue);
        record.set(StatementField::GrossProfit, s.gross_profit);
        record.set(StatementField::OperatingExpenses, s.operating_expenses);
        record.set(StatementField::NetIncome, s.net_income);
        record.set(StatementField::Ebitda, s.ebitda);
        record
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FmpCashFlowStatement {
    pub date: Date,
    pub free_cash_flow: Option<f64>,
}

impl From<&FmpCashFlowStatement> for FinancialRecord {
    fn from(s: &FmpCashFlowStatement) -> Self {
        let mut record = FinancialRecord::new(s.date);
        record.set(StatementField::FreeCashFlow, s.free_cash_flow);
        record
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FmpBalanceSheet {
    pub date: Date,
    pub cash_and_cash_equivalents: Option<f64>,
    pub total_debt: Option<f64>,
}

/// FMP balance sheets carry no share count, so it is taken from the
/// income statement with the same date.
pub(super) fn balance_records(
    sheets: &[FmpBalanceSheet],
    income: &[FmpIncomeStatement],
) -> Vec<FinancialRecord> {
    sheets
        .iter()
        .map(|s| {
            let mut record = FinancialRecord::new(s.date);
            record.set(StatementField::CashAndEquivalents, s.cash_and_cash_equivalents);
            record.set(StatementField::TotalDebt, s.total_debt);
            let shares = income
                .iter()
                .find(|i| i.date == s.date)
                .and_then(|i| i.weighted_average_shs_out);
            record.set(StatementField::SharesOutstanding, shares);
            record
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FmpKeyMetricsTtm {
    #[serde(rename = "peRatioTTM")]
    pub pe_ratio_ttm: Option<f64>,
    #[serde(rename = "priceToSalesRatioTTM")]
    pub price_to_sales_ratio_ttm: Option<f64>,
    #[serde(rename = "pbRatioTTM")]
    pub pb_ratio_ttm: Option<f64>,
    #[serde(rename = "dividendYieldTTM")]
    pub dividend_yield_ttm: Option<f64>,
}

impl From<FmpKeyMetricsTtm> for KeyMetrics {
    fn from(m: FmpKeyMetricsTtm) -> Self {
        KeyMetrics {
            pe_ratio: m.pe_ratio_ttm,
            forward_pe_ratio: None,
            ps_ratio: m.price_to_sales_ratio_ttm,
            pb_ratio: m.pb_ratio_ttm,
            dividend_yield: m.dividend_yield_ttm,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct FmpInstitutionalHolder {
    pub holder: String,
    pub shares: f64,
}

impl From<FmpInstitutionalHolder> for InstitutionalHolder {
    fn from(h: FmpInstitutionalHolder) -> Self {
        InstitutionalHolder {
            name: h.holder,
            shares: h.shares,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FmpSharesFloat {
    pub outstanding_shares: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FmpPriceTargetConsensus {
    pub target_consensus: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FmpHistoricalBar {
    pub date: String,
    pub close: f64,
}

/// FMP returns bars newest first; the chart wants them oldest first.
pub(super) fn price_points(mut bars: Vec<FmpHistoricalBar>) -> Vec<PricePoint> {
    bars.sort_by(|a, b| a.date.cmp(&b.date));
    bars.into_iter()
        .map(|b| PricePoint {
            date: b.date,
            close: b.close,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use serde_json::json;

    #[test]
    fn test_profile_maps_range_into_52_week_bounds() {
        let raw: FmpProfile = serde_json::from_value(json!({
            "symbol": "AAPL",
            "companyName": "Apple Inc.",
            "image": "https://images.example/AAPL.png",
            "exchangeShortName": "NASDAQ",
            "range": "164.08-199.62",
            "mktCap": 3000000000000u64,
            "fullTimeEmployees": "161000"
        }))
        .unwrap();
        let profile = CompanyProfile::from(raw);

        assert_eq!(profile.exchange.as_deref(), Some("NASDAQ"));
        assert_eq!(profile.year_low, Some(164.08));
        assert_eq!(profile.year_high, Some(199.62));
        assert_eq!(profile.market_cap, Some(3.0e12));
        assert_eq!(profile.sector, None);
    }

    #[test]
    fn test_profile_without_company_name_is_rejected() {
        let result: Result<FmpProfile, _> = serde_json::from_value(json!({"symbol": "AAPL"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_statement_without_date_is_rejected() {
        let result: Result<FmpIncomeStatement, _> =
            serde_json::from_value(json!({"revenue": 1.0}));
        assert!(result.is_err());
    }

    #[test]
    fn test_income_null_fields_stay_absent() {
        let raw: FmpIncomeStatement = serde_json::from_value(json!({
            "date": "2023-09-30",
            "revenue": 383285000000u64,
            "netIncome": null
        }))
        .unwrap();
        let record = FinancialRecord::from(&raw);
        assert_eq!(record.date, date(2023, 9, 30));
        assert_eq!(record.get(StatementField::Revenue), Some(383_285_000_000.0));
        assert_eq!(record.get(StatementField::NetIncome), None);
    }

    #[test]
    fn test_balance_takes_shares_from_matching_income_date() {
        let sheets: Vec<FmpBalanceSheet> = serde_json::from_value(json!([
            {"date": "2023-09-30", "cashAndCashEquivalents": 29965000000u64, "totalDebt": 111088000000u64},
            {"date": "2022-09-24", "cashAndCashEquivalents": 23646000000u64, "totalDebt": 120069000000u64}
        ]))
        .unwrap();
        let income: Vec<FmpIncomeStatement> = serde_json::from_value(json!([
            {"date": "2023-09-30", "weightedAverageShsOut": 15744231000u64}
        ]))
        .unwrap();

        let records = balance_records(&sheets, &income);
        assert_eq!(records[0].get(StatementField::SharesOutstanding), Some(15_744_231_000.0));
        assert_eq!(records[1].get(StatementField::SharesOutstanding), None);
        assert_eq!(records[1].get(StatementField::TotalDebt), Some(120_069_000_000.0));
    }

    #[test]
    fn test_price_points_are_sorted_oldest_first() {
        let bars: Vec<FmpHistoricalBar> = serde_json::from_value(json!([
            {"date": "2024-01-03", "close": 184.25},
            {"date": "2024-01-02", "close": 185.64}
        ]))
        .unwrap();
        let points = price_points(bars);
        assert_eq!(points[0].date, "2024-01-02");
        assert_eq!(points[1].close, 184.25);
    }

    #[test]
    fn test_parse_range_handles_garbage() {
        assert_eq!(parse_range("n/a"), (None, None));
        assert_eq!(parse_range("1.5-x"), (Some(1.5), None));
    }
}
