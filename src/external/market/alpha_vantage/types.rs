//! Alpha Vantage response schemas.
//!
//! Alpha Vantage reports numbers as strings and uses `"None"` for missing
//! values; [`opt_number`] turns both into `Option<f64>`.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Deserializer};

use crate::charting::{FinancialRecord, StatementField};
use crate::external::market::types::{
    CompanyProfile, Fundamentals, KeyMetrics, PeriodRecords, PricePoint,
};

fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("None") | Some("-") => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid number '{}'", s))),
    }
}

fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty() && s != "None"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct AvOverview {
    pub symbol: String,
    pub name: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub exchange: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub official_site: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub full_time_employees: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub market_capitalization: Option<f64>,
    #[serde(rename = "PERatio", default, deserialize_with = "opt_number")]
    pub pe_ratio: Option<f64>,
    #[serde(rename = "ForwardPE", default, deserialize_with = "opt_number")]
    pub forward_pe: Option<f64>,
    #[serde(rename = "PriceToSalesRatioTTM", default, deserialize_with = "opt_number")]
    pub price_to_sales_ratio_ttm: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub price_to_book_ratio: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub dividend_yield: Option<f64>,
    #[serde(rename = "52WeekHigh", default, deserialize_with = "opt_number")]
    pub week_52_high: Option<f64>,
    #[serde(rename = "52WeekLow", default, deserialize_with = "opt_number")]
    pub week_52_low: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub analyst_target_price: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub shares_outstanding: Option<f64>,
}

impl From<AvOverview> for Fundamentals {
    fn from(overview: AvOverview) -> Self {
        Fundamentals {
            profile: overview.profile(),
            metrics: overview.key_metrics(),
            shares_outstanding: overview.shares_outstanding.unwrap_or(0.0),
            price_target: overview.analyst_target_price,
        }
    }
}

impl AvOverview {
    fn profile(&self) -> CompanyProfile {
        CompanyProfile {
            symbol: self.symbol.clone(),
            company_name: self.name.clone(),
            logo_url: None,
            sector: self.sector.clone(),
            industry: self.industry.clone(),
            currency: self.currency.clone(),
            exchange: self.exchange.clone(),
            ceo: None,
            employees: self.full_time_employees.clone(),
            website: self.official_site.clone(),
            // Alpha Vantage reports one pre-joined address line.
            address: self.address.clone(),
            city: None,
            state: None,
            country: None,
            market_cap: self.market_capitalization,
            year_high: self.week_52_high,
            year_low: self.week_52_low,
        }
    }

    fn key_metrics(&self) -> KeyMetrics {
        KeyMetrics {
            pe_ratio: self.pe_ratio,
            forward_pe_ratio: self.forward_pe,
            ps_ratio: self.price_to_sales_ratio_ttm,
            pb_ratio: self.price_to_book_ratio,
            dividend_yield: self.dividend_yield,
        }
    }
}

/// The annual/quarterly envelope shared by the three statement functions.
/// One response carries both periods.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AvReports<T> {
    #[serde(default = "Vec::new")]
    pub annual_reports: Vec<T>,
    #[serde(default = "Vec::new")]
    pub quarterly_reports: Vec<T>,
}

impl<T> AvReports<T>
where
    for<'r> FinancialRecord: From<&'r T>,
{
    pub fn into_records(self) -> PeriodRecords {
        PeriodRecords {
            quarterly: self.quarterly_reports.iter().map(FinancialRecord::from).collect(),
            yearly: self.annual_reports.iter().map(FinancialRecord::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AvIncomeReport {
    pub fiscal_date_ending: Date,
    #[serde(default, deserialize_with = "opt_number")]
    pub total_revenue: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub gross_profit: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub operating_expenses: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub net_income: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub ebitda: Option<f64>,
}

impl From<&AvIncomeReport> for FinancialRecord {
    fn from(r: &AvIncomeReport) -> Self {
        let mut record = FinancialRecord::new(r.fiscal_date_ending);
        record.set(StatementField::Revenue, r.total_revenue);
        record.set(StatementField::GrossProfit, r.gross_profit);
        record.set(StatementField::OperatingExpenses, r.operating_expenses);
        record.set(StatementField::NetIncome, r.net_income);
        record.set(StatementField::Ebitda, r.ebitda);
        record
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AvCashFlowReport {
    pub fiscal_date_ending: Date,
    #[serde(default, deserialize_with = "opt_number")]
    pub operating_cashflow: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub capital_expenditures: Option<f64>,
}

impl From<&AvCashFlowReport> for FinancialRecord {
    fn from(r: &AvCashFlowReport) -> Self {
        let mut record = FinancialRecord::new(r.fiscal_date_ending);
        let free_cash_flow = match (r.operating_cashflow, r.capital_expenditures) {
            (Some(operating), Some(capex)) => Some(operating - capex),
            _ => None,
        };
        record.set(StatementField::FreeCashFlow, free_cash_flow);
        record
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AvBalanceReport {
    pub fiscal_date_ending: Date,
    #[serde(default, deserialize_with = "opt_number")]
    pub cash_and_cash_equivalents_at_carrying_value: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub short_long_term_debt_total: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub common_stock_shares_outstanding: Option<f64>,
}

impl From<&AvBalanceReport> for FinancialRecord {
    fn from(r: &AvBalanceReport) -> Self {
        let mut record = FinancialRecord::new(r.fiscal_date_ending);
        record.set(
            StatementField::CashAndEquivalents,
            r.cash_and_cash_equivalents_at_carrying_value,
        );
        record.set(StatementField::TotalDebt, r.short_long_term_debt_total);
        record.set(
            StatementField::SharesOutstanding,
            r.common_stock_shares_outstanding,
        );
        record
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AvBar {
    #[serde(rename = "4. close")]
    pub close: String,
}

/// Time series bodies key their bars under `"Time Series (Daily)"` or
/// `"Time Series (15min)"`; `series_key` selects which one.
pub(super) fn price_points(
    body: &serde_json::Value,
    series_key: &str,
    from: &str,
) -> Result<Vec<PricePoint>, String> {
    let series = body
        .get(series_key)
        .ok_or_else(|| format!("missing '{}'", series_key))?;
    let bars: BTreeMap<String, AvBar> =
        serde_json::from_value(series.clone()).map_err(|e| e.to_string())?;

    bars.into_iter()
        .filter(|(timestamp, _)| timestamp.as_str() >= from)
        .map(|(timestamp, bar)| {
            bar.close
                .trim()
                .parse::<f64>()
                .map(|close| PricePoint {
                    date: timestamp.clone(),
                    close,
                })
                .map_err(|_| format!("invalid close '{}' at {}", bar.close, timestamp))
        })
        .collect()
}
