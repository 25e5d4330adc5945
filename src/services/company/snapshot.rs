//! The aggregated company payload returned by `GET /company/{ticker}`.

use serde::Serialize;
use utoipa::ToSchema;

use crate::charting::{ChartData, OwnershipBreakdown};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub name: String,
    pub logo_url: Option<String>,
    pub ticker: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub currency_symbol: Option<String>,
    pub exchange: Option<String>,
}

/// Year-over-year growth in percent, from the two latest fiscal years.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
pub struct GrowthMetrics {
    #[serde(rename = "revenueGrowthYoY")]
    pub revenue_growth_yoy: Option<f64>,
    #[serde(rename = "profitsGrowthYoY")]
    pub profits_growth_yoy: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub pe_ratio: Option<f64>,
    pub forward_pe_ratio: Option<f64>,
    pub ps_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Technicals {
    #[serde(rename = "52weekHigh")]
    pub week_52_high: Option<f64>,
    #[serde(rename = "52weekLow")]
    pub week_52_low: Option<f64>,
    pub revenue: Option<f64>,
    pub wall_street_target_price: Option<f64>,
    pub ebitda: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInformation {
    pub ceo: Option<String>,
    pub employees: Option<String>,
    pub headquarters: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub short_interest: Option<f64>,
    pub shares_short: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySnapshot {
    pub company: CompanySummary,
    pub growth_metrics: GrowthMetrics,
    pub valuation: Valuation,
    pub technicals: Technicals,
    pub market_cap: Option<f64>,
    pub dividend: Option<f64>,
    pub gross_margin: Option<f64>,
    /// Statement charts bucketed by quarter, in fixed chart order.
    pub quarterly: Vec<ChartData>,
    /// Statement charts bucketed by fiscal year, in fixed chart order.
    pub yearly: Vec<ChartData>,
    pub company_information: CompanyInformation,
    pub ownership: OwnershipBreakdown,
}
