use std::fmt;
use std::str::FromStr;

use jiff::ToSpan;
use jiff::civil::{Date, date};

use crate::charting::{FinancialRecord, Period, StatementSet};

/// Company profile fields shared by every provider.
///
/// `symbol` and `company_name` are always present; everything else is
/// whatever the provider reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyProfile {
    pub symbol: String,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub ceo: Option<String>,
    pub employees: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub market_cap: Option<f64>,
    pub year_high: Option<f64>,
    pub year_low: Option<f64>,
}

impl CompanyProfile {
    /// Address parts joined with `", "`, skipping blanks.
    pub fn headquarters(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.address, &self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Trailing valuation ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyMetrics {
    pub pe_ratio: Option<f64>,
    pub forward_pe_ratio: Option<f64>,
    pub ps_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
}

/// Everything a provider reports about the company itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fundamentals {
    pub profile: CompanyProfile,
    pub metrics: KeyMetrics,
    /// Total shares outstanding, zero when the provider does not know.
    pub shares_outstanding: f64,
    /// Analyst consensus price target.
    pub price_target: Option<f64>,
}

/// One statement in both reporting periods, each newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodRecords {
    pub quarterly: Vec<FinancialRecord>,
    pub yearly: Vec<FinancialRecord>,
}

impl PeriodRecords {
    pub fn period(&self, period: Period) -> &[FinancialRecord] {
        match period {
            Period::Quarterly => &self.quarterly,
            Period::Yearly => &self.yearly,
        }
    }
}

/// The three statements behind the snapshot charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Financials {
    pub income: PeriodRecords,
    pub cash_flow: PeriodRecords,
    pub balance_sheet: PeriodRecords,
}

impl Financials {
    pub fn statement_set(&self, period: Period) -> StatementSet<'_> {
        StatementSet {
            income: self.income.period(period),
            cash_flow: self.cash_flow.period(period),
            balance: self.balance_sheet.period(period),
        }
    }
}

/// One closing price. `date` is the provider's own timestamp string, which
/// sorts chronologically for both providers.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
}

/// Bar width requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarInterval {
    FifteenMinutes,
    Daily,
}

/// Window of the historical price chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    ThreeMonths,
    YearToDate,
    #[default]
    OneYear,
    ThreeYears,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::ThreeMonths,
        Timeframe::YearToDate,
        Timeframe::OneYear,
        Timeframe::ThreeYears,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Timeframe::ThreeMonths => "3m",
            Timeframe::YearToDate => "ytd",
            Timeframe::OneYear => "1y",
            Timeframe::ThreeYears => "3y",
        }
    }

    /// Dataset label shown on the chart.
    pub const fn label(self) -> &'static str {
        match self {
            Timeframe::ThreeMonths => "3 Months",
            Timeframe::YearToDate => "Year to Date",
            Timeframe::OneYear => "1 Year",
            Timeframe::ThreeYears => "3 Years",
        }
    }

    pub const fn interval(self) -> BarInterval {
        match self {
            Timeframe::ThreeMonths => BarInterval::FifteenMinutes,
            _ => BarInterval::Daily,
        }
    }

    /// First day of the window. Month arithmetic clamps to the last valid
    /// day, so May 31 minus three months is Feb 28 (or 29).
    pub fn start_date(self, today: Date) -> Date {
        match self {
            Timeframe::ThreeMonths => today.saturating_sub(3.months()),
            Timeframe::YearToDate => date(today.year(), 1, 1),
            Timeframe::OneYear => today.saturating_sub(1.year()),
            Timeframe::ThreeYears => today.saturating_sub(3.years()),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Invalid timeframe '{}'. Expected one of: 3m, ytd, 1y, 3y", s)
            })
    }
}
