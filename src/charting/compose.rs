//! Chart assembly.
//!
//! The chart set for a statement period is a static table. [`build_statement_charts`]
//! walks it and runs the extractor for every series.

use serde::Serialize;
use utoipa::ToSchema;

use super::extract::{MetricSeries, Scale, extract_metric};
use super::labels::generate_labels;
use super::record::{FinancialRecord, Period, StatementField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeriesColor {
    Grey,
    Blue,
    Green,
    Red,
    Purple,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Dataset {
    pub data: Vec<Option<f64>>,
    pub label: String,
    pub color: SeriesColor,
}

/// Chart-ready payload consumed by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub label: String,
    pub chart_type: ChartKind,
    pub datasets: Vec<Dataset>,
    pub metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_x_axis: Option<bool>,
}

/// Assembles extracted series into a chart. The unit comes from the first
/// series; an empty series list yields an empty unit.
pub fn compose_chart(
    labels: Vec<String>,
    title: &str,
    kind: ChartKind,
    series: Vec<(MetricSeries, &str, SeriesColor)>,
) -> ChartData {
    let metric = series
        .first()
        .map(|(s, _, _)| s.metric.clone())
        .unwrap_or_default();

    let datasets = series
        .into_iter()
        .map(|(s, name, color)| Dataset {
            data: s.data,
            label: name.to_string(),
            color,
        })
        .collect();

    ChartData {
        labels,
        label: title.to_string(),
        chart_type: kind,
        datasets,
        metric,
        stacked: None,
        show_x_axis: None,
    }
}

/// Which statement a chart series reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementSource {
    Income,
    CashFlow,
    Balance,
}

pub struct SeriesSpec {
    pub source: StatementSource,
    pub field: StatementField,
    pub name: &'static str,
    pub color: SeriesColor,
}

pub struct ChartSpec {
    pub title: &'static str,
    pub kind: ChartKind,
    pub series: &'static [SeriesSpec],
}

pub const STATEMENT_CHARTS: &[ChartSpec] = &[
    ChartSpec {
        title: "Net Income",
        kind: ChartKind::Bar,
        series: &[SeriesSpec {
            source: StatementSource::Income,
            field: StatementField::NetIncome,
            name: "Net Income",
            color: SeriesColor::Grey,
        }],
    },
    ChartSpec {
        title: "Total Revenue",
        kind: ChartKind::Bar,
        series: &[SeriesSpec {
            source: StatementSource::Income,
            field: StatementField::Revenue,
            name: "Total Revenue",
            color: SeriesColor::Blue,
        }],
    },
    ChartSpec {
        title: "Free Cash Flow",
        kind: ChartKind::Bar,
        series: &[SeriesSpec {
            source: StatementSource::CashFlow,
            field: StatementField::FreeCashFlow,
            name: "Free Cash Flow",
            color: SeriesColor::Green,
        }],
    },
    ChartSpec {
        title: "Shares Outstanding",
        kind: ChartKind::Bar,
        series: &[SeriesSpec {
            source: StatementSource::Balance,
            field: StatementField::SharesOutstanding,
            name: "Shares Outstanding",
            color: SeriesColor::Red,
        }],
    },
    ChartSpec {
        title: "Cash vs Debt",
        kind: ChartKind::Bar,
        series: &[
            SeriesSpec {
                source: StatementSource::Balance,
                field: StatementField::CashAndEquivalents,
                name: "Cash",
                color: SeriesColor::Green,
            },
            SeriesSpec {
                source: StatementSource::Balance,
                field: StatementField::TotalDebt,
                name: "Debt",
                color: SeriesColor::Red,
            },
        ],
    },
    ChartSpec {
        title: "Operating Leverage",
        kind: ChartKind::Line,
        series: &[
            SeriesSpec {
                source: StatementSource::Income,
                field: StatementField::Revenue,
                name: "Revenue",
                color: SeriesColor::Blue,
            },
            SeriesSpec {
                source: StatementSource::Income,
                field: StatementField::OperatingExpenses,
                name: "Operating Expenses",
                color: SeriesColor::Purple,
            },
        ],
    },
];

/// The three statement lists of one reporting period.
#[derive(Debug, Clone, Copy)]
pub struct StatementSet<'a> {
    pub income: &'a [FinancialRecord],
    pub cash_flow: &'a [FinancialRecord],
    pub balance: &'a [FinancialRecord],
}

impl<'a> StatementSet<'a> {
    fn source(&self, source: StatementSource) -> &'a [FinancialRecord] {
        match source {
            StatementSource::Income => self.income,
            StatementSource::CashFlow => self.cash_flow,
            StatementSource::Balance => self.balance,
        }
    }

    /// Labels come from the first statement list that has any records.
    pub fn labels(&self, period: Period) -> Vec<String> {
        [self.income, self.cash_flow, self.balance]
            .into_iter()
            .find(|records| !records.is_empty())
            .map(|records| generate_labels(records, period))
            .unwrap_or_default()
    }
}

/// Builds every chart in [`STATEMENT_CHARTS`], in table order.
pub fn build_statement_charts(statements: StatementSet<'_>, period: Period) -> Vec<ChartData> {
    let labels = statements.labels(period);

    STATEMENT_CHARTS
        .iter()
        .map(|chart| {
            let series = chart
                .series
                .iter()
                .map(|spec| {
                    let extracted = extract_metric(
                        statements.source(spec.source),
                        &labels,
                        spec.field,
                        period,
                        Scale::Millions,
                    );
                    (extracted, spec.name, spec.color)
                })
                .collect();
            compose_chart(labels.clone(), chart.title, chart.kind, series)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn income() -> Vec<FinancialRecord> {
        vec![
            FinancialRecord::new(date(2023, 6, 30))
                .with(StatementField::NetIncome, 7_000_000.0)
                .with(StatementField::Revenue, 30_000_000.0)
                .with(StatementField::OperatingExpenses, 10_000_000.0),
            FinancialRecord::new(date(2023, 3, 31))
                .with(StatementField::NetIncome, 5_000_000.0)
                .with(StatementField::Revenue, 20_000_000.0),
        ]
    }

    #[test]
    fn test_compose_uses_first_series_unit() {
        let chart = compose_chart(
            vec!["2023".into()],
            "Cash vs Debt",
            ChartKind::Bar,
            vec![
                (
                    MetricSeries {
                        data: vec![Some(1.0)],
                        metric: "Millions".into(),
                    },
                    "Cash",
                    SeriesColor::Green,
                ),
                (
                    MetricSeries {
                        data: vec![None],
                        metric: "Thousands".into(),
                    },
                    "Debt",
                    SeriesColor::Red,
                ),
            ],
        );
        assert_eq!(chart.metric, "Millions");
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.datasets[1].label, "Debt");
    }

    #[test]
    fn test_chart_serializes_camel_case_and_skips_unset_flags() {
        let chart = compose_chart(vec![], "Net Income", ChartKind::Bar, vec![]);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["chartType"], "bar");
        assert_eq!(json["metric"], "");
        assert!(json.get("stacked").is_none());
        assert!(json.get("showXAxis").is_none());
    }

    #[test]
    fn test_statement_charts_follow_table() {
        let income = income();
        let set = StatementSet {
            income: &income,
            cash_flow: &[],
            balance: &[],
        };
        let charts = build_statement_charts(set, Period::Quarterly);
        assert_eq!(charts.len(), STATEMENT_CHARTS.len());

        let titles: Vec<&str> = charts.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Net Income",
                "Total Revenue",
                "Free Cash Flow",
                "Shares Outstanding",
                "Cash vs Debt",
                "Operating Leverage"
            ]
        );

        let net_income = &charts[0];
        assert_eq!(net_income.labels, vec!["Q1'23", "Q2'23"]);
        assert_eq!(net_income.datasets[0].data, vec![Some(5.0), Some(7.0)]);
        assert_eq!(net_income.datasets[0].color, SeriesColor::Grey);

        let leverage = &charts[5];
        assert_eq!(leverage.chart_type, ChartKind::Line);
        assert_eq!(leverage.datasets[1].data, vec![None, Some(10.0)]);

        // No balance data: series stay aligned to income labels, all null.
        let cash_debt = &charts[4];
        assert_eq!(cash_debt.datasets[0].data, vec![None, None]);
    }

    #[test]
    fn test_labels_fall_back_to_next_non_empty_statement() {
        let cash = vec![FinancialRecord::new(date(2022, 12, 31))];
        let set = StatementSet {
            income: &[],
            cash_flow: &cash,
            balance: &[],
        };
        assert_eq!(set.labels(Period::Yearly), vec!["2022"]);

        let empty = StatementSet {
            income: &[],
            cash_flow: &[],
            balance: &[],
        };
        assert!(empty.labels(Period::Yearly).is_empty());
    }
}
