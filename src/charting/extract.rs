//! Metric extraction: one statement field, aligned to chart labels.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::record::{FinancialRecord, Period, StatementField};

/// Unit scale applied to raw statement values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Millions,
    Thousands,
    Percent,
    /// Anything the caller asked for that we don't recognize.
    Unscaled,
}

impl Scale {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Scale::Millions => value / 1_000_000.0,
            Scale::Thousands => value / 1_000.0,
            Scale::Percent => value * 100.0,
            Scale::Unscaled => value,
        }
    }

    pub const fn unit_label(self) -> &'static str {
        match self {
            Scale::Millions => "Millions",
            Scale::Thousands => "Thousands",
            Scale::Percent => "Percent",
            Scale::Unscaled => "",
        }
    }
}

/// A scaled series aligned 1:1 with a label sequence.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MetricSeries {
    pub data: Vec<Option<f64>>,
    pub metric: String,
}

/// Reads `field` out of `records` for every label in `labels`.
///
/// When several records share a label the first one in provider order wins.
/// Labels with no record, and records without the field, produce `None`.
pub fn extract_metric(
    records: &[FinancialRecord],
    labels: &[String],
    field: StatementField,
    period: Period,
    scale: Scale,
) -> MetricSeries {
    let mut by_label: HashMap<String, &FinancialRecord> = HashMap::with_capacity(records.len());
    for record in records {
        by_label
            .entry(period.label_for(record.date))
            .or_insert(record);
    }

    let data = labels
        .iter()
        .map(|label| {
            by_label
                .get(label)
                .and_then(|record| record.get(field))
                .map(|value| scale.apply(value))
        })
        .collect();

    MetricSeries {
        data,
        metric: scale.unit_label().to_string(),
    }
}
