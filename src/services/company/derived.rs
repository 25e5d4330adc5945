//! Snapshot fields computed from the latest annual statements.

use crate::charting::{FinancialRecord, StatementField};

/// Annual records sorted newest first.
fn newest_first(records: &[FinancialRecord]) -> Vec<&FinancialRecord> {
    let mut sorted: Vec<&FinancialRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Value of `field` in the most recent fiscal year.
pub fn latest(records: &[FinancialRecord], field: StatementField) -> Option<f64> {
    newest_first(records).first().and_then(|r| r.get(field))
}

/// `(latest / previous - 1) * 100` over the two most recent fiscal years.
///
/// `None` when either year lacks the field or the previous value is zero.
pub fn growth_yoy(records: &[FinancialRecord], field: StatementField) -> Option<f64> {
    let sorted = newest_first(records);
    let current = sorted.first()?.get(field)?;
    let previous = sorted.get(1)?.get(field)?;
    if previous == 0.0 {
        return None;
    }
    Some((current / previous - 1.0) * 100.0)
}

/// Gross profit over revenue, in percent, for the latest fiscal year.
pub fn gross_margin(income: &[FinancialRecord]) -> Option<f64> {
    let sorted = newest_first(income);
    let record = sorted.first()?;
    let revenue = record.get(StatementField::Revenue)?;
    let gross_profit = record.get(StatementField::GrossProfit)?;
    if revenue == 0.0 {
        return None;
    }
    Some(gross_profit / revenue * 100.0)
}
