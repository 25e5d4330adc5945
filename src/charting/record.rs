//! Normalized financial statement records.
//!
//! Providers map their own payload shapes into [`FinancialRecord`] so the
//! rest of the pipeline never sees provider-specific field names.

use std::collections::HashMap;

use jiff::civil::Date;

/// Statement line items the pipeline knows how to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementField {
    Revenue,
    GrossProfit,
    OperatingExpenses,
    NetIncome,
    Ebitda,
    FreeCashFlow,
    SharesOutstanding,
    CashAndEquivalents,
    TotalDebt,
}

/// Reporting period of a statement, and the bucketing mode of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Quarterly,
    Yearly,
}

/// A single dated statement with whatever line items the provider supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialRecord {
    pub date: Date,
    values: HashMap<StatementField, f64>,
}

impl FinancialRecord {
    pub fn new(date: Date) -> Self {
        Self {
            date,
            values: HashMap::new(),
        }
    }

    /// Builder-style setter, handy when mapping fixed payloads.
    pub fn with(mut self, field: StatementField, value: f64) -> Self {
        self.values.insert(field, value);
        self
    }

    /// Sets a field when the provider reported it. `None` and non-finite
    /// values leave the field absent.
    pub fn set(&mut self, field: StatementField, value: Option<f64>) {
        match value {
            Some(v) if v.is_finite() => {
                self.values.insert(field, v);
            }
            _ => {
                self.values.remove(&field);
            }
        }
    }

    pub fn get(&self, field: StatementField) -> Option<f64> {
        self.values.get(&field).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_set_ignores_missing_and_non_finite() {
        let mut record = FinancialRecord::new(date(2023, 3, 31));
        record.set(StatementField::Revenue, Some(10.0));
        record.set(StatementField::NetIncome, None);
        record.set(StatementField::Ebitda, Some(f64::NAN));

        assert_eq!(record.get(StatementField::Revenue), Some(10.0));
        assert_eq!(record.get(StatementField::NetIncome), None);
        assert_eq!(record.get(StatementField::Ebitda), None);

        record.set(StatementField::Revenue, None);
        assert_eq!(record.get(StatementField::Revenue), None);
    }
}
