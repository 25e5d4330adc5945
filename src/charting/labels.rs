//! Period label generation.
//!
//! Providers return statements newest first. Charts want them oldest first,
//! bounded to a minimum year so quarterly charts stay readable.

use jiff::civil::Date;

use super::record::{FinancialRecord, Period};

/// Earliest year shown on quarterly charts.
pub const QUARTERLY_MIN_YEAR: i16 = 2019;

/// Earliest year shown on yearly charts.
pub const YEARLY_MIN_YEAR: i16 = 2004;

impl Period {
    /// Minimum (inclusive) calendar year kept for this bucketing mode.
    pub const fn min_year(self) -> i16 {
        match self {
            Period::Quarterly => QUARTERLY_MIN_YEAR,
            Period::Yearly => YEARLY_MIN_YEAR,
        }
    }

    /// Bucket label for a statement date: `Q1'23` or `2023`.
    pub fn label_for(self, date: Date) -> String {
        match self {
            Period::Quarterly => {
                let quarter = (date.month() + 2) / 3;
                let short_year = i32::from(date.year()).rem_euclid(100);
                format!("Q{}'{:02}", quarter, short_year)
            }
            Period::Yearly => date.year().to_string(),
        }
    }

    /// Whether a statement dated `date` falls inside the chart window.
    pub fn includes(self, date: Date) -> bool {
        date.year() >= self.min_year()
    }
}

/// Produces chart labels from provider-ordered records.
///
/// The output is reversed relative to the input (oldest first) and keeps one
/// label per record that passes the year filter. Duplicate labels are kept
/// so the label count always matches the filtered record count.
pub fn generate_labels(records: &[FinancialRecord], period: Period) -> Vec<String> {
    records
        .iter()
        .rev()
        .filter(|record| period.includes(record.date))
        .map(|record| period.label_for(record.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use proptest::prelude::*;

    fn records(dates: &[Date]) -> Vec<FinancialRecord> {
        dates.iter().copied().map(FinancialRecord::new).collect()
    }

    #[test]
    fn test_quarterly_labels() {
        assert_eq!(Period::Quarterly.label_for(date(2023, 3, 31)), "Q1'23");
        assert_eq!(Period::Quarterly.label_for(date(2023, 4, 1)), "Q2'23");
        assert_eq!(Period::Quarterly.label_for(date(2023, 9, 30)), "Q3'23");
        assert_eq!(Period::Quarterly.label_for(date(2020, 12, 31)), "Q4'20");
        assert_eq!(Period::Quarterly.label_for(date(2005, 1, 15)), "Q1'05");
    }

    #[test]
    fn test_yearly_labels() {
        assert_eq!(Period::Yearly.label_for(date(2023, 12, 31)), "2023");
        assert_eq!(Period::Yearly.label_for(date(2004, 6, 30)), "2004");
    }

    #[test]
    fn test_labels_are_reversed_oldest_first() {
        let input = records(&[date(2023, 6, 30), date(2023, 3, 31)]);
        assert_eq!(
            generate_labels(&input, Period::Quarterly),
            vec!["Q1'23".to_string(), "Q2'23".to_string()]
        );
    }

    #[test]
    fn test_quarterly_filter_drops_pre_2019() {
        let input = records(&[date(2019, 3, 31), date(2018, 12, 31), date(2018, 9, 30)]);
        assert_eq!(generate_labels(&input, Period::Quarterly), vec!["Q1'19"]);
    }

    #[test]
    fn test_yearly_min_year_is_inclusive() {
        assert!(Period::Yearly.includes(date(2004, 1, 1)));
        assert!(!Period::Yearly.includes(date(2003, 12, 31)));

        let input = records(&[date(2005, 12, 31), date(2004, 1, 1), date(2003, 12, 31)]);
        assert_eq!(generate_labels(&input, Period::Yearly), vec!["2004", "2005"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_labels(&[], Period::Yearly).is_empty());
    }

    fn arb_date() -> impl Strategy<Value = Date> {
        (1995i16..=2030, 1i8..=12, 1i8..=28).prop_map(|(y, m, d)| date(y, m, d))
    }

    proptest! {
        #[test]
        fn prop_label_count_matches_filtered_records(
            dates in proptest::collection::vec(arb_date(), 0..40),
            quarterly in any::<bool>(),
        ) {
            let period = if quarterly { Period::Quarterly } else { Period::Yearly };
            let input = records(&dates);
            let labels = generate_labels(&input, period);

            let expected: Vec<String> = dates
                .iter()
                .rev()
                .filter(|d| d.year() >= period.min_year())
                .map(|d| period.label_for(*d))
                .collect();
            prop_assert_eq!(&labels, &expected);
        }

        #[test]
        fn prop_labels_are_deterministic(dates in proptest::collection::vec(arb_date(), 0..20)) {
            let input = records(&dates);
            prop_assert_eq!(
                generate_labels(&input, Period::Quarterly),
                generate_labels(&input, Period::Quarterly)
            );
        }
    }
}
