use std::collections::BTreeSet;

use crate::domain::{month_name, MonthlyRecord};

/// Synthetic total row appended to every filtered table view.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub total_meter_reading: f64,
    pub total_consumption: f64,
}

impl SummaryRow {
    pub const YEAR_LABEL: &'static str = "Summe";

    fn over<'a>(records: impl IntoIterator<Item = &'a MonthlyRecord>) -> Self {
        records.into_iter().fold(
            Self {
                total_meter_reading: 0.0,
                total_consumption: 0.0,
            },
            |acc, r| Self {
                total_meter_reading: acc.total_meter_reading + r.meter_reading_or_zero(),
                total_consumption: acc.total_consumption + r.consumption_or_zero(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    Record(MonthlyRecord),
    Summary(SummaryRow),
}

impl TableRow {
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary(_))
    }

    pub fn as_record(&self) -> Option<&MonthlyRecord> {
        match self {
            Self::Record(r) => Some(r),
            Self::Summary(_) => None,
        }
    }
}

/// A month offered as a filter choice.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MonthOption {
    pub month: i32,
    pub label: String,
}

/// Narrow `records` to `year` (and `month`, if given), order by month and
/// append one [`SummaryRow`] totalling the matching rows.
///
/// The summary row is always present, with zero totals when nothing matches.
pub fn filter_and_summarize(
    records: &[MonthlyRecord],
    year: i32,
    month: Option<i32>,
) -> Vec<TableRow> {
    let mut matching: Vec<&MonthlyRecord> = records
        .iter()
        .filter(|r| r.year == year)
        .filter(|r| month.map_or(true, |m| r.month == m))
        .collect();
    matching.sort_by_key(|r| r.month);

    let summary = SummaryRow::over(matching.iter().copied());

    let mut rows = Vec::with_capacity(matching.len() + 1);
    rows.extend(matching.into_iter().cloned().map(TableRow::Record));
    rows.push(TableRow::Summary(summary));
    rows
}

pub fn distinct_years(records: &[MonthlyRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn distinct_months(records: &[MonthlyRecord]) -> Vec<MonthOption> {
    records
        .iter()
        .map(|r| r.month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|month| MonthOption {
            month,
            label: month_name(month).into_owned(),
        })
        .collect()
}

/// Latest year present in the snapshot; `None` means there is nothing to show.
pub fn default_year(records: &[MonthlyRecord]) -> Option<i32> {
    records.iter().map(|r| r.year).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, month: i32, meter_reading: f64, consumption: f64) -> MonthlyRecord {
        MonthlyRecord {
            id: None,
            year,
            month,
            meter_reading: Some(meter_reading),
            consumption: Some(consumption),
        }
    }

    fn sample() -> Vec<MonthlyRecord> {
        vec![
            rec(2024, 1, 100.0, 10.0),
            rec(2024, 2, 120.0, 20.0),
            rec(2023, 1, 80.0, 8.0),
        ]
    }

    fn summary(rows: &[TableRow]) -> &SummaryRow {
        match rows.last() {
            Some(TableRow::Summary(s)) => s,
            other => panic!("expected trailing summary row, got {other:?}"),
        }
    }

    #[test]
    fn filters_year_and_appends_totals() {
        let rows = filter_and_summarize(&sample(), 2024, None);

        assert_eq!(rows.len(), 3);
        let months: Vec<i32> = rows
            .iter()
            .filter_map(|r| r.as_record())
            .map(|r| r.month)
            .collect();
        assert_eq!(months, vec![1, 2]);
        assert_eq!(
            summary(&rows),
            &SummaryRow {
                total_meter_reading: 220.0,
                total_consumption: 30.0,
            }
        );
    }

    #[test]
    fn output_is_sorted_by_month_with_summary_last() {
        let records = vec![
            rec(2022, 9, 1.0, 1.0),
            rec(2022, 3, 1.0, 1.0),
            rec(2022, 12, 1.0, 1.0),
            rec(2021, 1, 1.0, 1.0),
            rec(2022, 1, 1.0, 1.0),
        ];

        let rows = filter_and_summarize(&records, 2022, None);

        let months: Vec<i32> = rows
            .iter()
            .filter_map(|r| r.as_record())
            .map(|r| r.month)
            .collect();
        assert_eq!(months, vec![1, 3, 9, 12]);
        assert_eq!(rows.iter().filter(|r| r.is_summary()).count(), 1);
        assert!(rows.last().is_some_and(TableRow::is_summary));
        assert_eq!(summary(&rows).total_consumption, 4.0);
    }

    #[test]
    fn month_filter_keeps_only_exact_matches() {
        let mut records = sample();
        records.push(rec(2024, 2, 5.0, 1.5));

        let rows = filter_and_summarize(&records, 2024, Some(2));

        assert_eq!(rows.len(), 3);
        assert!(rows
            .iter()
            .filter_map(|r| r.as_record())
            .all(|r| r.year == 2024 && r.month == 2));
        assert_eq!(summary(&rows).total_meter_reading, 125.0);
        assert_eq!(summary(&rows).total_consumption, 21.5);
    }

    #[test]
    fn empty_input_yields_zero_summary_only() {
        let rows = filter_and_summarize(&[], 2024, None);

        assert_eq!(
            rows,
            vec![TableRow::Summary(SummaryRow {
                total_meter_reading: 0.0,
                total_consumption: 0.0,
            })]
        );
    }

    #[test]
    fn unmatched_year_degenerates_to_zero_summary() {
        let rows = filter_and_summarize(&sample(), 1999, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(summary(&rows).total_consumption, 0.0);
    }

    #[test]
    fn missing_quantities_count_as_zero_in_totals() {
        let mut records = sample();
        records.push(MonthlyRecord {
            id: Some(9),
            year: 2024,
            month: 3,
            meter_reading: None,
            consumption: Some(f64::NAN),
        });

        let rows = filter_and_summarize(&records, 2024, None);

        assert_eq!(rows.len(), 4);
        assert_eq!(summary(&rows).total_meter_reading, 220.0);
        assert_eq!(summary(&rows).total_consumption, 30.0);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let records = sample();
        assert_eq!(
            filter_and_summarize(&records, 2024, None),
            filter_and_summarize(&records, 2024, None)
        );
    }

    #[test]
    fn selectors_are_sorted_and_deduplicated() {
        let mut records = sample();
        records.push(rec(2022, 12, 1.0, 1.0));

        assert_eq!(distinct_years(&records), vec![2022, 2023, 2024]);
        assert_eq!(
            distinct_months(&records),
            vec![
                MonthOption { month: 1, label: "Januar".to_string() },
                MonthOption { month: 2, label: "Februar".to_string() },
                MonthOption { month: 12, label: "Dezember".to_string() },
            ]
        );
        assert_eq!(default_year(&records), Some(2024));
    }

    #[test]
    fn selectors_on_empty_snapshot_are_empty() {
        assert!(distinct_years(&[]).is_empty());
        assert!(distinct_months(&[]).is_empty());
        assert_eq!(default_year(&[]), None);
    }
}
