use chrono::NaiveDate;
use core_types::{DailyAggregate, SalesRecord};
use std::collections::BTreeMap;

/// Groups sales records by date and sums their quantities.
///
/// The result is strictly ascending by date with one entry per distinct date.
/// Records whose date cannot be parsed are left out of the result; the
/// operation itself never fails, and an empty input yields an empty series.
/// A daily total that would exceed `i64::MAX` saturates there.
pub fn aggregate_daily(records: &[SalesRecord]) -> Vec<DailyAggregate> {
    let mut totals: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut unparseable = 0usize;

    for record in records {
        match record.parsed_date() {
            Some(date) => {
                let total = totals.entry(date).or_insert(0);
                *total = total.saturating_add(record.quantity);
            }
            None => unparseable += 1,
        }
    }

    if unparseable > 0 {
        tracing::debug!(
            unparseable,
            total = records.len(),
            "Aggregator: dropped records with unparseable dates"
        );
    }

    totals
        .into_iter()
        .map(|(date, total_quantity)| DailyAggregate {
            date,
            total_quantity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::OwnerId;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn record(date: &str, product: &str, quantity: i64) -> SalesRecord {
        SalesRecord {
            id: 0,
            owner: OwnerId(1),
            import_id: Uuid::nil(),
            date: date.to_string(),
            product: product.to_string(),
            quantity,
        }
    }

    fn day(y: i32, m: u32, d: u32, total_quantity: i64) -> DailyAggregate {
        DailyAggregate {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            total_quantity,
        }
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn sums_quantities_per_date_in_ascending_order() {
        let records = vec![
            record("05/01/2024", "tea", 3),
            record("03/01/2024", "coffee", 2),
            record("05/01/2024", "coffee", 4),
            record("04/01/2024", "tea", 1),
        ];

        assert_eq!(
            aggregate_daily(&records),
            vec![day(2024, 1, 3, 2), day(2024, 1, 4, 1), day(2024, 1, 5, 7)]
        );
    }

    #[test]
    fn different_spellings_of_one_date_collapse() {
        let records = vec![
            record("2024-01-05", "tea", 3),
            record("05/01/2024", "tea", 2),
            record("5 Jan 2024", "tea", 1),
        ];

        assert_eq!(aggregate_daily(&records), vec![day(2024, 1, 5, 6)]);
    }

    #[test]
    fn unparseable_dates_are_excluded_without_failing() {
        let records = vec![
            record("yesterday", "tea", 100),
            record("06/01/2024", "tea", 5),
            record("", "tea", 100),
        ];

        assert_eq!(aggregate_daily(&records), vec![day(2024, 1, 6, 5)]);
    }

    #[test]
    fn oversized_daily_total_saturates() {
        let records = vec![
            record("01/01/2024", "tea", i64::MAX),
            record("01/01/2024", "cake", 1),
            record("02/01/2024", "tea", 2),
        ];

        assert_eq!(
            aggregate_daily(&records),
            vec![day(2024, 1, 1, i64::MAX), day(2024, 1, 2, 2)]
        );
    }

    #[test]
    fn dates_are_unique_and_strictly_ascending() {
        let records: Vec<SalesRecord> = (1..=28)
            .rev()
            .flat_map(|d| {
                let date = format!("{:02}/02/2024", d);
                vec![record(&date, "a", 1), record(&date, "b", d)]
            })
            .collect();

        let aggregates = aggregate_daily(&records);
        assert_eq!(aggregates.len(), 28);
        assert!(aggregates.windows(2).all(|w| w[0].date < w[1].date));
    }
}
