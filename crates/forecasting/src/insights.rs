use crate::error::InsightError;
use core_types::{DailyAggregate, DayTotal, InsightSummary, ProductTotal, SalesRecord, Trend};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Number of days in each of the two weeks compared by the trend.
pub const TREND_WEEK_LEN: usize = 7;

/// Minimum series length for a trend: two non-overlapping weeks.
pub const MIN_TREND_POINTS: usize = 2 * TREND_WEEK_LEN;

/// Derives the insight summary from already-fetched data.
#[derive(Debug, Default)]
pub struct InsightCalculator {}

impl InsightCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles the insight summary.
    ///
    /// # Arguments
    ///
    /// * `top_product` - The owner's best-selling product, if they have any records.
    /// * `owner_aggregates` - The owner's daily series, used for the lowest sales day.
    /// * `trend_aggregates` - The series the trend is computed over.
    ///
    /// This never fails: each part falls back to its own "no data" state.
    pub fn summarize(
        &self,
        top_product: Option<ProductTotal>,
        owner_aggregates: &[DailyAggregate],
        trend_aggregates: &[DailyAggregate],
    ) -> InsightSummary {
        let trend = match sales_trend(trend_aggregates) {
            Ok(trend) => trend,
            Err(e) => {
                tracing::debug!(error = %e, "InsightCalculator: trend unavailable");
                Trend::InsufficientData
            }
        };

        InsightSummary {
            best_selling_product: top_product,
            lowest_sales_day: lowest_sales_day(owner_aggregates),
            trend,
        }
    }
}

/// The product with the highest total quantity.
///
/// Ties go to the lexicographically smallest product name. Totals saturate at
/// `i64::MAX`.
pub fn best_selling_product(records: &[SalesRecord]) -> Option<ProductTotal> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for record in records {
        let total = totals.entry(record.product.as_str()).or_insert(0);
        *total = total.saturating_add(record.quantity);
    }

    totals
        .into_iter()
        .min_by(|(name_a, total_a), (name_b, total_b)| {
            total_b.cmp(total_a).then_with(|| name_a.cmp(name_b))
        })
        .map(|(product, total_quantity)| ProductTotal {
            product: product.to_string(),
            total_quantity,
        })
}

/// The date with the lowest total quantity. Ties go to the earliest date.
pub fn lowest_sales_day(aggregates: &[DailyAggregate]) -> Option<DayTotal> {
    aggregates
        .iter()
        .min_by(|a, b| match a.total_quantity.cmp(&b.total_quantity) {
            Ordering::Equal => a.date.cmp(&b.date),
            other => other,
        })
        .map(|aggregate| DayTotal::from(*aggregate))
}

/// Compares the mean of the first week against the mean of the last week.
///
/// The series must be ascending by date and hold at least
/// [`MIN_TREND_POINTS`] days.
pub fn sales_trend(aggregates: &[DailyAggregate]) -> Result<Trend, InsightError> {
    if aggregates.len() < MIN_TREND_POINTS {
        return Err(InsightError::InsufficientTrendData {
            required: MIN_TREND_POINTS,
            available: aggregates.len(),
        });
    }

    let first_week_avg = mean(&aggregates[..TREND_WEEK_LEN]);
    let last_week_avg = mean(&aggregates[aggregates.len() - TREND_WEEK_LEN..]);

    let trend = if last_week_avg > first_week_avg {
        Trend::Increasing
    } else if last_week_avg < first_week_avg {
        Trend::Decreasing
    } else {
        Trend::Stable
    };

    tracing::debug!(first_week_avg, last_week_avg, %trend, "InsightCalculator: computed trend");
    Ok(trend)
}

fn mean(aggregates: &[DailyAggregate]) -> f64 {
    let sum: i128 = aggregates.iter().map(|a| i128::from(a.total_quantity)).sum();
    sum as f64 / aggregates.len() as f64
}
