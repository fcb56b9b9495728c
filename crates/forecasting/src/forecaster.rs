use crate::error::ForecastError;
use core_types::{DailyAggregate, ForecastPoint};

/// The window size used when the caller does not choose one.
pub const DEFAULT_WINDOW_SIZE: usize = 7;

/// A trailing moving-average forecaster over a daily sales series.
///
/// The forecast at position `i` is the mean of the `window_size` totals ending
/// at `i`, clipped at the start of the series. The first point's forecast is
/// therefore its own total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverageForecaster {
    window_size: usize,
}

impl MovingAverageForecaster {
    /// Creates a forecaster, rejecting a zero window.
    pub fn new(window_size: usize) -> Result<Self, ForecastError> {
        if window_size == 0 {
            return Err(ForecastError::InvalidWindowSize);
        }
        Ok(Self { window_size })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// The main entry point for computing the forecast series.
    ///
    /// # Arguments
    ///
    /// * `aggregates` - The daily series, ascending by date.
    ///
    /// # Returns
    ///
    /// The forecast points in the same order, or a `ForecastError` describing
    /// why no forecast could be produced. A series shorter than the window
    /// never yields a partial result.
    pub fn forecast(&self, aggregates: &[DailyAggregate]) -> Result<Vec<ForecastPoint>, ForecastError> {
        if aggregates.len() < self.window_size {
            return Err(ForecastError::InsufficientData {
                required: self.window_size,
                available: aggregates.len(),
            });
        }

        let means = self.rolling_means(aggregates);

        // Means of i64 totals are always finite; the next two checks only
        // guard against a degenerate series.
        if means.iter().all(|mean| !mean.is_finite()) {
            return Err(ForecastError::NoForecastAvailable);
        }

        let points: Vec<ForecastPoint> = aggregates
            .iter()
            .zip(means)
            .filter(|(_, forecast)| forecast.is_finite())
            .map(|(aggregate, forecast)| ForecastPoint {
                date: aggregate.date,
                total_quantity: aggregate.total_quantity,
                forecast,
            })
            .collect();

        if points.is_empty() {
            return Err(ForecastError::NoValidForecast);
        }

        tracing::debug!(
            window_size = self.window_size,
            points = points.len(),
            "Forecaster: computed moving-average series"
        );

        Ok(points)
    }

    /// Trailing means with a minimum period of one, via a running window sum.
    fn rolling_means(&self, aggregates: &[DailyAggregate]) -> Vec<f64> {
        let mut means = Vec::with_capacity(aggregates.len());
        let mut window_sum: i128 = 0;

        for (i, aggregate) in aggregates.iter().enumerate() {
            window_sum += i128::from(aggregate.total_quantity);
            if i >= self.window_size {
                window_sum -= i128::from(aggregates[i - self.window_size].total_quantity);
            }
            let count = (i + 1).min(self.window_size);
            means.push(window_sum as f64 / count as f64);
        }

        means
    }
}

/// Computes the moving-average forecast of `aggregates` with the given window.
pub fn compute_forecast(
    aggregates: &[DailyAggregate],
    window_size: usize,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    MovingAverageForecaster::new(window_size)?.forecast(aggregates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};
    use rstest::rstest;

    fn series(quantities: &[i64]) -> Vec<DailyAggregate> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        quantities
            .iter()
            .enumerate()
            .map(|(i, &total_quantity)| DailyAggregate {
                date: start + Duration::days(i as i64),
                total_quantity,
            })
            .collect()
    }

    #[test]
    fn eight_day_series_with_window_three() {
        let points = compute_forecast(&series(&[1, 2, 3, 4, 5, 6, 7, 8]), 3).unwrap();

        assert_eq!(points.len(), 8);
        assert_relative_eq!(points[0].forecast, 1.0);
        assert_relative_eq!(points[1].forecast, 1.5);
        assert_relative_eq!(points[2].forecast, 2.0);
        assert_relative_eq!(points[7].forecast, 7.0);
        assert_eq!(points[7].total_quantity, 8);
    }

    #[rstest]
    #[case(&[5])]
    #[case(&[3, 9, 0, 12])]
    #[case(&[10, 0, 10, 0, 10, 0, 10])]
    fn window_of_one_is_the_identity(#[case] quantities: &[i64]) {
        let points = compute_forecast(&series(quantities), 1).unwrap();
        for (point, &quantity) in points.iter().zip(quantities) {
            assert_relative_eq!(point.forecast, quantity as f64);
        }
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(7)]
    fn constant_series_forecasts_the_constant(#[case] window_size: usize) {
        let points = compute_forecast(&series(&[4; 10]), window_size).unwrap();
        assert!(points.iter().all(|p| (p.forecast - 4.0).abs() < f64::EPSILON));
    }

    #[test]
    fn short_series_is_insufficient_data() {
        let err = compute_forecast(&series(&[1, 2, 3]), 7).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                required: 7,
                available: 3
            }
        );
    }

    #[test]
    fn empty_series_is_insufficient_data() {
        let err = compute_forecast(&[], 1).unwrap_err();
        assert_eq!(err.reason(), "insufficient_data");
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(
            MovingAverageForecaster::new(0).unwrap_err(),
            ForecastError::InvalidWindowSize
        );
    }

    #[test]
    fn series_exactly_one_window_long_is_forecast() {
        let points = compute_forecast(&series(&[2, 4, 6, 8, 10, 12, 14]), 7).unwrap();
        assert_eq!(points.len(), 7);
        assert_relative_eq!(points[6].forecast, 8.0);
    }

    #[test]
    fn output_keeps_dates_ascending() {
        let input = series(&[9, 1, 5, 5, 2]);
        let points = compute_forecast(&input, 2).unwrap();
        let dates: Vec<_> = points.iter().map(|p| p.date).collect();
        let expected: Vec<_> = input.iter().map(|a| a.date).collect();
        assert_eq!(dates, expected);
    }
}
