use thiserror::Error;

/// Reasons a forecast could not be produced. All of them are recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("Not enough data for forecasting (at least {required} days required, {available} available)")]
    InsufficientData { required: usize, available: usize },

    #[error("Not enough data points for forecasting")]
    NoForecastAvailable,

    #[error("No valid forecast data available")]
    NoValidForecast,

    #[error("Window size must be a positive number of days")]
    InvalidWindowSize,
}

impl ForecastError {
    /// A stable, machine-readable tag for the failure.
    pub fn reason(&self) -> &'static str {
        match self {
            ForecastError::InsufficientData { .. } => "insufficient_data",
            ForecastError::NoForecastAvailable => "no_forecast_available",
            ForecastError::NoValidForecast => "no_valid_forecast",
            ForecastError::InvalidWindowSize => "invalid_window_size",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    #[error("Not enough data to determine trend ({required} days required, {available} available)")]
    InsufficientTrendData { required: usize, available: usize },
}
