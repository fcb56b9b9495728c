//! # SalesCast Forecasting Engine
//!
//! This crate turns stored sales records into a per-day series, a trailing
//! moving-average forecast over that series, and a small set of insights
//! (best seller, weakest day, first-week vs last-week trend).
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the
//!   database or the web server. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every entry point is a function of its inputs.
//!   Data flows one way: records -> aggregates -> (forecast | insights).
//! - **Recoverable Outcomes:** Short or degenerate series are reported through
//!   tagged errors (`ForecastError`, `InsightError`), never panics.
//!
//! ## Public API
//!
//! - `aggregate_daily`: groups records into ascending `DailyAggregate`s.
//! - `compute_forecast` / `MovingAverageForecaster`: the trailing-mean forecast.
//! - `InsightCalculator` and the individual insight functions.

pub mod aggregator;
pub mod error;
pub mod forecaster;
pub mod insights;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::aggregate_daily;
pub use error::{ForecastError, InsightError};
pub use forecaster::{compute_forecast, MovingAverageForecaster, DEFAULT_WINDOW_SIZE};
pub use insights::{
    best_selling_product, lowest_sales_day, sales_trend, InsightCalculator, MIN_TREND_POINTS,
    TREND_WEEK_LEN,
};
