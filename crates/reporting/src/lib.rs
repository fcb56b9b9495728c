//! # SalesCast Reporting Service
//!
//! The glue between storage and the forecasting engine. `SalesReporter` fetches
//! an owner's records through a `SalesRepository`, hands them to the pure
//! engine, and returns the structures the web server and CLI render.

use configuration::{Config, TrendScope};
use core_types::{
    DailyAggregate, ForecastPoint, InsightSummary, OwnerId, RecordScope, SalesRecord,
};
use database::SalesRepository;
use forecasting::{InsightCalculator, MovingAverageForecaster};
use serde::Serialize;
use std::cmp::Reverse;
use std::io::Read;
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::ReportError;

/// The knobs of the service that come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    pub default_window_size: usize,
    pub trend_scope: TrendScope,
}

impl ReportSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_window_size: config.forecast.default_window_size,
            trend_scope: config.insights.trend_scope,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_window_size: forecasting::DEFAULT_WINDOW_SIZE,
            trend_scope: TrendScope::Owner,
        }
    }
}

/// The result of one CSV upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub import_id: Uuid,
    pub owner: OwnerId,
    pub rows_read: usize,
    pub rows_stored: u64,
    pub rows_skipped: usize,
    pub unparseable_dates: usize,
    /// Records from the owner's previous upload that were removed.
    pub replaced: u64,
}

/// A forecast series together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub owner: OwnerId,
    pub window_size: usize,
    pub points: Vec<ForecastPoint>,
}

/// Runs ingestion, forecasting and insights for one owner at a time.
#[derive(Clone)]
pub struct SalesReporter {
    repo: Arc<dyn SalesRepository>,
    settings: ReportSettings,
}

impl SalesReporter {
    pub fn new(repo: Arc<dyn SalesRepository>, settings: ReportSettings) -> Self {
        Self { repo, settings }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Parses a CSV upload and replaces all of the owner's records with it.
    ///
    /// Missing required columns abort the upload before anything is deleted.
    /// Parsing runs on the blocking thread pool.
    pub async fn ingest_csv<R>(&self, owner: OwnerId, reader: R) -> Result<IngestReport, ReportError>
    where
        R: Read + Send + 'static,
    {
        let upload = tokio::task::spawn_blocking(move || importer::parse_sales_csv(reader)).await??;
        let import_id = Uuid::new_v4();

        let outcome = self
            .repo
            .replace_all_for_owner(owner, import_id, &upload.records)
            .await?;

        if upload.rows_skipped > 0 || upload.unparseable_dates > 0 {
            tracing::warn!(
                %owner,
                %import_id,
                rows_skipped = upload.rows_skipped,
                unparseable_dates = upload.unparseable_dates,
                "Upload stored with rejected rows or unreadable dates"
            );
        }

        Ok(IngestReport {
            import_id,
            owner,
            rows_read: upload.rows_read,
            rows_stored: outcome.inserted,
            rows_skipped: upload.rows_skipped,
            unparseable_dates: upload.unparseable_dates,
            replaced: outcome.deleted,
        })
    }

    /// The owner's records, newest date first. Records with unreadable dates come last.
    pub async fn records(&self, owner: OwnerId) -> Result<Vec<SalesRecord>, ReportError> {
        let mut records = self.repo.list_records(RecordScope::Owner(owner)).await?;
        records.sort_by_key(|record| (Reverse(record.parsed_date()), record.id));
        Ok(records)
    }

    /// Deletes the owner's records, returning how many were removed.
    pub async fn clear(&self, owner: OwnerId) -> Result<u64, ReportError> {
        Ok(self.repo.clear_owner(owner).await?)
    }

    /// The ascending daily series for the records in `scope`.
    pub async fn fetch_aggregates(&self, scope: RecordScope) -> Result<Vec<DailyAggregate>, ReportError> {
        let records = self.repo.list_records(scope).await?;
        Ok(forecasting::aggregate_daily(&records))
    }

    /// Computes the owner's moving-average forecast.
    ///
    /// `window_size` falls back to the configured default when `None`.
    pub async fn forecast(
        &self,
        owner: OwnerId,
        window_size: Option<usize>,
    ) -> Result<ForecastReport, ReportError> {
        let window_size = window_size.unwrap_or(self.settings.default_window_size);
        // Validate the window before touching storage.
        let forecaster = MovingAverageForecaster::new(window_size)?;

        let aggregates = self.fetch_aggregates(RecordScope::Owner(owner)).await?;
        let points = forecaster.forecast(&aggregates).inspect_err(|e| {
            tracing::info!(%owner, window_size, reason = e.reason(), "Forecast unavailable");
        })?;

        Ok(ForecastReport {
            owner,
            window_size,
            points,
        })
    }

    /// Computes the owner's insight summary.
    ///
    /// Only storage failures are errors. Thin or empty data shows up as `None`
    /// fields and `Trend::InsufficientData` instead.
    pub async fn compute_insights(&self, owner: OwnerId) -> Result<InsightSummary, ReportError> {
        let top_product = self.repo.top_product_by_owner(owner).await?;
        let owner_aggregates = self.fetch_aggregates(RecordScope::Owner(owner)).await?;

        let summary = match self.settings.trend_scope {
            TrendScope::Owner => {
                InsightCalculator::new().summarize(top_product, &owner_aggregates, &owner_aggregates)
            }
            TrendScope::Global => {
                let global_aggregates = self.fetch_aggregates(RecordScope::Global).await?;
                InsightCalculator::new().summarize(top_product, &owner_aggregates, &global_aggregates)
            }
        };

        Ok(summary)
    }
}
