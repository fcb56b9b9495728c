use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),

    #[error("Import error: {0}")]
    Import(#[from] importer::ImportError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Forecast(#[from] forecasting::ForecastError),
}
