use crate::{error::AppError, owner::CurrentOwner, AppState};
use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use core_types::{InsightSummary, SalesRecord};
use reporting::{ForecastReport, IngestReport};
use serde::{Deserialize, Serialize};
use axum_extra::extract::WithRejection;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Falls back to the configured default when absent.
    pub window_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub deleted: u64,
}

/// # POST /api/sales/upload
/// Replaces the owner's sales with the rows of the uploaded CSV (multipart field `file`).
pub async fn upload_sales(
    State(state): State<Arc<AppState>>,
    CurrentOwner(owner): CurrentOwner,
    mut multipart: Multipart,
) -> Result<Json<IngestReport>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Err(AppError::BadRequest("No selected file".to_string()));
        }
        if !file_name.to_lowercase().ends_with(".csv") {
            return Err(AppError::BadRequest(
                "Invalid file type. Please upload a CSV file".to_string(),
            ));
        }

        let bytes = field.bytes().await?;
        tracing::info!(%owner, %file_name, size = bytes.len(), "Received sales upload");
        let report = state.reporter.ingest_csv(owner, Cursor::new(bytes)).await?;
        return Ok(Json(report));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

/// # GET /api/sales
pub async fn list_sales(
    State(state): State<Arc<AppState>>,
    CurrentOwner(owner): CurrentOwner,
) -> Result<Json<Vec<SalesRecord>>, AppError> {
    let records = state.reporter.records(owner).await?;
    Ok(Json(records))
}

/// # DELETE /api/sales
pub async fn clear_sales(
    State(state): State<Arc<AppState>>,
    CurrentOwner(owner): CurrentOwner,
) -> Result<Json<ClearResponse>, AppError> {
    let deleted = state.reporter.clear(owner).await?;
    Ok(Json(ClearResponse { deleted }))
}

/// # GET /api/forecast?window_size=N
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    CurrentOwner(owner): CurrentOwner,
    WithRejection(Query(query), _): WithRejection<Query<ForecastQuery>, AppError>,
) -> Result<Json<ForecastReport>, AppError> {
    let report = state.reporter.forecast(owner, query.window_size).await?;
    Ok(Json(report))
}

/// # GET /api/forecast/export.csv?window_size=N
/// Downloads the forecast as a two-column CSV.
pub async fn export_forecast_csv(
    State(state): State<Arc<AppState>>,
    CurrentOwner(owner): CurrentOwner,
    WithRejection(Query(query), _): WithRejection<Query<ForecastQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let report = state.reporter.forecast(owner, query.window_size).await?;
    let body = forecast_csv(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"forecasted_data.csv\"",
            ),
        ],
        body,
    ))
}

fn forecast_csv(report: &ForecastReport) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Date", "Forecast"])
        .map_err(|e| AppError::Export(e.to_string()))?;
    for point in &report.points {
        writer
            .write_record([point.date.to_string(), format!("{:.2}", point.forecast)])
            .map_err(|e| AppError::Export(e.to_string()))?;
    }
    writer.into_inner().map_err(|e| AppError::Export(e.to_string()))
}

/// # GET /api/insights
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    CurrentOwner(owner): CurrentOwner,
) -> Result<Json<InsightSummary>, AppError> {
    let summary = state.reporter.compute_insights(owner).await?;
    Ok(Json(summary))
}
