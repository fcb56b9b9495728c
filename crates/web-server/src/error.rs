use axum::{
    extract::{multipart::MultipartError, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use forecasting::ForecastError;
use reporting::ReportError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
    #[error("Upload error: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),
    #[error("Export error: {0}")]
    Export(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, reason) = match self {
            AppError::Report(ReportError::Database(db_err)) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                    None,
                )
            }
            AppError::Report(ReportError::Task(join_err)) => {
                tracing::error!(error = %join_err, "Background task failed.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            AppError::Report(ReportError::Import(import_err)) => {
                (StatusCode::BAD_REQUEST, import_err.to_string(), None)
            }
            AppError::Report(ReportError::Forecast(ForecastError::InvalidWindowSize)) => (
                StatusCode::BAD_REQUEST,
                ForecastError::InvalidWindowSize.to_string(),
                Some(ForecastError::InvalidWindowSize.reason()),
            ),
            AppError::Report(ReportError::Forecast(forecast_err)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                forecast_err.to_string(),
                Some(forecast_err.reason()),
            ),
            AppError::Multipart(multipart_err) => {
                (multipart_err.status(), multipart_err.body_text(), None)
            }
            AppError::Query(rejection) => (rejection.status(), rejection.body_text(), None),
            AppError::Export(message) => {
                tracing::error!(error = %message, "Export error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to build the export".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message, None),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
        };

        let body = match reason {
            Some(reason) => Json(json!({ "error": error_message, "reason": reason })),
            None => Json(json!({ "error": error_message })),
        };
        (status, body).into_response()
    }
}
