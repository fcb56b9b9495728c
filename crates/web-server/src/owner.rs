use crate::{error::AppError, AppState};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use core_types::OwnerId;
use std::sync::Arc;

/// The owner a request acts for.
///
/// Authentication happens in front of this service; the proxy forwards the
/// authenticated user's id in the configured header. Requests without a valid
/// id are rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct CurrentOwner(pub OwnerId);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = &state.owner_header;
        let value = parts
            .headers
            .get(header)
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", header)))?;

        let raw = value
            .to_str()
            .map_err(|_| AppError::Unauthorized(format!("Malformed {} header", header)))?;

        raw.parse::<OwnerId>()
            .map(CurrentOwner)
            .map_err(|e| AppError::Unauthorized(e.to_string()))
    }
}
