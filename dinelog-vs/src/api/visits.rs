//! Visit endpoints
//!
//! - `GET /api/restaurants`: all visits, date descending
//! - `POST /api/restaurants`: store one visit, `201` with the stored record

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use dinelog_common::{db, VisitDraft, VisitRecord};
use tracing::{debug, info};

use super::ApiError;
use crate::AppState;

/// GET /api/restaurants
pub async fn list_visits(
    State(state): State<AppState>,
) -> Result<Json<Vec<VisitRecord>>, ApiError> {
    let visits = db::list_all(&state.db).await?;
    debug!("Listing {} visits", visits.len());
    Ok(Json(visits))
}

/// POST /api/restaurants
///
/// The draft is stored verbatim; a body that is not a visit is a 400.
pub async fn submit_visit(
    State(state): State<AppState>,
    payload: Result<Json<VisitDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<VisitRecord>), ApiError> {
    let Json(draft) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let visit = db::append(&state.db, draft).await?;
    info!("Recorded visit to {} on {}", visit.name, visit.date);

    Ok((StatusCode::CREATED, Json(visit)))
}
