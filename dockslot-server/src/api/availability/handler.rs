//! Availability API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::availability::{self, Slot};
use crate::core::ServerState;
use crate::db::repository::{profile, trip_type};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// "YYYY-MM-DD"（船长时区）
    pub date: String,
}

/// GET /api/availability/:captain_id/:trip_type_id?date=YYYY-MM-DD
pub async fn list_slots(
    State(state): State<ServerState>,
    Path((captain_id, trip_type_id)): Path<(i64, i64)>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    let prof = profile::find_by_id(&state.pool, captain_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Captain {captain_id} not found")))?;

    let trip = trip_type::find_by_id(&state.pool, trip_type_id)
        .await?
        .filter(|t| t.captain_id == captain_id)
        .ok_or_else(|| AppError::not_found(format!("Trip type {trip_type_id} not found")))?;

    let slots = availability::available_slots(&state.pool, &prof, &trip, &query.date).await?;
    Ok(Json(slots))
}
