//! Vessel API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::vessel;
use crate::utils::validation::{MAX_NAME_LEN, validate_positive, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Vessel, VesselCreate, VesselUpdate};

#[derive(Debug, Deserialize)]
pub struct CaptainQuery {
    pub captain_id: i64,
}

/// GET /api/vessels?captain_id=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CaptainQuery>,
) -> AppResult<Json<Vec<Vessel>>> {
    let rows = vessel::find_all(&state.pool, query.captain_id).await?;
    Ok(Json(rows))
}

/// GET /api/vessels/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vessel>> {
    let v = vessel::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Vessel {id} not found")))?;
    Ok(Json(v))
}

/// POST /api/vessels
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VesselCreate>,
) -> AppResult<Json<Vessel>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_positive(payload.capacity, "capacity")?;

    let v = vessel::create(&state.pool, payload).await?;
    Ok(Json(v))
}

/// PUT /api/vessels/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<VesselUpdate>,
) -> AppResult<Json<Vessel>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(capacity) = payload.capacity {
        validate_positive(capacity, "capacity")?;
    }

    let v = vessel::update(&state.pool, id, payload).await?;
    Ok(Json(v))
}

/// DELETE /api/vessels/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = vessel::delete(&state.pool, id).await?;
    Ok(Json(result))
}
