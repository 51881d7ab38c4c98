//! Trip Type API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::trip_type;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_cents, validate_positive, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{TripType, TripTypeCreate, TripTypeUpdate};

#[derive(Debug, Deserialize)]
pub struct CaptainQuery {
    pub captain_id: i64,
}

/// GET /api/trip-types?captain_id= - 全部行程（含下架）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CaptainQuery>,
) -> AppResult<Json<Vec<TripType>>> {
    let rows = trip_type::find_all(&state.pool, query.captain_id).await?;
    Ok(Json(rows))
}

/// GET /api/trip-types/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TripType>> {
    let t = trip_type::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Trip type {id} not found")))?;
    Ok(Json(t))
}

/// POST /api/trip-types
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TripTypeCreate>,
) -> AppResult<Json<TripType>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    if let Some(desc) = &payload.description {
        if desc.len() > MAX_NOTE_LEN {
            return Err(AppError::validation(format!(
                "description exceeds {MAX_NOTE_LEN} characters"
            )));
        }
    }
    validate_positive(payload.duration_min, "duration_min")?;
    validate_cents(payload.price_cents, "price_cents")?;
    validate_cents(payload.deposit_cents, "deposit_cents")?;

    let t = trip_type::create(&state.pool, payload).await?;
    Ok(Json(t))
}

/// PUT /api/trip-types/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TripTypeUpdate>,
) -> AppResult<Json<TripType>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    if let Some(duration) = payload.duration_min {
        validate_positive(duration, "duration_min")?;
    }
    if let Some(price) = payload.price_cents {
        validate_cents(price, "price_cents")?;
    }
    if let Some(deposit) = payload.deposit_cents {
        validate_cents(deposit, "deposit_cents")?;
    }

    let t = trip_type::update(&state.pool, id, payload).await?;
    Ok(Json(t))
}

/// DELETE /api/trip-types/:id - 软删除（下架）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = trip_type::delete(&state.pool, id).await?;
    Ok(Json(result))
}
