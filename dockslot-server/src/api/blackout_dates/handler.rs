//! Blackout Date API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::blackout_date;
use crate::utils::{AppError, AppResult, time};
use shared::models::{BlackoutDate, BlackoutDateCreate};

#[derive(Debug, Deserialize)]
pub struct CaptainQuery {
    pub captain_id: i64,
}

/// GET /api/blackout-dates?captain_id=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CaptainQuery>,
) -> AppResult<Json<Vec<BlackoutDate>>> {
    let rows = blackout_date::find_all(&state.pool, query.captain_id).await?;
    Ok(Json(rows))
}

/// POST /api/blackout-dates - 单日或区间（end_date 缺省等于 start_date）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BlackoutDateCreate>,
) -> AppResult<Json<BlackoutDate>> {
    let start = time::parse_date(&payload.start_date)?;
    if let Some(end_date) = &payload.end_date {
        let end = time::parse_date(end_date)?;
        if end < start {
            return Err(AppError::validation("end_date is before start_date"));
        }
    }

    let b = blackout_date::create(&state.pool, payload).await?;
    Ok(Json(b))
}

/// DELETE /api/blackout-dates/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = blackout_date::delete(&state.pool, id).await?;
    Ok(Json(result))
}
