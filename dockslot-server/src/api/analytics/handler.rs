//! Analytics API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::analytics::{self, AnalyticsReport};
use crate::core::ServerState;
use crate::db::repository::{booking, profile};
use crate::utils::{AppError, AppResult, time};

/// GET /api/analytics/:captain_id - 经营报告
pub async fn report(
    State(state): State<ServerState>,
    Path(captain_id): Path<i64>,
) -> AppResult<Json<AnalyticsReport>> {
    let prof = profile::find_by_id(&state.pool, captain_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Captain {captain_id} not found")))?;
    let tz = time::parse_tz(&prof.timezone);

    let bookings = booking::find_all(
        &state.pool,
        captain_id,
        booking::BookingFilter::default(),
    )
    .await?;

    Ok(Json(analytics::build_report(
        &bookings,
        tz,
        shared::util::now_millis(),
    )))
}
