//! Captain Profile API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono_tz::Tz;

use crate::core::ServerState;
use crate::db::repository::profile;
use crate::utils::validation::{MAX_NAME_LEN, validate_email, validate_required_text};
use crate::utils::{AppError, AppResult, time};
use shared::models::{Profile, ProfileUpdate};

/// GET /api/profile/:captain_id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(captain_id): Path<i64>,
) -> AppResult<Json<Profile>> {
    let p = profile::find_by_id(&state.pool, captain_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Captain {captain_id} not found")))?;
    Ok(Json(p))
}

/// PUT /api/profile/:captain_id - 档案编辑（含休眠开关）
pub async fn update(
    State(state): State<ServerState>,
    Path(captain_id): Path<i64>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<Profile>> {
    if let Some(name) = &payload.business_name {
        validate_required_text(name, "business_name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.contact_email {
        validate_email(email, "contact_email")?;
    }
    if let Some(tz) = &payload.timezone {
        if tz.parse::<Tz>().is_err() {
            return Err(AppError::validation(format!("Unknown timezone '{tz}'")));
        }
    }
    for (field, value) in [("day_start", &payload.day_start), ("day_end", &payload.day_end)] {
        if let Some(hhmm) = value {
            if time::parse_hhmm(hhmm).is_none() {
                return Err(AppError::validation(format!(
                    "{field} must be HH:MM, got '{hhmm}'"
                )));
            }
        }
    }
    if let Some(step) = payload.slot_step_min {
        if step <= 0 {
            return Err(AppError::validation("slot_step_min must be positive"));
        }
    }
    if let Some(until) = &payload.hibernate_until {
        time::parse_date(until)?;
    }

    let p = profile::update(&state.pool, captain_id, payload).await?;
    Ok(Json(p))
}
