//! Public API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{booking, profile, trip_type};
use crate::services::weather::DailyForecast;
use crate::utils::{AppError, AppResult};
use shared::booking::{BookingStatus, PaymentStatus};
use shared::models::{Booking, PublicProfile, TripType};

/// 船长名片：公开档案 + 在售行程
#[derive(Debug, Serialize)]
pub struct CaptainCard {
    pub profile: PublicProfile,
    pub trip_types: Vec<TripType>,
}

/// GET /api/public/captains/:captain_id
pub async fn captain_card(
    State(state): State<ServerState>,
    Path(captain_id): Path<i64>,
) -> AppResult<Json<CaptainCard>> {
    let prof = profile::find_by_id(&state.pool, captain_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Captain {captain_id} not found")))?;
    let trips = trip_type::find_active(&state.pool, captain_id).await?;

    Ok(Json(CaptainCard {
        profile: prof.into(),
        trip_types: trips,
    }))
}

/// 确认页可见的预订字段（不含内部备注 / 标签 / 提醒计数）
#[derive(Debug, Serialize)]
pub struct PublicBooking {
    pub id: i64,
    pub captain_id: i64,
    pub trip_type_id: i64,
    pub guest_name: String,
    pub scheduled_start: i64,
    pub scheduled_end: i64,
    pub party_size: i64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub total_price_cents: i64,
    pub deposit_paid_cents: i64,
    pub balance_due_cents: i64,
}

impl From<Booking> for PublicBooking {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            captain_id: b.captain_id,
            trip_type_id: b.trip_type_id,
            guest_name: b.guest_name,
            scheduled_start: b.scheduled_start,
            scheduled_end: b.scheduled_end,
            party_size: b.party_size,
            status: b.status,
            payment_status: b.payment_status,
            total_price_cents: b.total_price_cents,
            deposit_paid_cents: b.deposit_paid_cents,
            balance_due_cents: b.balance_due_cents,
        }
    }
}

/// GET /api/public/bookings/:id - 预订确认查询
pub async fn booking_lookup(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PublicBooking>> {
    let b = booking::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
    Ok(Json(b.into()))
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
    /// "YYYY-MM-DD"
    pub date: String,
}

/// GET /api/public/weather?lat=&lon=&date= - 预报转发
pub async fn weather(
    State(state): State<ServerState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<DailyForecast>> {
    crate::utils::time::parse_date(&query.date)?;

    let forecast = state
        .weather
        .daily_forecast(query.lat, query.lon, &query.date)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("No forecast available for {}", query.date))
        })?;
    Ok(Json(forecast))
}
