//! Booking API Handlers
//!
//! 所有生命周期动作都经过 `shared::transition`；处理器不自带
//! 状态成员判断。

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use crate::audit::{self, create_diff, create_snapshot};
use crate::bookings::export::bookings_to_csv;
use crate::bookings::payment::{MAX_PAYMENT_REMINDERS, split_payment};
use crate::core::ServerState;
use crate::db::repository::{blackout_date, booking, booking_log, profile, trip_type, vessel};
use crate::utils::validation::{
    MAX_MESSAGE_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_positive,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, time};
use shared::booking::{BookingAction, BookingStatus, PaymentStatus, transition};
use shared::models::{Booking, BookingCreate, BookingLog, BookingUpdate, Profile, TripType};

async fn require_booking(pool: &SqlitePool, id: i64) -> AppResult<Booking> {
    booking::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))
}

async fn require_profile(pool: &SqlitePool, captain_id: i64) -> AppResult<Profile> {
    profile::find_by_id(pool, captain_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Captain {captain_id} not found")))
}

async fn require_trip(pool: &SqlitePool, id: i64) -> AppResult<TripType> {
    trip_type::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Trip type {id} not found")))
}

/// 写入时段仲裁：与占用状态预订重叠即拒绝
///
/// `exclude` 用于改期场景排除预订自身。
async fn ensure_slot_free(
    pool: &SqlitePool,
    captain_id: i64,
    start: i64,
    end: i64,
    exclude: Option<i64>,
) -> AppResult<()> {
    let conflicts = booking::find_overlapping(pool, captain_id, start, end).await?;
    if conflicts.iter().any(|b| Some(b.id) != exclude) {
        return Err(AppError::SlotUnavailable);
    }
    Ok(())
}

/// POST /api/bookings - 公共创建流程
///
/// 可用性规则在写入时重查一遍：休眠 → HIBERNATING，
/// 停航日 / 时段冲突 → SLOT_UNAVAILABLE。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    validate_required_text(&payload.guest_name, "guest_name", MAX_NAME_LEN)?;
    validate_email(&payload.guest_email, "guest_email")?;
    validate_positive(payload.party_size, "party_size")?;

    let prof = require_profile(&state.pool, payload.captain_id).await?;
    if prof.hibernating {
        return Err(AppError::Hibernating);
    }

    let trip = require_trip(&state.pool, payload.trip_type_id).await?;
    if trip.captain_id != payload.captain_id {
        return Err(AppError::not_found(format!(
            "Trip type {} not found",
            payload.trip_type_id
        )));
    }
    if !trip.is_active {
        return Err(AppError::business_rule("Trip type is no longer offered"));
    }

    if let Some(vessel_id) = payload.vessel_id {
        let v = vessel::find_by_id(&state.pool, vessel_id)
            .await?
            .filter(|v| v.captain_id == payload.captain_id)
            .ok_or_else(|| AppError::not_found(format!("Vessel {vessel_id} not found")))?;
        if payload.party_size > v.capacity {
            return Err(AppError::validation(format!(
                "Party size {} exceeds vessel capacity {}",
                payload.party_size, v.capacity
            )));
        }
    }

    let now = shared::util::now_millis();
    if payload.scheduled_start < now {
        return Err(AppError::validation("Cannot book a time in the past"));
    }

    let tz = time::parse_tz(&prof.timezone);
    let local_date = time::millis_to_local_date(payload.scheduled_start, tz)
        .format("%Y-%m-%d")
        .to_string();
    if !blackout_date::find_covering(&state.pool, prof.id, &local_date)
        .await?
        .is_empty()
    {
        return Err(AppError::SlotUnavailable);
    }

    let scheduled_end = payload.scheduled_start + trip.duration_min * 60_000;
    ensure_slot_free(
        &state.pool,
        prof.id,
        payload.scheduled_start,
        scheduled_end,
        None,
    )
    .await?;

    let b = Booking {
        id: shared::util::snowflake_id(),
        captain_id: payload.captain_id,
        trip_type_id: payload.trip_type_id,
        vessel_id: payload.vessel_id,
        guest_name: payload.guest_name,
        guest_email: payload.guest_email,
        guest_phone: payload.guest_phone,
        scheduled_start: payload.scheduled_start,
        scheduled_end,
        party_size: payload.party_size,
        status: BookingStatus::PendingDeposit,
        payment_status: PaymentStatus::Unpaid,
        total_price_cents: trip.price_cents,
        deposit_paid_cents: 0,
        balance_due_cents: trip.price_cents,
        payment_reminder_count: 0,
        last_reminder_at: None,
        weather_hold_reason: None,
        original_start: None,
        internal_notes: None,
        tags: String::new(),
        created_at: now,
        updated_at: now,
    };
    booking::create(&state.pool, &b).await?;

    audit::log(
        &state.pool,
        b.id,
        shared::models::LogEvent::BookingCreated,
        shared::models::LogActor::Guest,
        format!("Booking created for {}", b.guest_name),
        Some(create_snapshot(&b)),
    )
    .await;

    tracing::info!(booking_id = b.id, captain_id = b.captain_id, "Booking created");
    Ok(Json(b))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub captain_id: i64,
    /// scheduled_start >= from (millis)
    pub from: Option<i64>,
    /// scheduled_start < to (millis)
    pub to: Option<i64>,
    pub status: Option<String>,
}

/// GET /api/bookings?captain_id=&from=&to=&status=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let status = match &query.status {
        Some(s) => Some(
            BookingStatus::parse(s)
                .ok_or_else(|| AppError::validation(format!("Unknown status '{s}'")))?,
        ),
        None => None,
    };

    let rows = booking::find_all(
        &state.pool,
        query.captain_id,
        booking::BookingFilter {
            from: query.from,
            to: query.to,
            status,
        },
    )
    .await?;
    Ok(Json(rows))
}

/// GET /api/bookings/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    Ok(Json(require_booking(&state.pool, id).await?))
}

/// PUT /api/bookings/:id - 编辑客人信息 / 备注 / 标签
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingUpdate>,
) -> AppResult<Json<Booking>> {
    if let Some(name) = &payload.guest_name {
        validate_required_text(name, "guest_name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.guest_email {
        validate_email(email, "guest_email")?;
    }
    if let Some(party) = payload.party_size {
        validate_positive(party, "party_size")?;
    }
    if let Some(notes) = &payload.internal_notes {
        if notes.len() > MAX_NOTE_LEN {
            return Err(AppError::validation(format!(
                "internal_notes exceeds {MAX_NOTE_LEN} characters"
            )));
        }
    }

    let old = require_booking(&state.pool, id).await?;
    let updated = booking::update_info(
        &state.pool,
        id,
        payload.guest_name,
        payload.guest_email,
        payload.guest_phone,
        payload.party_size,
        payload.internal_notes,
        payload.tags.map(|t| shared::util::join_tags(&t)),
    )
    .await?;

    audit::log(
        &state.pool,
        id,
        shared::models::LogEvent::BookingUpdated,
        shared::models::LogActor::Captain,
        "Booking details updated",
        Some(create_diff(&old, &updated)),
    )
    .await;

    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct ActionPayload {
    pub action: BookingAction,
    /// set_weather_hold 必填
    pub reason: Option<String>,
    /// reschedule 必填 (millis)
    pub new_start: Option<i64>,
}

/// POST /api/bookings/:id/status - 所有生命周期动作
pub async fn apply_action(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ActionPayload>,
) -> AppResult<Json<Booking>> {
    let b = require_booking(&state.pool, id).await?;
    let next = transition(b.status, payload.action)?;

    let updated = match payload.action {
        BookingAction::SetWeatherHold => {
            let reason = payload
                .reason
                .as_deref()
                .filter(|r| !r.trim().is_empty())
                .ok_or_else(|| AppError::validation("A reason is required for weather hold"))?;
            booking::set_weather_hold(&state.pool, id, reason).await?
        }
        BookingAction::Reschedule => {
            let new_start = payload
                .new_start
                .ok_or_else(|| AppError::validation("new_start is required to reschedule"))?;
            let trip = require_trip(&state.pool, b.trip_type_id).await?;
            let new_end = new_start + trip.duration_min * 60_000;
            ensure_slot_free(&state.pool, b.captain_id, new_start, new_end, Some(id)).await?;

            let updated =
                booking::apply_reschedule(&state.pool, id, new_start, new_end, b.scheduled_start)
                    .await?;

            // 改期已落库；通知邮件失败不回滚，也不阻断时间线记录
            let prof = require_profile(&state.pool, b.captain_id).await?;
            let tz = time::parse_tz(&prof.timezone);
            if let Err(e) = state
                .email
                .send_reschedule_notice(&updated, &prof, &time::format_local(new_start, tz))
                .await
            {
                tracing::warn!(booking_id = id, error = %e, "Failed to send reschedule notice");
            }
            updated
        }
        _ => booking::set_status(&state.pool, id, next).await?,
    };

    audit::log(
        &state.pool,
        id,
        shared::models::LogEvent::StatusChanged,
        shared::models::LogActor::Captain,
        format!("{} -> {} via {}", b.status, updated.status, payload.action),
        Some(json!({
            "action": payload.action,
            "reason": payload.reason,
            "new_start": payload.new_start,
        })),
    )
    .await;

    tracing::info!(
        booking_id = id,
        from = %b.status,
        to = %updated.status,
        action = %payload.action,
        "Booking status changed"
    );
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyAction {
    Confirm,
    Remind,
    Cancel,
}

#[derive(Debug, Deserialize)]
pub struct VerifyPayload {
    pub booking_id: i64,
    pub action: VerifyAction,
}

/// POST /api/bookings/verify-payment - 线下付款核实
pub async fn verify_payment(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyPayload>,
) -> AppResult<Json<Booking>> {
    let b = require_booking(&state.pool, payload.booking_id).await?;
    let prof = require_profile(&state.pool, b.captain_id).await?;
    let trip = require_trip(&state.pool, b.trip_type_id).await?;

    let updated = match payload.action {
        VerifyAction::Confirm => {
            let next = transition(b.status, BookingAction::ConfirmDeposit)?;
            let split = split_payment(b.total_price_cents, trip.deposit_cents);
            let updated = booking::confirm_payment(
                &state.pool,
                b.id,
                next,
                split.payment_status,
                split.deposit_paid_cents,
                split.balance_due_cents,
            )
            .await?;

            // 收款已落库；确认邮件失败不回滚，也不阻断时间线记录
            let tz = time::parse_tz(&prof.timezone);
            if let Err(e) = state
                .email
                .send_booking_confirmed(
                    &updated,
                    &prof,
                    &time::format_local(updated.scheduled_start, tz),
                )
                .await
            {
                tracing::warn!(booking_id = b.id, error = %e, "Failed to send confirmation email");
            }

            audit::log(
                &state.pool,
                b.id,
                shared::models::LogEvent::PaymentConfirmed,
                shared::models::LogActor::Captain,
                format!("Payment confirmed ({})", split.payment_status),
                Some(json!({
                    "deposit_paid_cents": split.deposit_paid_cents,
                    "balance_due_cents": split.balance_due_cents,
                })),
            )
            .await;
            updated
        }
        VerifyAction::Remind => {
            if b.status != BookingStatus::PendingDeposit {
                return Err(AppError::business_rule(format!(
                    "Payment reminders only apply to pending_deposit bookings, not {}",
                    b.status
                )));
            }
            if b.payment_reminder_count >= MAX_PAYMENT_REMINDERS {
                return Err(AppError::validation(format!(
                    "Payment reminder limit of {MAX_PAYMENT_REMINDERS} reached"
                )));
            }
            state
                .email
                .send_payment_reminder(&b, &prof, trip.deposit_cents)
                .await?;
            let updated = booking::record_reminder(&state.pool, b.id).await?;

            audit::log(
                &state.pool,
                b.id,
                shared::models::LogEvent::PaymentReminderSent,
                shared::models::LogActor::Captain,
                format!(
                    "Payment reminder {} of {} sent",
                    updated.payment_reminder_count, MAX_PAYMENT_REMINDERS
                ),
                None,
            )
            .await;
            updated
        }
        VerifyAction::Cancel => {
            let next = transition(b.status, BookingAction::Cancel)?;
            let updated = booking::set_status(&state.pool, b.id, next).await?;

            audit::log(
                &state.pool,
                b.id,
                shared::models::LogEvent::StatusChanged,
                shared::models::LogActor::Captain,
                "Unpaid, cancelled by captain",
                None,
            )
            .await;
            updated
        }
    };

    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct AltPaymentPayload {
    pub booking_id: i64,
}

/// POST /api/bookings/complete-alt-payment - 客人声称已 Venmo/Zelle 付款
pub async fn complete_alt_payment(
    State(state): State<ServerState>,
    Json(payload): Json<AltPaymentPayload>,
) -> AppResult<Json<Booking>> {
    let b = require_booking(&state.pool, payload.booking_id).await?;
    if b.payment_status != PaymentStatus::Unpaid {
        return Err(AppError::business_rule(format!(
            "Payment is already {}",
            b.payment_status
        )));
    }

    let updated =
        booking::set_payment_status(&state.pool, b.id, PaymentStatus::PendingVerification).await?;

    audit::log(
        &state.pool,
        b.id,
        shared::models::LogEvent::PaymentClaimed,
        shared::models::LogActor::Guest,
        "Guest reported an offline payment, awaiting verification",
        None,
    )
    .await;

    Ok(Json(updated))
}

/// POST /api/bookings/:id/request-balance - 尾款请求邮件
pub async fn request_balance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let b = require_booking(&state.pool, id).await?;
    if b.payment_status != PaymentStatus::DepositPaid || b.balance_due_cents <= 0 {
        return Err(AppError::business_rule(
            "Balance can only be requested after the deposit is paid with a balance outstanding",
        ));
    }
    let prof = require_profile(&state.pool, b.captain_id).await?;

    let checkout_url = if prof.stripe_enabled {
        let success_url = format!("{}/bookings/{}", state.config.public_base_url, b.id);
        state
            .stripe
            .create_balance_checkout(
                b.id,
                &format!("Balance for trip with {}", prof.business_name),
                b.balance_due_cents,
                &success_url,
            )
            .await?
    } else {
        None
    };

    state
        .email
        .send_balance_request(&b, &prof, checkout_url.as_deref())
        .await?;

    audit::log(
        &state.pool,
        b.id,
        shared::models::LogEvent::BalanceRequested,
        shared::models::LogActor::Captain,
        "Balance request sent",
        Some(json!({
            "balance_due_cents": b.balance_due_cents,
            "checkout_link": checkout_url.is_some(),
        })),
    )
    .await;

    Ok(Json(b))
}

#[derive(Debug, Deserialize)]
pub struct MessagePayload {
    pub message: String,
}

/// POST /api/bookings/:id/send-message - 船长邮件消息
pub async fn send_message(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MessagePayload>,
) -> AppResult<Json<Booking>> {
    validate_required_text(&payload.message, "message", MAX_MESSAGE_LEN)?;

    let b = require_booking(&state.pool, id).await?;
    let prof = require_profile(&state.pool, b.captain_id).await?;

    state
        .email
        .send_captain_message(&b, &prof, &payload.message)
        .await?;

    audit::log(
        &state.pool,
        b.id,
        shared::models::LogEvent::MessageSent,
        shared::models::LogActor::Captain,
        "Message emailed to guest",
        Some(json!({ "message": payload.message })),
    )
    .await;

    Ok(Json(b))
}

/// POST /api/bookings/:id/send-sms - 船长短信
pub async fn send_sms(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MessagePayload>,
) -> AppResult<Json<Booking>> {
    validate_required_text(&payload.message, "message", MAX_MESSAGE_LEN)?;

    let b = require_booking(&state.pool, id).await?;
    let phone = b
        .guest_phone
        .as_deref()
        .ok_or_else(|| AppError::validation("Booking has no guest phone number"))?;

    state.sms.send(phone, &payload.message).await?;

    audit::log(
        &state.pool,
        b.id,
        shared::models::LogEvent::SmsSent,
        shared::models::LogActor::Captain,
        "SMS sent to guest",
        Some(json!({ "message": payload.message })),
    )
    .await;

    Ok(Json(b))
}

#[derive(Debug, Deserialize)]
pub struct DuplicatePayload {
    /// 新预订的开始时间 (millis)
    pub new_start: i64,
}

/// POST /api/bookings/:id/duplicate - 复制为新的 pending_deposit 预订
pub async fn duplicate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DuplicatePayload>,
) -> AppResult<Json<Booking>> {
    let source = require_booking(&state.pool, id).await?;
    let trip = require_trip(&state.pool, source.trip_type_id).await?;

    let new_end = payload.new_start + trip.duration_min * 60_000;
    ensure_slot_free(
        &state.pool,
        source.captain_id,
        payload.new_start,
        new_end,
        None,
    )
    .await?;

    let now = shared::util::now_millis();
    let copy = Booking {
        id: shared::util::snowflake_id(),
        scheduled_start: payload.new_start,
        scheduled_end: new_end,
        status: BookingStatus::PendingDeposit,
        payment_status: PaymentStatus::Unpaid,
        total_price_cents: trip.price_cents,
        deposit_paid_cents: 0,
        balance_due_cents: trip.price_cents,
        payment_reminder_count: 0,
        last_reminder_at: None,
        weather_hold_reason: None,
        original_start: None,
        created_at: now,
        updated_at: now,
        ..source.clone()
    };
    booking::create(&state.pool, &copy).await?;

    audit::log(
        &state.pool,
        copy.id,
        shared::models::LogEvent::BookingDuplicated,
        shared::models::LogActor::Captain,
        format!("Duplicated from booking {}", source.id),
        Some(json!({ "source_booking_id": source.id })),
    )
    .await;

    Ok(Json(copy))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub captain_id: i64,
    /// "YYYY-MM-DD" 含当日
    pub start_date: String,
    /// "YYYY-MM-DD" 含当日
    pub end_date: String,
}

/// GET /api/bookings/export?captain_id=&start_date=&end_date= - CSV 导出
///
/// 范围按 scheduled_start 在船长时区内 [start_date, end_date] 闭区间。
pub async fn export(
    State(state): State<ServerState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let prof = require_profile(&state.pool, query.captain_id).await?;
    let tz = time::parse_tz(&prof.timezone);

    let start = time::parse_date(&query.start_date)?;
    let end = time::parse_date(&query.end_date)?;
    if end < start {
        return Err(AppError::validation("end_date is before start_date"));
    }

    let rows = booking::find_all(
        &state.pool,
        query.captain_id,
        booking::BookingFilter {
            from: Some(time::day_start_millis(start, tz)),
            to: Some(time::day_end_millis(end, tz)),
            status: None,
        },
    )
    .await?;

    let csv = bookings_to_csv(&rows, tz)?;
    let filename = format!(
        "bookings_{}_{}.csv",
        query.start_date, query.end_date
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

/// GET /api/bookings/:id/logs - 时间线
pub async fn logs(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<BookingLog>>> {
    require_booking(&state.pool, id).await?;
    let entries = booking_log::find_by_booking(&state.pool, id).await?;
    Ok(Json(entries))
}
