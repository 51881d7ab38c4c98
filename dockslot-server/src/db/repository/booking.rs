//! Booking Repository
//!
//! 状态守卫不在这里：调用方先经过 `shared::transition`，
//! repository 只负责落盘。

use super::{RepoError, RepoResult};
use shared::booking::{BookingStatus, PaymentStatus};
use shared::models::Booking;
use sqlx::SqlitePool;

const BOOKING_SELECT: &str = "SELECT id, captain_id, trip_type_id, vessel_id, guest_name, guest_email, guest_phone, scheduled_start, scheduled_end, party_size, status, payment_status, total_price_cents, deposit_paid_cents, balance_due_cents, payment_reminder_count, last_reminder_at, weather_hold_reason, original_start, internal_notes, tags, created_at, updated_at FROM booking";

/// 占用时段的状态（与 [`BookingStatus::occupies_slot`] 一致）
const OCCUPYING: &str = "('pending_deposit', 'confirmed', 'rescheduled', 'weather_hold')";

/// Dashboard list filter
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// scheduled_start >= from (millis)
    pub from: Option<i64>,
    /// scheduled_start < to (millis)
    pub to: Option<i64>,
    pub status: Option<BookingStatus>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let sql = format!("{} WHERE id = ?", BOOKING_SELECT);
    let row = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(
    pool: &SqlitePool,
    captain_id: i64,
    filter: BookingFilter,
) -> RepoResult<Vec<Booking>> {
    let mut sql = format!("{} WHERE captain_id = ?", BOOKING_SELECT);
    if filter.from.is_some() {
        sql.push_str(" AND scheduled_start >= ?");
    }
    if filter.to.is_some() {
        sql.push_str(" AND scheduled_start < ?");
    }
    if filter.status.is_some() {
        sql.push_str(" AND status = ?");
    }
    sql.push_str(" ORDER BY scheduled_start ASC");

    let mut query = sqlx::query_as::<_, Booking>(&sql).bind(captain_id);
    if let Some(from) = filter.from {
        query = query.bind(from);
    }
    if let Some(to) = filter.to {
        query = query.bind(to);
    }
    if let Some(status) = filter.status {
        query = query.bind(status);
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

/// 与 [start, end) 重叠、且占用时段的预订
pub async fn find_overlapping(
    pool: &SqlitePool,
    captain_id: i64,
    start: i64,
    end: i64,
) -> RepoResult<Vec<Booking>> {
    let sql = format!(
        "{} WHERE captain_id = ? AND status IN {} AND scheduled_start < ? AND scheduled_end > ?",
        BOOKING_SELECT, OCCUPYING
    );
    let rows = sqlx::query_as::<_, Booking>(&sql)
        .bind(captain_id)
        .bind(end)
        .bind(start)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// 按客人姓名/邮箱/电话模糊搜索
pub async fn search(pool: &SqlitePool, captain_id: i64, query: &str) -> RepoResult<Vec<Booking>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{} WHERE captain_id = ?1 AND (guest_name LIKE ?2 OR guest_email LIKE ?2 OR guest_phone LIKE ?2) ORDER BY scheduled_start DESC LIMIT 50",
        BOOKING_SELECT
    );
    let rows = sqlx::query_as::<_, Booking>(&sql)
        .bind(captain_id)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a fully built booking row (caller computes pricing/times/IDs)
pub async fn create(pool: &SqlitePool, b: &Booking) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO booking (id, captain_id, trip_type_id, vessel_id, guest_name, guest_email, guest_phone, scheduled_start, scheduled_end, party_size, status, payment_status, total_price_cents, deposit_paid_cents, balance_due_cents, payment_reminder_count, last_reminder_at, weather_hold_reason, original_start, internal_notes, tags, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(b.id)
    .bind(b.captain_id)
    .bind(b.trip_type_id)
    .bind(b.vessel_id)
    .bind(&b.guest_name)
    .bind(&b.guest_email)
    .bind(&b.guest_phone)
    .bind(b.scheduled_start)
    .bind(b.scheduled_end)
    .bind(b.party_size)
    .bind(b.status)
    .bind(b.payment_status)
    .bind(b.total_price_cents)
    .bind(b.deposit_paid_cents)
    .bind(b.balance_due_cents)
    .bind(b.payment_reminder_count)
    .bind(b.last_reminder_at)
    .bind(&b.weather_hold_reason)
    .bind(b.original_start)
    .bind(&b.internal_notes)
    .bind(&b.tags)
    .bind(b.created_at)
    .bind(b.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Partial update of guest/notes/tags fields (dashboard edit)
pub async fn update_info(
    pool: &SqlitePool,
    id: i64,
    guest_name: Option<String>,
    guest_email: Option<String>,
    guest_phone: Option<String>,
    party_size: Option<i64>,
    internal_notes: Option<String>,
    tags: Option<String>,
) -> RepoResult<Booking> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE booking SET guest_name = COALESCE(?, guest_name), guest_email = COALESCE(?, guest_email), guest_phone = COALESCE(?, guest_phone), party_size = COALESCE(?, party_size), internal_notes = COALESCE(?, internal_notes), tags = COALESCE(?, tags), updated_at = ? WHERE id = ?",
    )
    .bind(guest_name)
    .bind(guest_email)
    .bind(guest_phone)
    .bind(party_size)
    .bind(internal_notes)
    .bind(tags)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    require(pool, id).await
}

/// Plain status write (confirm/cancel/complete/no-show/expire)
pub async fn set_status(pool: &SqlitePool, id: i64, status: BookingStatus) -> RepoResult<Booking> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE booking SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    require(pool, id).await
}

/// 进入天气待定，记录原因
pub async fn set_weather_hold(pool: &SqlitePool, id: i64, reason: &str) -> RepoResult<Booking> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE booking SET status = 'weather_hold', weather_hold_reason = ?, updated_at = ? WHERE id = ?",
    )
    .bind(reason)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    require(pool, id).await
}

/// 改期：COALESCE 保证 original_start 只在首次改期时写入。
/// weather_hold_reason 保留作为历史（分析层用它识别曾经天气待定的预订）。
pub async fn apply_reschedule(
    pool: &SqlitePool,
    id: i64,
    new_start: i64,
    new_end: i64,
    previous_start: i64,
) -> RepoResult<Booking> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE booking SET status = 'rescheduled', scheduled_start = ?, scheduled_end = ?, original_start = COALESCE(original_start, ?), updated_at = ? WHERE id = ?",
    )
    .bind(new_start)
    .bind(new_end)
    .bind(previous_start)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    require(pool, id).await
}

/// 付款确认：写入支付状态 + 金额拆分 + 预订状态
pub async fn confirm_payment(
    pool: &SqlitePool,
    id: i64,
    status: BookingStatus,
    payment_status: PaymentStatus,
    deposit_paid_cents: i64,
    balance_due_cents: i64,
) -> RepoResult<Booking> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE booking SET status = ?, payment_status = ?, deposit_paid_cents = ?, balance_due_cents = ?, updated_at = ? WHERE id = ?",
    )
    .bind(status)
    .bind(payment_status)
    .bind(deposit_paid_cents)
    .bind(balance_due_cents)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    require(pool, id).await
}

pub async fn set_payment_status(
    pool: &SqlitePool,
    id: i64,
    payment_status: PaymentStatus,
) -> RepoResult<Booking> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE booking SET payment_status = ?, updated_at = ? WHERE id = ?")
        .bind(payment_status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    require(pool, id).await
}

/// 记录一次付款提醒（计数 + 时间戳）
pub async fn record_reminder(pool: &SqlitePool, id: i64) -> RepoResult<Booking> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE booking SET payment_reminder_count = payment_reminder_count + 1, last_reminder_at = ?, updated_at = ? WHERE id = ?",
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    require(pool, id).await
}

async fn require(pool: &SqlitePool, id: i64) -> RepoResult<Booking> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}
