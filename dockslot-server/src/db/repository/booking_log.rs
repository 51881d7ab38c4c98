//! Booking Log Repository
//!
//! Append-only：只有 insert 和按预订查询，没有更新/删除。

use super::RepoResult;
use shared::models::BookingLog;
use sqlx::SqlitePool;

pub async fn insert(pool: &SqlitePool, log: &BookingLog) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO booking_log (id, booking_id, event, actor, message, details, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(log.id)
    .bind(log.booking_id)
    .bind(log.event)
    .bind(log.actor)
    .bind(&log.message)
    .bind(&log.details)
    .bind(log.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_booking(pool: &SqlitePool, booking_id: i64) -> RepoResult<Vec<BookingLog>> {
    let rows = sqlx::query_as::<_, BookingLog>(
        "SELECT id, booking_id, event, actor, message, details, created_at FROM booking_log WHERE booking_id = ? ORDER BY created_at ASC, id ASC",
    )
    .bind(booking_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
