//! Trip Type Repository

use super::{RepoError, RepoResult};
use shared::models::{TripType, TripTypeCreate, TripTypeUpdate};
use sqlx::SqlitePool;

const TRIP_TYPE_SELECT: &str = "SELECT id, captain_id, title, description, duration_min, price_cents, deposit_cents, is_active, created_at, updated_at FROM trip_type";

pub async fn find_all(pool: &SqlitePool, captain_id: i64) -> RepoResult<Vec<TripType>> {
    let sql = format!(
        "{} WHERE captain_id = ? ORDER BY created_at DESC",
        TRIP_TYPE_SELECT
    );
    let rows = sqlx::query_as::<_, TripType>(&sql)
        .bind(captain_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_active(pool: &SqlitePool, captain_id: i64) -> RepoResult<Vec<TripType>> {
    let sql = format!(
        "{} WHERE captain_id = ? AND is_active = 1 ORDER BY price_cents ASC",
        TRIP_TYPE_SELECT
    );
    let rows = sqlx::query_as::<_, TripType>(&sql)
        .bind(captain_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<TripType>> {
    let sql = format!("{} WHERE id = ?", TRIP_TYPE_SELECT);
    let row = sqlx::query_as::<_, TripType>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: TripTypeCreate) -> RepoResult<TripType> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO trip_type (id, captain_id, title, description, duration_min, price_cents, deposit_cents, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(data.captain_id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.duration_min)
    .bind(data.price_cents)
    .bind(data.deposit_cents)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create trip type".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: TripTypeUpdate) -> RepoResult<TripType> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE trip_type SET title = COALESCE(?, title), description = COALESCE(?, description), duration_min = COALESCE(?, duration_min), price_cents = COALESCE(?, price_cents), deposit_cents = COALESCE(?, deposit_cents), is_active = COALESCE(?, is_active), updated_at = ? WHERE id = ?",
    )
    .bind(data.title)
    .bind(data.description)
    .bind(data.duration_min)
    .bind(data.price_cents)
    .bind(data.deposit_cents)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Trip type {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Trip type {id} not found")))
}

/// 软删除：下架后不再出现在公共列表，历史预订仍可引用
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE trip_type SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
