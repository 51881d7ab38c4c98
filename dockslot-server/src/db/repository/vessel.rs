//! Vessel Repository

use super::{RepoError, RepoResult};
use shared::models::{Vessel, VesselCreate, VesselUpdate};
use sqlx::SqlitePool;

const VESSEL_SELECT: &str =
    "SELECT id, captain_id, name, capacity, created_at, updated_at FROM vessel";

pub async fn find_all(pool: &SqlitePool, captain_id: i64) -> RepoResult<Vec<Vessel>> {
    let sql = format!("{} WHERE captain_id = ? ORDER BY name ASC", VESSEL_SELECT);
    let rows = sqlx::query_as::<_, Vessel>(&sql)
        .bind(captain_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Vessel>> {
    let sql = format!("{} WHERE id = ?", VESSEL_SELECT);
    let row = sqlx::query_as::<_, Vessel>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: VesselCreate) -> RepoResult<Vessel> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO vessel (id, captain_id, name, capacity, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.captain_id)
    .bind(&data.name)
    .bind(data.capacity)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create vessel".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: VesselUpdate) -> RepoResult<Vessel> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE vessel SET name = COALESCE(?, name), capacity = COALESCE(?, capacity), updated_at = ? WHERE id = ?",
    )
    .bind(data.name)
    .bind(data.capacity)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Vessel {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Vessel {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM vessel WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
