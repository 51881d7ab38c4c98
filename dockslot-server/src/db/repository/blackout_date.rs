//! Blackout Date Repository

use super::{RepoError, RepoResult};
use shared::models::{BlackoutDate, BlackoutDateCreate};
use sqlx::SqlitePool;

const BLACKOUT_SELECT: &str =
    "SELECT id, captain_id, start_date, end_date, reason, created_at FROM blackout_date";

pub async fn find_all(pool: &SqlitePool, captain_id: i64) -> RepoResult<Vec<BlackoutDate>> {
    let sql = format!(
        "{} WHERE captain_id = ? ORDER BY start_date ASC",
        BLACKOUT_SELECT
    );
    let rows = sqlx::query_as::<_, BlackoutDate>(&sql)
        .bind(captain_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// 覆盖给定日期的停航区间（"YYYY-MM-DD" 字典序即日期序）
pub async fn find_covering(
    pool: &SqlitePool,
    captain_id: i64,
    date: &str,
) -> RepoResult<Vec<BlackoutDate>> {
    let sql = format!(
        "{} WHERE captain_id = ? AND start_date <= ? AND end_date >= ?",
        BLACKOUT_SELECT
    );
    let rows = sqlx::query_as::<_, BlackoutDate>(&sql)
        .bind(captain_id)
        .bind(date)
        .bind(date)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: BlackoutDateCreate) -> RepoResult<BlackoutDate> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let end_date = data.end_date.unwrap_or_else(|| data.start_date.clone());
    sqlx::query(
        "INSERT INTO blackout_date (id, captain_id, start_date, end_date, reason, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.captain_id)
    .bind(&data.start_date)
    .bind(&end_date)
    .bind(&data.reason)
    .bind(now)
    .execute(pool)
    .await?;

    let sql = format!("{} WHERE id = ?", BLACKOUT_SELECT);
    sqlx::query_as::<_, BlackoutDate>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create blackout date".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM blackout_date WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
