//! Profile Repository

use super::{RepoError, RepoResult};
use shared::models::{Profile, ProfileUpdate};
use sqlx::SqlitePool;

const PROFILE_SELECT: &str = "SELECT id, business_name, contact_email, contact_phone, show_email, show_phone, brand_color, timezone, cancellation_policy, day_start, day_end, slot_step_min, stripe_enabled, venmo_handle, zelle_address, hibernating, hibernate_until, created_at, updated_at FROM profile";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Profile>> {
    let sql = format!("{} WHERE id = ?", PROFILE_SELECT);
    let row = sqlx::query_as::<_, Profile>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, profile: &Profile) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO profile (id, business_name, contact_email, contact_phone, show_email, show_phone, brand_color, timezone, cancellation_policy, day_start, day_end, slot_step_min, stripe_enabled, venmo_handle, zelle_address, hibernating, hibernate_until, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(profile.id)
    .bind(&profile.business_name)
    .bind(&profile.contact_email)
    .bind(&profile.contact_phone)
    .bind(profile.show_email)
    .bind(profile.show_phone)
    .bind(&profile.brand_color)
    .bind(&profile.timezone)
    .bind(&profile.cancellation_policy)
    .bind(&profile.day_start)
    .bind(&profile.day_end)
    .bind(profile.slot_step_min)
    .bind(profile.stripe_enabled)
    .bind(&profile.venmo_handle)
    .bind(&profile.zelle_address)
    .bind(profile.hibernating)
    .bind(&profile.hibernate_until)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProfileUpdate) -> RepoResult<Profile> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE profile SET business_name = COALESCE(?, business_name), contact_email = COALESCE(?, contact_email), contact_phone = COALESCE(?, contact_phone), show_email = COALESCE(?, show_email), show_phone = COALESCE(?, show_phone), brand_color = COALESCE(?, brand_color), timezone = COALESCE(?, timezone), cancellation_policy = COALESCE(?, cancellation_policy), day_start = COALESCE(?, day_start), day_end = COALESCE(?, day_end), slot_step_min = COALESCE(?, slot_step_min), stripe_enabled = COALESCE(?, stripe_enabled), venmo_handle = COALESCE(?, venmo_handle), zelle_address = COALESCE(?, zelle_address), hibernating = COALESCE(?, hibernating), hibernate_until = COALESCE(?, hibernate_until), updated_at = ? WHERE id = ?",
    )
    .bind(data.business_name)
    .bind(data.contact_email)
    .bind(data.contact_phone)
    .bind(data.show_email)
    .bind(data.show_phone)
    .bind(data.brand_color)
    .bind(data.timezone)
    .bind(data.cancellation_policy)
    .bind(data.day_start)
    .bind(data.day_end)
    .bind(data.slot_step_min)
    .bind(data.stripe_enabled)
    .bind(data.venmo_handle)
    .bind(data.zelle_address)
    .bind(data.hibernating)
    .bind(data.hibernate_until)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Profile {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Profile {id} not found")))
}
