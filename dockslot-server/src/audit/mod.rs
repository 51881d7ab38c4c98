//! 预订时间线模块
//!
//! 每个敏感操作（创建、状态变更、付款、消息）都会在 booking_log
//! 追加一条不可变记录。记录失败只告警，不影响主操作。

pub mod diff;

pub use diff::{create_diff, create_snapshot};

use serde_json::Value;
use sqlx::SqlitePool;

use shared::models::{BookingLog, LogActor, LogEvent};

/// Append a timeline entry for a booking.
///
/// Log failures are swallowed with a warning: the primary mutation has
/// already committed and must not be rolled back by telemetry.
pub async fn log(
    pool: &SqlitePool,
    booking_id: i64,
    event: LogEvent,
    actor: LogActor,
    message: impl Into<String>,
    details: Option<Value>,
) {
    let entry = BookingLog {
        id: shared::util::snowflake_id(),
        booking_id,
        event,
        actor,
        message: message.into(),
        details: details.map(|d| d.to_string()),
        created_at: shared::util::now_millis(),
    };

    if let Err(e) = crate::db::repository::booking_log::insert(pool, &entry).await {
        tracing::warn!(
            booking_id,
            event = %event,
            error = %e,
            "Failed to append booking log entry"
        );
    }
}
