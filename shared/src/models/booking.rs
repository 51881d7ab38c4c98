//! Booking Model

use serde::{Deserialize, Serialize};

use crate::booking::{BookingStatus, PaymentStatus};

/// Booking entity (预订)
///
/// `tags` 以逗号分隔存储，见 [`crate::util::join_tags`]。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub captain_id: i64,
    pub trip_type_id: i64,
    pub vessel_id: Option<i64>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    /// Unix millis
    pub scheduled_start: i64,
    /// Unix millis (start + trip duration)
    pub scheduled_end: i64,
    pub party_size: i64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub total_price_cents: i64,
    pub deposit_paid_cents: i64,
    pub balance_due_cents: i64,
    /// 已发送的付款提醒次数（上限 2）
    pub payment_reminder_count: i64,
    pub last_reminder_at: Option<i64>,
    pub weather_hold_reason: Option<String>,
    /// 首次改期前的原始开始时间
    pub original_start: Option<i64>,
    pub internal_notes: Option<String>,
    /// Comma-joined tag set
    pub tags: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create booking payload (public flow)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub captain_id: i64,
    pub trip_type_id: i64,
    pub vessel_id: Option<i64>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub scheduled_start: i64,
    pub party_size: i64,
}

/// Update booking payload (dashboard, partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingUpdate {
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub party_size: Option<i64>,
    pub internal_notes: Option<String>,
    pub tags: Option<Vec<String>>,
}
