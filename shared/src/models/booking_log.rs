//! Booking Log Model
//!
//! 预订时间线：append-only，无更新/删除接口。

use serde::{Deserialize, Serialize};

/// 时间线事件类型（枚举，非自由文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum LogEvent {
    /// 预订创建（公共流程）
    BookingCreated,
    /// 状态变更（任何生命周期动作）
    StatusChanged,
    /// 付款确认（定金或全额）
    PaymentConfirmed,
    /// 付款提醒已发送
    PaymentReminderSent,
    /// 客人声称已线下支付
    PaymentClaimed,
    /// 尾款请求已发送
    BalanceRequested,
    /// 预订字段更新（含字段 diff）
    BookingUpdated,
    /// 船长消息已发送
    MessageSent,
    /// 短信已发送
    SmsSent,
    /// 从已有预订复制
    BookingDuplicated,
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BookingCreated => "booking_created",
            Self::StatusChanged => "status_changed",
            Self::PaymentConfirmed => "payment_confirmed",
            Self::PaymentReminderSent => "payment_reminder_sent",
            Self::PaymentClaimed => "payment_claimed",
            Self::BalanceRequested => "balance_requested",
            Self::BookingUpdated => "booking_updated",
            Self::MessageSent => "message_sent",
            Self::SmsSent => "sms_sent",
            Self::BookingDuplicated => "booking_duplicated",
        };
        f.write_str(s)
    }
}

/// 事件发起方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum LogActor {
    Captain,
    Guest,
    System,
}

/// Booking log entry (不可变)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingLog {
    pub id: i64,
    pub booking_id: i64,
    pub event: LogEvent,
    pub actor: LogActor,
    /// 人类可读摘要
    pub message: String,
    /// 结构化详情（JSON 文本，字段 diff 等）
    pub details: Option<String>,
    pub created_at: i64,
}
