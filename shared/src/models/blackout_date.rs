//! Blackout Date Model

use serde::{Deserialize, Serialize};

/// Blackout date entity (停航日期)
///
/// 日期为 "YYYY-MM-DD"，区间含两端；单日时 start == end。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BlackoutDate {
    pub id: i64,
    pub captain_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
    pub created_at: i64,
}

/// Create blackout date payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackoutDateCreate {
    pub captain_id: i64,
    pub start_date: String,
    /// 省略时按单日处理
    pub end_date: Option<String>,
    pub reason: Option<String>,
}
