//! Captain Profile Model

use serde::{Deserialize, Serialize};

/// Captain profile entity (船长档案)
///
/// `timezone` 是 IANA 名称（如 "America/New_York"），
/// 所有日期/时段计算都在该时区进行。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Profile {
    pub id: i64,
    pub business_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub show_email: bool,
    pub show_phone: bool,
    pub brand_color: Option<String>,
    pub timezone: String,
    pub cancellation_policy: Option<String>,
    /// 营业窗口开始 "HH:MM"
    pub day_start: String,
    /// 营业窗口结束 "HH:MM"
    pub day_end: String,
    /// 候选时段步长（分钟）
    pub slot_step_min: i64,
    pub stripe_enabled: bool,
    pub venmo_handle: Option<String>,
    pub zelle_address: Option<String>,
    /// 休眠：公共预订全部关闭
    pub hibernating: bool,
    /// 预计恢复日期 "YYYY-MM-DD"
    pub hibernate_until: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Update profile payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub business_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub show_email: Option<bool>,
    pub show_phone: Option<bool>,
    pub brand_color: Option<String>,
    pub timezone: Option<String>,
    pub cancellation_policy: Option<String>,
    pub day_start: Option<String>,
    pub day_end: Option<String>,
    pub slot_step_min: Option<i64>,
    pub stripe_enabled: Option<bool>,
    pub venmo_handle: Option<String>,
    pub zelle_address: Option<String>,
    pub hibernating: Option<bool>,
    pub hibernate_until: Option<String>,
}

/// Public profile card (guest-facing, contact fields honor visibility flags)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: i64,
    pub business_name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub brand_color: Option<String>,
    pub cancellation_policy: Option<String>,
    pub venmo_handle: Option<String>,
    pub zelle_address: Option<String>,
    pub stripe_enabled: bool,
    pub hibernating: bool,
    pub hibernate_until: Option<String>,
}

impl From<Profile> for PublicProfile {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            business_name: p.business_name,
            contact_email: p.show_email.then_some(p.contact_email),
            contact_phone: if p.show_phone { p.contact_phone } else { None },
            brand_color: p.brand_color,
            cancellation_policy: p.cancellation_policy,
            venmo_handle: p.venmo_handle,
            zelle_address: p.zelle_address,
            stripe_enabled: p.stripe_enabled,
            hibernating: p.hibernating,
            hibernate_until: p.hibernate_until,
        }
    }
}
