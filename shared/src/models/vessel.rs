//! Vessel Model

use serde::{Deserialize, Serialize};

/// Vessel entity (船只) — 只用于限制人数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Vessel {
    pub id: i64,
    pub captain_id: i64,
    pub name: String,
    pub capacity: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create vessel payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselCreate {
    pub captain_id: i64,
    pub name: String,
    pub capacity: i64,
}

/// Update vessel payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VesselUpdate {
    pub name: Option<String>,
    pub capacity: Option<i64>,
}
