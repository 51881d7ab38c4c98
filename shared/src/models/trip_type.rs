//! Trip Type Model

use serde::{Deserialize, Serialize};

/// Trip type entity (行程类型)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TripType {
    pub id: i64,
    pub captain_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub duration_min: i64,
    pub price_cents: i64,
    pub deposit_cents: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create trip type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripTypeCreate {
    pub captain_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub duration_min: i64,
    pub price_cents: i64,
    pub deposit_cents: i64,
}

/// Update trip type payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripTypeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_min: Option<i64>,
    pub price_cents: Option<i64>,
    pub deposit_cents: Option<i64>,
    pub is_active: Option<bool>,
}
