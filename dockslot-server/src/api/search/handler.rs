//! Search API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::booking;
use crate::utils::AppResult;
use shared::models::Booking;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub captain_id: i64,
    pub q: String,
}

/// GET /api/search?captain_id=&q= - 按姓名/邮箱/电话搜索预订
///
/// 空查询直接返回空列表，不打扰数据库。
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let rows = booking::search(&state.pool, query.captain_id, q).await?;
    Ok(Json(rows))
}
