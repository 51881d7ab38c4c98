//! 公共 API 模块（无需船长身份）
//!
//! - 船长名片 + 在售行程
//! - 预订确认查询（只暴露客人可见字段）
//! - 天气预报转发

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/captains/{captain_id}", get(handler::captain_card))
        .route("/bookings/{id}", get(handler::booking_lookup))
        .route("/weather", get(handler::weather))
}
