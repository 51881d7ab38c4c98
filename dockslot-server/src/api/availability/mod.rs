//! 可用时段 API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/availability/{captain_id}/{trip_type_id}",
        get(handler::list_slots),
    )
}
