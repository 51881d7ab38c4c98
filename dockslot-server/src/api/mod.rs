//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`bookings`] - 预订生命周期 / 付款核实 / 消息 / 导出
//! - [`availability`] - 可用时段查询
//! - [`public`] - 公共页面（船长名片 / 预订确认 / 天气）
//! - [`trip_types`] - 行程类型管理
//! - [`vessels`] - 船只管理
//! - [`blackout_dates`] - 停航日期管理
//! - [`profile`] - 船长档案（含休眠开关）
//! - [`analytics`] - 经营分析
//! - [`search`] - 客人搜索

pub mod analytics;
pub mod availability;
pub mod blackout_dates;
pub mod bookings;
pub mod health;
pub mod profile;
pub mod public;
pub mod search;
pub mod trip_types;
pub mod vessels;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// 组装完整路由树
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(bookings::router())
        .merge(availability::router())
        .merge(public::router())
        .merge(trip_types::router())
        .merge(vessels::router())
        .merge(blackout_dates::router())
        .merge(profile::router())
        .merge(analytics::router())
        .merge(search::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
