//! Booking API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/bookings | POST | 公共创建（pending_deposit） |
//! | /api/bookings | GET | 列表（captain_id + 时间/状态过滤） |
//! | /api/bookings/export | GET | CSV 导出 |
//! | /api/bookings/verify-payment | POST | 付款核实 confirm/remind/cancel |
//! | /api/bookings/complete-alt-payment | POST | 客人声称已线下支付 |
//! | /api/bookings/{id} | GET/PUT | 详情 / 编辑 |
//! | /api/bookings/{id}/status | POST | 生命周期动作（经转换表） |
//! | /api/bookings/{id}/request-balance | POST | 尾款请求 |
//! | /api/bookings/{id}/send-message | POST | 船长邮件消息 |
//! | /api/bookings/{id}/send-sms | POST | 船长短信 |
//! | /api/bookings/{id}/duplicate | POST | 复制为新预订 |
//! | /api/bookings/{id}/logs | GET | 时间线 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/export", get(handler::export))
        .route("/verify-payment", post(handler::verify_payment))
        .route("/complete-alt-payment", post(handler::complete_alt_payment))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/status", post(handler::apply_action))
        .route("/{id}/request-balance", post(handler::request_balance))
        .route("/{id}/send-message", post(handler::send_message))
        .route("/{id}/send-sms", post(handler::send_sms))
        .route("/{id}/duplicate", post(handler::duplicate))
        .route("/{id}/logs", get(handler::logs))
}
