//! 服务层 - 出站集成
//!
//! # 服务列表
//!
//! - [`EmailService`] - 事务邮件（确认 / 提醒 / 尾款请求 / 船长消息）
//! - [`SmsService`] - 短信转发
//! - [`StripeService`] - Stripe Checkout 尾款支付链接
//! - [`WeatherService`] - 天气预报查询
//!
//! 所有服务未配置时自动降级为 no-op：主操作照常成功，只记日志。

pub mod email;
pub mod sms;
pub mod stripe;
pub mod weather;

pub use email::EmailService;
pub use sms::SmsService;
pub use stripe::StripeService;
pub use weather::WeatherService;
