//! 预订领域逻辑
//!
//! - [`payment`] - 定金/尾款的分账算术（verify-payment 的核心）
//! - [`export`] - Dashboard CSV 导出
//!
//! 状态机本体在 `shared::booking`，这里只有围绕它的算术和格式化。

pub mod export;
pub mod payment;
