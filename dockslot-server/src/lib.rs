//! DockSlot Server - 租船预订 SaaS 后端
//!
//! # 架构概述
//!
//! 本模块是 DockSlot 后端的主入口，提供以下核心功能：
//!
//! - **预订生命周期** (`api/bookings` + `shared::transition`): 状态机驱动
//! - **可用时段** (`availability`): 营业窗口 / 停航日 / 冲突剔除
//! - **付款核实** (`bookings/payment`): 定金分账、提醒上限
//! - **经营分析** (`analytics`): 月度营收、天气恢复率、回头客
//! - **时间线** (`audit`): append-only 预订日志
//! - **出站集成** (`services`): 邮件 / 短信 / Stripe / 天气
//!
//! # 模块结构
//!
//! ```text
//! dockslot-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # SQLite 连接与仓储
//! ├── audit/         # 预订时间线 + 字段 diff
//! ├── bookings/      # 付款算术、CSV 导出
//! ├── services/      # 出站集成客户端
//! ├── availability.rs
//! ├── analytics.rs
//! └── utils/         # 错误、日志、时间、校验
//! ```

pub mod analytics;
pub mod api;
pub mod audit;
pub mod availability;
pub mod bookings;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____             __   _____ __      __
   / __ \____  _____/ /__/ ___// /___  / /_
  / / / / __ \/ ___/ //_/\__ \/ / __ \/ __/
 / /_/ / /_/ / /__/ ,<  ___/ / / /_/ / /_
/_____/\____/\___/_/|_|/____/_/\____/\__/
    "#
    );
}
