use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{EmailService, SmsService, StripeService, WeatherService};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是处理器共享的核心数据结构。
/// SqlitePool 与各服务内部都是 Arc，Clone 成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | email | EmailService | 事务邮件 |
/// | sms | SmsService | 短信转发 |
/// | stripe | StripeService | 尾款支付链接 |
/// | weather | WeatherService | 天气预报 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 事务邮件服务
    pub email: EmailService,
    /// 短信转发服务
    pub sms: SmsService,
    /// Stripe Checkout 服务
    pub stripe: StripeService,
    /// 天气预报服务
    pub weather: WeatherService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/dockslot.db，自动执行迁移)
    /// 3. 出站服务 (Email, SMS, Stripe, Weather)
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::with_pool(config.clone(), db_service.pool)
    }

    /// 用现成的连接池构造状态
    ///
    /// 测试场景配合 [`DbService::in_memory`] 使用
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let email = EmailService::new(
            config.email_api_base.clone(),
            config.email_api_key.clone(),
            config.email_from.clone(),
        );
        let sms = SmsService::new(config.sms_webhook_url.clone());
        let stripe = StripeService::new(config.stripe_secret_key.clone());
        let weather = WeatherService::new(config.weather_api_base.clone());

        Self {
            config,
            pool,
            email,
            sms,
            stripe,
            weather,
        }
    }
}
