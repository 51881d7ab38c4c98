use std::path::PathBuf;

/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/dockslot | 工作目录（数据库 / 日志） |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | PUBLIC_BASE_URL | http://localhost:3000 | 对外链接的基础 URL |
/// | EMAIL_API_BASE | https://api.resend.com | 邮件 API 地址 |
/// | EMAIL_API_KEY | (无) | 邮件 API key；未设置则邮件降级为 no-op |
/// | EMAIL_FROM | bookings@dockslot.app | 发件地址 |
/// | SMS_WEBHOOK_URL | (无) | 短信网关 webhook；未设置则短信降级为 no-op |
/// | STRIPE_SECRET_KEY | (无) | Stripe secret key；未设置则不生成支付链接 |
/// | WEATHER_API_BASE | (内置) | 天气 API 地址 |
/// | LOG_LEVEL | info | 日志级别 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/dockslot HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 对外链接的基础 URL（Stripe 回跳等）
    pub public_base_url: String,

    // === 出站集成 ===
    /// 邮件 API 地址
    pub email_api_base: String,
    /// 邮件 API key
    pub email_api_key: Option<String>,
    /// 发件地址
    pub email_from: String,
    /// 短信网关 webhook
    pub sms_webhook_url: Option<String>,
    /// Stripe secret key
    pub stripe_secret_key: Option<String>,
    /// 天气 API 地址覆盖
    pub weather_api_base: Option<String>,

    /// 日志级别
    pub log_level: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/dockslot".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            email_api_base: std::env::var("EMAIL_API_BASE")
                .unwrap_or_else(|_| "https://api.resend.com".into()),
            email_api_key: std::env::var("EMAIL_API_KEY").ok(),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "bookings@dockslot.app".into()),
            sms_webhook_url: std::env::var("SMS_WEBHOOK_URL").ok(),
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY").ok(),
            weather_api_base: std::env::var("WEATHER_API_BASE").ok(),

            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库文件路径 (work_dir/dockslot.db)
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("dockslot.db")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
