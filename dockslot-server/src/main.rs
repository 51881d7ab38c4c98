use dockslot_server::{Config, Server, ServerState, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env + 配置
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. 初始化日志（工作目录就绪后写入滚动文件）
    config.ensure_work_dir_structure()?;
    dockslot_server::init_logger_with_file(
        Some(&config.log_level),
        config.log_dir().to_str(),
    );

    print_banner();
    tracing::info!("⚓ DockSlot Server starting...");

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config).await;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
