use comanda_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 日志
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    print_banner();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "🍽️ Comanda server starting...");

    // 4. 初始化服务器状态 (数据文件)
    let state = ServerState::initialize(&config).await?;

    // 5. 启动 HTTP 服务器 (Server::run 会启动后台任务)
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
