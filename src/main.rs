// ==========================================
// 焊接检验记录系统 - HTTP 服务主入口
// ==========================================
// 技术栈: Axum + Rust + SQLite
// ==========================================

use std::sync::Arc;

use welding_log::app::{build_router, AppState};
use welding_log::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    welding_log::logging::init();

    tracing::info!("==================================================");
    tracing::info!("焊接检验记录系统 - 后端服务");
    tracing::info!("系统版本: {}", welding_log::VERSION);
    tracing::info!("==================================================");

    // 加载配置
    let config = AppConfig::from_env();
    tracing::info!("使用数据库: {}", config.db_path);
    tracing::info!("上传目录: {}", config.upload_dir.display());

    // 创建 AppState
    tracing::info!("正在初始化 AppState...");
    let state = AppState::new(config.db_path.clone(), config.upload_dir.clone())
        .map_err(|e| anyhow::anyhow!("无法初始化 AppState: {}", e))?;
    tracing::info!("AppState 初始化成功");

    // 启动 HTTP 服务
    let router = build_router(Arc::new(state));
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("监听地址: http://{}", addr);

    axum::serve(listener, router).await?;

    tracing::info!("服务已退出");
    Ok(())
}
