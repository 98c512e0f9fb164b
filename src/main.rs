#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use webhook_receiver::{
    config::Config,
    utils::logger::{self, TracingLog},
    AppContext,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    let _guard = logger::init()?;

    let config = Config::from_env()?;

    info!(
        version = env!("GIT_HASH"),
        port = config.port,
        env = %config.env,
        "Starting webhook receiver..."
    );

    let ctx = Arc::new(AppContext::new(config, Arc::new(TracingLog)));

    // 启动 HTTP 服务器
    match webhook_receiver::web::start_server(ctx).await {
        Ok(_) => info!("Server stopped gracefully"),
        Err(e) => {
            tracing::error!("Server error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
