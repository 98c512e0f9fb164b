use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::utils::http::timestamp;
use crate::utils::process::{self, MemoryUsage};
use crate::web::ApiError;
use crate::AppContext;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    /// Seconds since the server started.
    pub uptime: f64,
    pub timestamp: String,
    pub memory: MemoryUsage,
    pub env: String,
}

pub async fn status(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<StatusResponse>, ApiError> {
    // sysinfo reads /proc synchronously
    let memory = tokio::task::spawn_blocking(process::memory_usage)
        .await
        .map_err(|e| anyhow::anyhow!("Memory usage task failed: {}", e))??;

    Ok(Json(StatusResponse {
        status: "API Online",
        uptime: ctx.started_at.elapsed().as_secs_f64(),
        timestamp: timestamp(),
        memory,
        env: ctx.config.env.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::utils::logger::MemoryLog;

    #[tokio::test]
    async fn test_status_reports_memory_from_blocking_pool() {
        let ctx = Arc::new(AppContext::new(Config::default(), Arc::new(MemoryLog::new())));

        let handles: Vec<_> = (0..4)
            .map(|_| tokio::spawn(status(State(ctx.clone()))))
            .collect();

        for handle in handles {
            let Json(response) = handle.await.unwrap().unwrap();
            assert_eq!(response.status, "API Online");
            assert_eq!(response.env, "development");
            assert!(response.memory.rss > 0);
            assert!(response.uptime >= 0.0);
        }
    }
}
