use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

pub mod body;
pub mod error;
pub mod handlers;
mod middleware;


pub use body::{RequestBody, BODY_LIMIT};
pub use error::{ApiError, FaultDetail};

use crate::AppContext;

/// The full application: routes plus CORS, access logging and fault capture.
pub fn app(ctx: Arc<AppContext>) -> Router {
    with_middleware(handlers::router(), ctx)
}

/// Wraps any set of routes in the request pipeline. Layers run outermost
/// first: CORS, access log, panic capture, then the route itself.
pub fn with_middleware(router: Router<Arc<AppContext>>, ctx: Arc<AppContext>) -> Router {
    router
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(axum::middleware::from_fn_with_state(
            ctx.clone(),
            middleware::access_log,
        ))
        .layer(middleware::cors_layer())
        .with_state(ctx)
}

pub async fn start_server(ctx: Arc<AppContext>) -> anyhow::Result<()> {
    let addr = ctx.config.addr();
    let listener = TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();

    info!("Webhook API running on port {}", port);
    info!("Local URL: http://localhost:{}", port);
    info!("Webhook endpoint: http://localhost:{}/webhook", port);
    info!("Test endpoint: http://localhost:{}/test", port);

    serve(listener, ctx).await
}

/// Serves on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, ctx: Arc<AppContext>) -> anyhow::Result<()> {
    let app = app(ctx);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
