//! HTTP service
//!
//! Routes:
//! - `GET /` landing page
//! - `GET /static/*` static assets
//! - `POST /api/analyze` multipart upload (field `file`)
//! - `POST /api/analyze-text` JSON `{"code": "..."}`
//! - `GET /api/health` liveness

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ServerConfig;
use crate::pipeline::Analyzer;

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServerConfig, analyzer: Analyzer) -> Result<()> {
    let state = AppState::new(analyzer, config);
    let app = build_router(state, config.max_upload_bytes);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("pyreview listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
