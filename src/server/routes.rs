use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use super::handlers;
use super::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(handlers::analyze_upload))
        .route("/api/analyze-text", post(handlers::analyze_text))
        .route("/api/health", get(handlers::health))
}

/// Complete application: pages, static files, API, middleware
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .nest_service("/static", static_files)
        .merge(api_routes())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(request_logger))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn request_logger(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed().as_millis();
    let status = response.status().as_u16();
    tracing::info!("{method} {uri} {status} {elapsed}ms");

    response
}
