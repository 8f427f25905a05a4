use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::models::AnalysisReport;
use crate::pipeline::InputError;

const FALLBACK_INDEX: &str =
    "<h1>pyreview</h1><p>POST Python source to /api/analyze-text or upload a .py file to /api/analyze.</p>";

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Landing page: `<static_dir>/index.html` or a built-in stub
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html),
        Err(e) => {
            debug!("No landing page at {}: {}", path.display(), e);
            Html(FALLBACK_INDEX.to_string())
        }
    }
}

/// Analyze an uploaded file from the multipart field `file`
pub async fn analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<AnalysisReport>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        // Reject before reading the body
        state.analyzer.check_extension(&filename)?;
        let content = field.bytes().await?;

        let analyzer = state.analyzer.clone();
        let report = tokio::task::spawn_blocking(move || {
            analyzer.analyze_upload(&filename, &content)
        })
        .await
        .map_err(ApiError::analysis_failed)??;
        return Ok(Json(report));
    }

    Err(ApiError::bad_request(
        "MissingFile",
        "No file provided in field 'file'",
    ))
}

fn map_json_rejection(err: JsonRejection) -> ApiError {
    ApiError::bad_request(
        "InvalidRequest",
        format!("Invalid JSON payload: {}", err.body_text()),
    )
}

/// Analyze source posted as `{"code": "..."}`
pub async fn analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> ApiResult<Json<AnalysisReport>> {
    let Json(request) = payload.map_err(map_json_rejection)?;
    if request.code.is_empty() {
        return Err(InputError::EmptyInput.into());
    }
    info!("Analyzing {} bytes of pasted code", request.code.len());

    let analyzer = state.analyzer.clone();
    let report = tokio::task::spawn_blocking(move || analyzer.analyze_text(&request.code))
        .await
        .map_err(ApiError::analysis_failed)??;
    Ok(Json(report))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
