//! Directory- and path-backed analysis endpoints.
//!
//! - `POST /v1/directory/analyze` - summarize a live directory
//! - `POST /v1/directory/query`   - answer a question about a live directory
//! - `POST /v1/files/analyze`     - analyze one file on disk

use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::api::error::error_response;
use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Missing string fields deserialize as empty so the service can reject
/// them with a 400 instead of a body-parse failure.
#[derive(Debug, Deserialize)]
pub struct AnalyzeDirectoryRequest {
    #[serde(default, alias = "directoryPath")]
    pub directory_path: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryDirectoryRequest {
    #[serde(default, alias = "directoryPath")]
    pub directory_path: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeFileRequest {
    #[serde(default, alias = "filePath")]
    pub file_path: String,
    #[serde(default)]
    pub model: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Handlers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn analyze_directory(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeDirectoryRequest>,
) -> Response {
    match state
        .service
        .analyze_directory(&req.directory_path, req.model)
        .await
    {
        Ok(outcome) => Json(serde_json::json!({
            "directory_path": req.directory_path,
            "files_analyzed": outcome.files_analyzed,
            "files_included": outcome.files_included,
            "summary": outcome.text,
            "model": outcome.model,
            "traversal": outcome.traversal,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn query_directory(
    State(state): State<AppState>,
    Json(req): Json<QueryDirectoryRequest>,
) -> Response {
    match state
        .service
        .query_directory(&req.directory_path, &req.query, req.model)
        .await
    {
        Ok(outcome) => Json(serde_json::json!({
            "query": req.query,
            "response": outcome.text,
            "files_analyzed": outcome.files_analyzed,
            "files_included": outcome.files_included,
            "model": outcome.model,
            "traversal": outcome.traversal,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn analyze_file(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeFileRequest>,
) -> Response {
    match state.service.analyze_file(&req.file_path, req.model).await {
        Ok(outcome) => Json(serde_json::json!({
            "file_path": req.file_path,
            "files_analyzed": outcome.files_analyzed,
            "files_included": outcome.files_included,
            "analysis": outcome.text,
            "model": outcome.model,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}
