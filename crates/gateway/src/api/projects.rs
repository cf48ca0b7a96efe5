//! Project-backed analysis endpoints. The walker is skipped; files come
//! from the project store.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::api::error::error_response;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeProjectRequest {
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryProjectRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeProjectFileRequest {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// `POST /v1/projects/:id/analyze`. The body is optional.
pub async fn analyze_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    body: Option<Json<AnalyzeProjectRequest>>,
) -> Response {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    match state.service.analyze_project(&project_id, req.model).await {
        Ok(outcome) => Json(serde_json::json!({
            "project_id": project_id,
            "files_analyzed": outcome.files_analyzed,
            "files_included": outcome.files_included,
            "summary": outcome.text,
            "model": outcome.model,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /v1/projects/:id/query`
pub async fn query_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(req): Json<QueryProjectRequest>,
) -> Response {
    match state
        .service
        .query_project(&project_id, &req.query, req.model)
        .await
    {
        Ok(outcome) => Json(serde_json::json!({
            "project_id": project_id,
            "query": req.query,
            "response": outcome.text,
            "files_analyzed": outcome.files_analyzed,
            "files_included": outcome.files_included,
            "model": outcome.model,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /v1/projects/:id/files/analyze`
pub async fn analyze_project_file(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(req): Json<AnalyzeProjectFileRequest>,
) -> Response {
    match state
        .service
        .analyze_project_file(&project_id, &req.path, req.model)
        .await
    {
        Ok(outcome) => Json(serde_json::json!({
            "project_id": project_id,
            "path": req.path,
            "analysis": outcome.text,
            "model": outcome.model,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}
