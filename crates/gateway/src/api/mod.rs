pub mod directory;
pub mod error;
pub mod health;
pub mod projects;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full API router.
///
/// Layers (CORS, tracing, concurrency limit) are applied by the caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/health", get(health::health))
        // Live filesystem
        .route("/v1/directory/analyze", post(directory::analyze_directory))
        .route("/v1/directory/query", post(directory::query_directory))
        .route("/v1/files/analyze", post(directory::analyze_file))
        // Stored projects
        .route("/v1/projects/:id/analyze", post(projects::analyze_project))
        .route("/v1/projects/:id/query", post(projects::query_project))
        .route(
            "/v1/projects/:id/files/analyze",
            post(projects::analyze_project_file),
        )
}
