use axum::extract::State;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

/// `GET /v1/health`. Does not call the provider.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let provider = state.service.provider();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": provider.provider_id(),
        "default_model": provider.default_model(),
    }))
}
