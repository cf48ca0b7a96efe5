use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use pl_domain::Error;

/// Build a standardized JSON error response: `{ "error": "<message>" }`.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// HTTP status for a domain error.
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidInput(_) | Error::NotADirectory(_) | Error::EmptyResult(_) => {
            StatusCode::BAD_REQUEST
        }
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Provider { .. } | Error::Http(_) | Error::Timeout(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain error to its JSON response, logging server-side failures.
pub fn error_response(err: Error) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::warn!(status = status.as_u16(), error = %err, "request failed");
    } else {
        tracing::debug!(status = status.as_u16(), error = %err, "request rejected");
    }
    let message = match err {
        // Client-facing variants carry their own wording; skip the prefix.
        Error::InvalidInput(m) | Error::NotFound(m) | Error::NotADirectory(m) | Error::EmptyResult(m) => m,
        other => other.to_string(),
    };
    api_error(status, message)
}
