use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Router fallback: unknown verb+path combinations get a structured 404.
pub async fn not_found(method: Method, uri: Uri) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "not_found",
            "message": "the requested endpoint does not exist",
            "requested": uri.path(),
            "method": method.as_str(),
        })),
    )
        .into_response()
}
