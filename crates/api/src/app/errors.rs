use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use almacen_core::{DomainError, UnauthorizedReason};
use almacen_store::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(domain) => domain_error_to_response(domain),
        StoreError::Busy(msg) => {
            tracing::warn!(error = %msg, "store busy");
            json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "busy",
                "the store is busy, try again",
            )
        }
        StoreError::Storage(msg) => {
            tracing::error!(error = %msg, "storage failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "an internal error occurred",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_argument", msg)
        }
        DomainError::NegativeStock { current, attempted } => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "invalid_operation",
                "message": "stock quantity cannot be negative",
                "current_quantity": current,
                "attempted_delta": attempted,
            })),
        )
            .into_response(),
        DomainError::InvalidOperation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_operation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Unauthorized(reason) => unauthorized_response(reason),
    }
}

pub fn unauthorized_response(reason: UnauthorizedReason) -> axum::response::Response {
    let message = match reason {
        UnauthorizedReason::Missing => "authorization header missing",
        UnauthorizedReason::Malformed => "invalid authorization format",
        UnauthorizedReason::Unknown => "invalid token",
        UnauthorizedReason::Expired => "token expired",
    };

    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({
            "error": "unauthorized",
            "message": message,
            "reason": reason,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
