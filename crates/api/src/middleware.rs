use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use almacen_auth::validate_token_record;
use almacen_core::{DomainError, UnauthorizedReason};
use almacen_store::AuthStore;

use crate::app::errors;
use crate::context::CallerContext;

#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<dyn AuthStore>,
}

/// Resolve the bearer token against the store and attach the caller to the
/// request. Every rejection is a structured 401 carrying the reason.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers())
        .map_err(errors::unauthorized_response)?
        .to_string();

    let record = state
        .auth
        .lookup_token(&token)
        .await
        .map_err(errors::store_error_to_response)?;

    let user = match validate_token_record(record, Utc::now()) {
        Ok(user) => user,
        Err(DomainError::Unauthorized(reason)) => {
            tracing::debug!(?reason, "bearer token rejected");
            return Err(errors::unauthorized_response(reason));
        }
        Err(other) => return Err(errors::domain_error_to_response(other)),
    };

    req.extensions_mut().insert(CallerContext::new(user));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, UnauthorizedReason> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(UnauthorizedReason::Missing)?;

    let header = header.to_str().map_err(|_| UnauthorizedReason::Malformed)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(UnauthorizedReason::Malformed)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(UnauthorizedReason::Malformed);
    }

    Ok(token)
}
