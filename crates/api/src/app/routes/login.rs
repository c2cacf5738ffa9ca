use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use almacen_auth::{generate_token, verify_password, Credentials, CredentialsError};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let (Some(email), Some(password)) = (body.email.as_deref(), body.password.as_deref()) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "missing_fields",
            "email and password are required",
        );
    };

    let credentials = match Credentials::new(email, password) {
        Ok(c) => c,
        Err(CredentialsError::MissingField) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "missing_fields",
                "email and password are required",
            );
        }
        Err(CredentialsError::InvalidEmail) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_email",
                "invalid email format",
            );
        }
    };

    let user = match services.auth.find_user_by_email(credentials.email()).await {
        Ok(Some(user)) => user,
        Ok(None) => return invalid_credentials(),
        Err(e) => return errors::store_error_to_response(e),
    };

    // bcrypt is deliberately slow; keep it off the async workers.
    let password = credentials.password().to_string();
    let hash = user.password_hash.clone();
    let verified =
        match tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await {
            Ok(Ok(verified)) => verified,
            Ok(Err(e)) => {
                tracing::error!(user_id = user.id, error = %e, "unusable password hash");
                return errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "an internal error occurred",
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "password verification task failed");
                return errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "an internal error occurred",
                );
            }
        };

    if !verified {
        return invalid_credentials();
    }

    let token = generate_token();
    let expires_at = services.token_ttl.map(|ttl| Utc::now() + ttl);

    if let Err(e) = services.auth.insert_token(user.id, &token, expires_at).await {
        return errors::store_error_to_response(e);
    }

    tracing::info!(user_id = user.id, "login succeeded");

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token,
            "user": {
                "email": user.email,
                "legajo": user.legajo,
            },
        })),
    )
        .into_response()
}

/// Unknown email and wrong password answer identically.
fn invalid_credentials() -> axum::response::Response {
    errors::json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "email or password is incorrect",
    )
}
