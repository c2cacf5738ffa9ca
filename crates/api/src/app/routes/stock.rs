use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use almacen_stock::Movement;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub async fn list_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_caller): Extension<CallerContext>,
) -> axum::response::Response {
    match services.stock.list().await {
        Ok(items) => {
            let body: Vec<serde_json::Value> = items.iter().map(dto::stock_item_to_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn apply_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(_caller): Extension<CallerContext>,
    Json(body): Json<dto::MovementRequest>,
) -> axum::response::Response {
    let (Some(articulo), Some(delta)) = (body.articulo, body.delta) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "missing_fields",
            "articulo and delta are required",
        );
    };

    let Some(delta) = delta.as_i64() else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_argument",
            "delta must be an integer",
        );
    };

    let movement = match Movement::new(articulo, delta) {
        Ok(m) => m,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.stock.apply(movement).await {
        Ok(result) => dto::movement_result_to_response(result),
        Err(e) => errors::store_error_to_response(e),
    }
}
