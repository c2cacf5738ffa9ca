use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use almacen_stock::{MovementResult, StockItem};

// -------------------------
// Request DTOs
// -------------------------

/// Fields are optional so that missing ones produce our own 400 instead of
/// the extractor's rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovementRequest {
    pub articulo: Option<String>,
    /// Kept raw: a JSON string or fractional number must be rejected as
    /// invalid input, not coerced.
    pub delta: Option<serde_json::Value>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn stock_item_to_json(item: &StockItem) -> serde_json::Value {
    json!({
        "idstock": item.id.as_i64(),
        "articulo": item.articulo,
        "cantidad": item.cantidad,
    })
}

pub fn movement_result_to_response(result: MovementResult) -> axum::response::Response {
    match result {
        MovementResult::Updated {
            id,
            articulo,
            previous,
            delta,
            cantidad,
        } => (
            StatusCode::OK,
            axum::Json(json!({
                "success": true,
                "message": "stock updated",
                "articulo": {
                    "idstock": id.as_i64(),
                    "articulo": articulo,
                    "previous_quantity": previous,
                    "delta": delta,
                    "cantidad": cantidad,
                },
            })),
        )
            .into_response(),
        MovementResult::Deleted {
            articulo,
            previous,
            delta,
        } => (
            StatusCode::OK,
            axum::Json(json!({
                "success": true,
                "message": "article deleted (quantity reached 0)",
                "articulo": articulo,
                "previous_quantity": previous,
                "delta": delta,
                "final_quantity": 0,
                "deleted": true,
            })),
        )
            .into_response(),
        MovementResult::Created {
            id,
            articulo,
            cantidad,
        } => (
            StatusCode::CREATED,
            axum::Json(json!({
                "success": true,
                "message": "new article created",
                "articulo": {
                    "idstock": id.as_i64(),
                    "articulo": articulo,
                    "cantidad": cantidad,
                },
                "created": true,
            })),
        )
            .into_response(),
    }
}
