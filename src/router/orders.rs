//! Order status route handlers
//!
//! Thin pass-through to the order service boundary. Status changes are
//! validated by the same transition rule the client-side projection uses.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::cart::SharedState;
use crate::order::models::UpdateStatusInput;
use crate::order::OrderService;

/// Creates routes for order operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", post(update_status))
}

/// Endpoint: GET /orders/:id
async fn get_order(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    match state.orders.get_order(&id).await {
        Ok(order) => Json(order).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Endpoint: POST /orders/:id/status
/// External trigger for a status transition (e.g. "confirm payment
/// received").
async fn update_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusInput>,
) -> Response {
    match state.orders.update_status(&id, payload.status).await {
        Ok(order) => Json(order).into_response(),
        Err(err) => err.into_response(),
    }
}
