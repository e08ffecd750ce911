//! Cart-related route handlers
//!
//! Every mutation returns the full recomputed cart view, so the UI always
//! renders from an internally consistent snapshot.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::json;

use super::{attach_session_cookie, resolve_session_id};
use crate::cart::models::{AddItemInput, DiscountInput, UpdateQuantityInput};
use crate::cart::{CartSession, SharedState};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:product_id", put(update_quantity))
        .route("/cart/items/:product_id", delete(remove_item))
        .route("/cart/discount", post(apply_discount))
        .route("/cart/clear", post(clear_cart))
}

/// Builds the cart-view response with the session cookie when needed.
fn cart_view(session: &CartSession, session_id: &str, is_new_session: bool) -> Response {
    let response = Json(session.lock_cart().to_response()).into_response();
    attach_session_cookie(response, session_id, is_new_session)
}

/// Endpoint: GET /cart
async fn get_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let session = state.session(&session_id);
    cart_view(&session, &session_id, is_new_session)
}

/// Endpoint: POST /cart/items
/// Adds a product by id, aggregating with any existing line.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemInput>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);

    let Some(product) = state.catalog.get_product(&payload.product_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "product_not_found",
                "message": format!("product {} not found", payload.product_id),
            })),
        )
            .into_response();
    };

    let session = state.session(&session_id);
    if let Err(err) = session.lock_cart().add_item(&product, payload.quantity) {
        return err.into_response();
    }
    cart_view(&session, &session_id, is_new_session)
}

/// Endpoint: PUT /cart/items/:product_id
/// Sets a line's quantity; zero removes the line.
async fn update_quantity(
    State(state): State<SharedState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateQuantityInput>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    if let Err(err) = session
        .lock_cart()
        .update_quantity(&product_id, payload.quantity)
    {
        return err.into_response();
    }
    cart_view(&session, &session_id, is_new_session)
}

/// Endpoint: DELETE /cart/items/:product_id
/// Removes a line; an absent id is a no-op.
async fn remove_item(
    State(state): State<SharedState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    session.lock_cart().remove_item(&product_id);
    cart_view(&session, &session_id, is_new_session)
}

/// Endpoint: POST /cart/discount
/// Replaces the cart's discount wholesale.
async fn apply_discount(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<DiscountInput>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    if let Err(err) = session
        .lock_cart()
        .apply_discount(payload.kind, payload.value)
    {
        return err.into_response();
    }
    cart_view(&session, &session_id, is_new_session)
}

/// Endpoint: POST /cart/clear
async fn clear_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    session.lock_cart().clear();
    cart_view(&session, &session_id, is_new_session)
}
