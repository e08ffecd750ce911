//! Checkout route handler

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use super::{attach_session_cookie, resolve_session_id};
use crate::cart::SharedState;
use crate::checkout::models::CheckoutInput;

/// Creates routes for checkout operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/checkout", post(checkout))
}

/// Endpoint: POST /checkout
/// Converts the session's cart into an order, all-or-nothing. On any
/// failure the cart is untouched and the caller may retry explicitly.
async fn checkout(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<CheckoutInput>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    let result = session
        .coordinator
        .checkout(
            session.cart(),
            &state.orders,
            payload.payment_method,
            payload.customer,
        )
        .await;

    let response = match result {
        Ok(order) => Json(order).into_response(),
        Err(err) => err.into_response(),
    };
    attach_session_cookie(response, &session_id, is_new_session)
}
