//! Routing module for the POS engine
//!
//! The router is the UI adapter: a typed command interface over the cart
//! engine, decoupled from any rendering technology. Session identity rides
//! on a `cart_session` cookie so repeated calls from the same front-of-house
//! terminal hit the same cart.

pub mod cart;
pub mod checkout;
pub mod orders;

use axum::http::{header, HeaderMap};
use axum::response::Response;
use axum::{body::Body, extract::Request, middleware::Next, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::cart::helpers::get_or_create_cart_id;
use crate::cart::SharedState;

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        tracing::debug!("REQ: {} {}", req.method(), req.uri());
        let res = next.run(req).await;
        if !res.status().is_success() {
            tracing::debug!("RES: {}", res.status());
        }
        res
    });

    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .merge(cart::routes())
        .merge(checkout::routes())
        .merge(orders::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}

/// Reads the session id from the `cart_session` cookie. Returns the id plus
/// whether it was freshly minted (in which case the response must set the
/// cookie).
pub(crate) fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    if let Some(cookie) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        for part in cookie.split(';') {
            if let Some(value) = part.trim().strip_prefix("cart_session=") {
                if !value.is_empty() {
                    return (value.to_string(), false);
                }
            }
        }
    }
    (get_or_create_cart_id(None), true)
}

/// Attaches the session cookie to a response when the session is new.
pub(crate) fn attach_session_cookie(
    mut response: Response,
    session_id: &str,
    is_new_session: bool,
) -> Response {
    if is_new_session {
        let cookie_val = format!("cart_session={}; Path=/; HttpOnly", session_id);
        if let Ok(value) = cookie_val.parse() {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}
