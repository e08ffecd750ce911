//! Error taxonomy for the POS engine
//!
//! Every failure is returned to the immediate caller; no error path leaves a
//! cart in a partially mutated state, so retrying after any error is safe
//! without manual cleanup.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::order::models::OrderStatus;

// =============================================================================
// Cart mutation errors
// =============================================================================

/// Errors raised by cart mutations. The cart is unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    /// The requested cumulative quantity exceeds the last known stock level.
    /// Advisory only; the order service re-checks authoritatively at
    /// order-creation time.
    #[error("stock exceeded for product {product_id}: requested {requested}, available {available}")]
    StockExceeded {
        product_id: String,
        requested: u32,
        available: u32,
    },

    /// The discount value is negative, or a percentage above 100.
    #[error("invalid discount: {0}")]
    InvalidDiscount(String),
}

// =============================================================================
// Checkout errors
// =============================================================================

/// Errors raised by the checkout coordinator. On every variant the cart is
/// left exactly as it was before the checkout attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// Checkout was requested on a cart with no lines. Detected locally,
    /// before any network call.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The cart total is not positive. Detected locally, before any network
    /// call.
    #[error("order total must be positive")]
    NonPositiveTotal,

    /// A previous checkout for this cart is still in flight. Fail fast
    /// rather than queue a second submission.
    #[error("a checkout is already in progress for this cart")]
    AlreadySubmitting,

    /// The submission never reached the order service. Retry is safe.
    #[error("order service unreachable: {0}")]
    Network(String),

    /// The order service refused the request (e.g. its authoritative stock
    /// check failed). The message is surfaced verbatim to the user.
    #[error("order rejected: {0}")]
    Rejected(String),
}

// =============================================================================
// Order errors
// =============================================================================

/// Errors raised by the order service boundary and the status projection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("order {0} not found")]
    NotFound(String),

    /// The requested status change violates the projection's transition
    /// rule: the target must differ from the current status and the current
    /// status must not be terminal.
    #[error("invalid order status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

// =============================================================================
// HTTP mapping
// =============================================================================

/// Serializes an error as `{"error": <kind>, "message": <display>}` with the
/// given status code.
fn error_response(status: StatusCode, kind: &str, message: String) -> Response {
    (status, Json(json!({ "error": kind, "message": message }))).into_response()
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            CartError::StockExceeded { .. } => (StatusCode::CONFLICT, "stock_exceeded"),
            CartError::InvalidDiscount(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_discount"),
        };
        error_response(status, kind, self.to_string())
    }
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            CheckoutError::EmptyCart => (StatusCode::UNPROCESSABLE_ENTITY, "empty_cart"),
            CheckoutError::NonPositiveTotal => {
                (StatusCode::UNPROCESSABLE_ENTITY, "non_positive_total")
            }
            CheckoutError::AlreadySubmitting => (StatusCode::CONFLICT, "already_submitting"),
            CheckoutError::Network(_) => (StatusCode::BAD_GATEWAY, "network_error"),
            CheckoutError::Rejected(_) => (StatusCode::CONFLICT, "server_rejection"),
        };
        error_response(status, kind, self.to_string())
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            OrderError::NotFound(_) => (StatusCode::NOT_FOUND, "order_not_found"),
            OrderError::InvalidTransition { .. } => (StatusCode::CONFLICT, "invalid_transition"),
        };
        error_response(status, kind, self.to_string())
    }
}
