//! Checkout Domain Models
//!
//! `OrderRequest` is a deep copy of the cart taken at the moment checkout
//! begins, so cart mutations after that moment cannot affect a submission
//! already in flight.

use serde::{Deserialize, Serialize};

use crate::cart::models::{CartLine, CartTotals, Discount};
use crate::cart::Cart;

/// How the customer pays. Selected at checkout, not part of the cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Ewallet,
}

/// Optional customer identity attached to an order request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Immutable snapshot of a cart submitted to the order service.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub lines: Vec<CartLine>,
    pub discount: Option<Discount>,
    pub totals: CartTotals,
    pub payment_method: PaymentMethod,
    pub customer: Option<Customer>,
}

impl OrderRequest {
    /// Deep-copies the cart's current lines, discount, and totals.
    pub fn snapshot(cart: &Cart, payment_method: PaymentMethod, customer: Option<Customer>) -> Self {
        OrderRequest {
            lines: cart.lines().to_vec(),
            discount: cart.discount().copied(),
            totals: cart.totals(),
            payment_method,
            customer,
        }
    }
}

/// Input for the checkout endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub customer: Option<Customer>,
}
