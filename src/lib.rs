//! POS Checkout Library
//!
//! This library provides the cart, pricing, and checkout engine for a retail
//! front-of-house application: cart aggregation, discount and tax
//! computation, advisory stock pre-validation, and the checkout hand-off
//! that turns a cart into an immutable order.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod order;
pub mod pricing;

// Infrastructure
pub mod router;
