//! Checkout Domain Module
//!
//! This module contains the hand-off from cart to order:
//! - The immutable `OrderRequest` snapshot and checkout wire shapes
//! - The `CheckoutCoordinator` with its at-most-one-in-flight guarantee

pub mod coordinator;
pub mod models;

pub use coordinator::CheckoutCoordinator;
pub use models::{Customer, OrderRequest, PaymentMethod};
