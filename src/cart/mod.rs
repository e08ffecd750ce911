//! Cart Domain Module
//!
//! This module contains all cart business logic, including:
//! - Domain models (CartLine, Discount, CartTotals, wire shapes)
//! - The Cart itself with its mutation operations
//! - The advisory stock guard
//! - Application state management (session -> cart map)

pub mod helpers;
pub mod models;
pub mod state;
pub mod stock;

// Re-export commonly used types for convenience
pub use models::{CartLine, CartTotals, Discount, DiscountKind};
pub use state::{AppState, Cart, CartSession, SharedState, DEFAULT_TAX_RATE};
