//! Order Domain Module
//!
//! This module contains everything order-related on the client side:
//! - Domain models (Order, OrderStatus)
//! - The order status projection state machine
//! - The order service boundary trait and its in-memory implementation

pub mod models;
pub mod projection;
pub mod service;

pub use models::{Order, OrderStatus};
pub use projection::{validate_transition, OrderProjection};
pub use service::{InMemoryOrderService, OrderService, OrderServiceError};
