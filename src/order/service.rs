//! Order Service Boundary
//!
//! The engine only ever talks to the order service through the
//! `OrderService` trait; the checkout coordinator never retries on its own,
//! so duplicate submission is purely a client-side concern handled by the
//! coordinator's submitting flag.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Order, OrderStatus};
use super::projection::validate_transition;
use crate::checkout::models::OrderRequest;
use crate::error::OrderError;

/// Failure modes of an order submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderServiceError {
    /// The request never reached the service.
    #[error("{0}")]
    Network(String),

    /// The service refused the request, e.g. its authoritative stock check
    /// failed because stock changed concurrently server-side.
    #[error("{0}")]
    Rejected(String),
}

/// External order service contract.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Creates an immutable order from a request snapshot.
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, OrderServiceError>;

    /// Fetches the current state of an order.
    async fn get_order(&self, id: &str) -> Result<Order, OrderError>;

    /// Requests a status change, subject to the transition rule.
    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Order, OrderError>;
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// DashMap-backed order service used by the server binary and tests. Assigns
/// order identity, stamps timestamps, and enforces the status transition
/// rule authoritatively.
pub struct InMemoryOrderService {
    orders: DashMap<String, Order>,
    next_number: AtomicU64,
}

impl InMemoryOrderService {
    pub fn new() -> Self {
        InMemoryOrderService {
            orders: DashMap::new(),
            next_number: AtomicU64::new(1),
        }
    }

    /// Number of orders created so far.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for InMemoryOrderService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, OrderServiceError> {
        if request.lines.is_empty() {
            return Err(OrderServiceError::Rejected(
                "order has no lines".to_string(),
            ));
        }

        let number = self.next_number.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().simple().to_string(),
            order_number: format!("ORD-{:06}", number),
            status: OrderStatus::Pending,
            lines: request.lines.clone(),
            discount: request.discount,
            totals: request.totals,
            payment_method: request.payment_method,
            customer: request.customer.clone(),
            created_at: now,
            updated_at: now,
        };

        self.orders.insert(order.id.clone(), order.clone());
        tracing::info!(order_id = %order.id, order_number = %order.order_number, "order created");
        Ok(order)
    }

    async fn get_order(&self, id: &str) -> Result<Order, OrderError> {
        self.orders
            .get(id)
            .map(|o| o.clone())
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Order, OrderError> {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        validate_transition(entry.status, status)?;
        entry.status = status;
        entry.updated_at = Utc::now();
        tracing::info!(order_id = %id, status = %status, "order status updated");
        Ok(entry.clone())
    }
}
