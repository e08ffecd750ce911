//! Order State Projection
//!
//! A small state machine tracking an order's status as reported by the
//! backend. Transitions are driven by external triggers (confirmation
//! actions, status refresh); the projection itself contains no polling
//! logic.

use super::models::{Order, OrderStatus};
use crate::error::OrderError;

/// Validates a status transition.
///
/// A transition is accepted only if the target differs from the current
/// status and the current status is not terminal. The same rule is applied
/// server-side by the order service.
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
    if from.is_terminal() || from == to {
        return Err(OrderError::InvalidTransition { from, to });
    }
    Ok(())
}

/// Client-side read-only projection of one order.
#[derive(Debug, Clone)]
pub struct OrderProjection {
    order: Order,
}

impl OrderProjection {
    pub fn new(order: Order) -> Self {
        OrderProjection { order }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn status(&self) -> OrderStatus {
        self.order.status
    }

    /// Applies a status reported by the order service. Rejected transitions
    /// leave the projection unchanged.
    pub fn apply(&mut self, status: OrderStatus) -> Result<(), OrderError> {
        validate_transition(self.order.status, status)?;
        self.order.status = status;
        Ok(())
    }

    /// Refreshes the projection from a full order record, e.g. after a
    /// `get_order` poll. The incoming status is validated the same way.
    pub fn refresh(&mut self, order: Order) -> Result<(), OrderError> {
        if order.status != self.order.status {
            validate_transition(self.order.status, order.status)?;
        }
        self.order = order;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::models::CartTotals;
    use crate::checkout::models::PaymentMethod;
    use chrono::Utc;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: "o1".to_string(),
            order_number: "ORD-000001".to_string(),
            status,
            lines: Vec::new(),
            discount: None,
            totals: CartTotals::default(),
            payment_method: PaymentMethod::Cash,
            customer: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn pending_to_processing_to_completed() {
        let mut projection = OrderProjection::new(order(OrderStatus::Pending));
        projection.apply(OrderStatus::Processing).unwrap();
        projection.apply(OrderStatus::Completed).unwrap();
        assert_eq!(projection.status(), OrderStatus::Completed);
    }

    #[test]
    fn terminal_states_reject_all_transitions() {
        for terminal in [OrderStatus::Completed, OrderStatus::Cancelled] {
            let mut projection = OrderProjection::new(order(terminal));
            for target in [
                OrderStatus::Pending,
                OrderStatus::Processing,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ] {
                let err = projection.apply(target).unwrap_err();
                assert!(matches!(err, OrderError::InvalidTransition { .. }));
                assert_eq!(projection.status(), terminal);
            }
        }
    }

    #[test]
    fn self_transition_is_rejected() {
        let mut projection = OrderProjection::new(order(OrderStatus::Pending));
        assert!(projection.apply(OrderStatus::Pending).is_err());
        assert_eq!(projection.status(), OrderStatus::Pending);
    }

    #[test]
    fn refresh_with_same_status_updates_fields() {
        let mut projection = OrderProjection::new(order(OrderStatus::Pending));
        let mut refreshed = order(OrderStatus::Pending);
        refreshed.order_number = "ORD-000002".to_string();
        projection.refresh(refreshed).unwrap();
        assert_eq!(projection.order().order_number, "ORD-000002");
    }
}
