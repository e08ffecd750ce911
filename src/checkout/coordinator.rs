//! Checkout Coordinator
//!
//! Serializes submission of a cart to the order service. At most one
//! submission can be in flight per coordinator; a second attempt while the
//! first is pending fails fast with `AlreadySubmitting` instead of queueing
//! or firing a second network request.
//!
//! The cart lock is never held across the network await: the cart is
//! validated and snapshotted under the lock, the submission runs without
//! it, and the cart is cleared (success only) under a fresh lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::cart::helpers::format_line_summary;
use crate::cart::Cart;
use crate::checkout::models::{Customer, OrderRequest, PaymentMethod};
use crate::error::CheckoutError;
use crate::order::{Order, OrderService, OrderServiceError};

/// Per-cart checkout state. `submitting` is the mutual-exclusion flag for
/// the double-submit race.
pub struct CheckoutCoordinator {
    submitting: AtomicBool,
}

impl CheckoutCoordinator {
    pub fn new() -> Self {
        CheckoutCoordinator {
            submitting: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Converts the cart into an order, all-or-nothing from the client's
    /// perspective.
    ///
    /// On success the cart is cleared and the server-created order
    /// returned. On any failure the cart is left exactly as it was and the
    /// flag is released, so a new attempt (always an explicit user action,
    /// never automatic) is safe.
    pub async fn checkout<S>(
        &self,
        cart: &Mutex<Cart>,
        service: &S,
        payment_method: PaymentMethod,
        customer: Option<Customer>,
    ) -> Result<Order, CheckoutError>
    where
        S: OrderService + ?Sized,
    {
        // Validate and snapshot under the lock; no await in this block.
        let request = {
            let cart = cart.lock().expect("cart lock poisoned");
            if cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            if cart.totals().total == 0 {
                return Err(CheckoutError::NonPositiveTotal);
            }
            if self
                .submitting
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return Err(CheckoutError::AlreadySubmitting);
            }
            OrderRequest::snapshot(&cart, payment_method, customer)
        };

        tracing::debug!(
            total = request.totals.total,
            "submitting order: {}",
            format_line_summary(&request.lines)
        );

        // Suspension point: the request is an immutable copy, so cart
        // mutations from here on cannot affect it.
        let result = service.create_order(&request).await;

        match result {
            Ok(order) => {
                cart.lock().expect("cart lock poisoned").clear();
                self.submitting.store(false, Ordering::Release);
                tracing::info!(order_number = %order.order_number, "checkout complete");
                Ok(order)
            }
            Err(err) => {
                self.submitting.store(false, Ordering::Release);
                tracing::warn!("checkout failed: {}", err);
                Err(match err {
                    OrderServiceError::Network(msg) => CheckoutError::Network(msg),
                    OrderServiceError::Rejected(msg) => CheckoutError::Rejected(msg),
                })
            }
        }
    }
}

impl Default for CheckoutCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::order::models::OrderStatus;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    fn product(id: &str, price: u64, stock: u32) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            sku: format!("SKU-{}", id),
            price,
            stock,
            unit: "pcs".to_string(),
        }
    }

    fn cart_with_one_line() -> Mutex<Cart> {
        let mut cart = Cart::default();
        cart.add_item(&product("p1", 50000, 10), 2).unwrap();
        Mutex::new(cart)
    }

    /// Order service double that counts calls and can hold submissions open
    /// until the test releases them.
    struct MockOrderService {
        calls: AtomicUsize,
        gate: Semaphore,
        response: Result<(), OrderServiceError>,
    }

    impl MockOrderService {
        fn accepting() -> Self {
            Self::with_response(Ok(()))
        }

        fn with_response(response: Result<(), OrderServiceError>) -> Self {
            MockOrderService {
                calls: AtomicUsize::new(0),
                gate: Semaphore::new(Semaphore::MAX_PERMITS),
                response,
            }
        }

        fn gated(response: Result<(), OrderServiceError>) -> Self {
            MockOrderService {
                calls: AtomicUsize::new(0),
                gate: Semaphore::new(0),
                response,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OrderService for MockOrderService {
        async fn create_order(&self, request: &OrderRequest) -> Result<Order, OrderServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _permit = self.gate.acquire().await.expect("gate closed");
            self.response.clone()?;
            let now = Utc::now();
            Ok(Order {
                id: "order-1".to_string(),
                order_number: "ORD-000001".to_string(),
                status: OrderStatus::Pending,
                lines: request.lines.clone(),
                discount: request.discount,
                totals: request.totals,
                payment_method: request.payment_method,
                customer: request.customer.clone(),
                created_at: now,
                updated_at: now,
            })
        }

        async fn get_order(&self, id: &str) -> Result<Order, crate::error::OrderError> {
            Err(crate::error::OrderError::NotFound(id.to_string()))
        }

        async fn update_status(
            &self,
            id: &str,
            _status: OrderStatus,
        ) -> Result<Order, crate::error::OrderError> {
            Err(crate::error::OrderError::NotFound(id.to_string()))
        }
    }

    #[tokio::test]
    async fn successful_checkout_clears_the_cart() {
        let coordinator = CheckoutCoordinator::new();
        let cart = cart_with_one_line();
        let service = MockOrderService::accepting();

        let order = coordinator
            .checkout(&cart, &service, PaymentMethod::Cash, None)
            .await
            .unwrap();

        assert_eq!(order.totals.subtotal, 100_000);
        assert!(cart.lock().unwrap().is_empty());
        assert!(!coordinator.is_submitting());
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn empty_cart_fails_before_any_network_call() {
        let coordinator = CheckoutCoordinator::new();
        let cart = Mutex::new(Cart::default());
        let service = MockOrderService::accepting();

        let err = coordinator
            .checkout(&cart, &service, PaymentMethod::Cash, None)
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(service.calls(), 0);
        assert!(!coordinator.is_submitting());
    }

    #[tokio::test]
    async fn zero_total_fails_locally() {
        use crate::cart::DiscountKind;
        use rust_decimal_macros::dec;

        let coordinator = CheckoutCoordinator::new();
        let mut cart = Cart::default();
        cart.add_item(&product("p1", 1000, 5), 1).unwrap();
        cart.apply_discount(DiscountKind::Percentage, dec!(100)).unwrap();
        let cart = Mutex::new(cart);
        let service = MockOrderService::accepting();

        let err = coordinator
            .checkout(&cart, &service, PaymentMethod::Cash, None)
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::NonPositiveTotal);
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn rejection_leaves_cart_intact_and_allows_retry() {
        let coordinator = CheckoutCoordinator::new();
        let cart = cart_with_one_line();
        let service = MockOrderService::with_response(Err(OrderServiceError::Rejected(
            "stock changed".to_string(),
        )));

        let err = coordinator
            .checkout(&cart, &service, PaymentMethod::Card, None)
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::Rejected("stock changed".to_string()));
        assert_eq!(cart.lock().unwrap().item_count(), 2);
        // flag released: a new attempt reaches the service again
        assert!(!coordinator.is_submitting());
        coordinator
            .checkout(&cart, &service, PaymentMethod::Card, None)
            .await
            .unwrap_err();
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn network_failure_maps_to_network_error() {
        let coordinator = CheckoutCoordinator::new();
        let cart = cart_with_one_line();
        let service = MockOrderService::with_response(Err(OrderServiceError::Network(
            "connection refused".to_string(),
        )));

        let err = coordinator
            .checkout(&cart, &service, PaymentMethod::Cash, None)
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Network(_)));
        assert_eq!(cart.lock().unwrap().item_count(), 2);
    }

    #[tokio::test]
    async fn second_checkout_while_in_flight_is_rejected() {
        let coordinator = Arc::new(CheckoutCoordinator::new());
        let cart = Arc::new(cart_with_one_line());
        let service = Arc::new(MockOrderService::gated(Ok(())));

        let first = {
            let coordinator = coordinator.clone();
            let cart = cart.clone();
            let service = service.clone();
            tokio::spawn(async move {
                coordinator
                    .checkout(&cart, service.as_ref(), PaymentMethod::Cash, None)
                    .await
            })
        };

        // Wait until the first submission is inside the service call.
        while service.calls() == 0 {
            tokio::task::yield_now().await;
        }

        let second = coordinator
            .checkout(&cart, service.as_ref(), PaymentMethod::Cash, None)
            .await;
        assert_eq!(second.unwrap_err(), CheckoutError::AlreadySubmitting);

        // Release the first submission and let it finish.
        service.gate.add_permits(1);
        let outcome = first.await.unwrap();
        assert!(outcome.is_ok());

        // Exactly one request reached the service.
        assert_eq!(service.calls(), 1);
        assert!(cart.lock().unwrap().is_empty());
    }
}
