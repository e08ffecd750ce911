//! Cart State Management
//!
//! The `Cart` owns its lines exclusively: every mutation goes through its
//! methods, runs the stock guard first, and recomputes derived totals before
//! returning, so callers always observe an internally consistent snapshot.
//! This module also holds the shared application state that maps session ids
//! to carts.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::{CartLine, CartResponse, CartTotals, Discount, DiscountKind};
use super::stock::check_stock;
use crate::catalog::{CatalogStore, Product};
use crate::checkout::CheckoutCoordinator;
use crate::error::CartError;
use crate::order::InMemoryOrderService;
use crate::pricing;

/// Flat tax rate applied to the discounted subtotal. Policy constant.
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.10);

// =============================================================================
// Cart
// =============================================================================

/// An ordered collection of line items plus a single discount rule.
///
/// Insertion order defines display order only. Totals are recomputed after
/// every mutation; on any error the cart is left exactly as it was.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    discount: Option<Discount>,
    tax_rate: Decimal,
    totals: CartTotals,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_RATE)
    }
}

impl Cart {
    /// Creates an empty cart with the given tax rate.
    pub fn new(tax_rate: Decimal) -> Self {
        Cart {
            lines: Vec::new(),
            discount: None,
            tax_rate,
            totals: CartTotals::default(),
        }
    }

    /// Adds `quantity` of a product, aggregating with an existing line for
    /// the same product id. The stock guard sees the cumulative quantity;
    /// on failure the line set is unchanged.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(existing) => {
                // The quantity comes straight off the wire; an overflowing
                // sum can only ever exceed any real stock level.
                let new_quantity = existing.quantity.checked_add(quantity).ok_or_else(|| {
                    CartError::StockExceeded {
                        product_id: product.id.clone(),
                        requested: existing.quantity.saturating_add(quantity),
                        available: product.stock,
                    }
                })?;
                check_stock(&product.id, new_quantity, product.stock)?;
                existing.quantity = new_quantity;
                // Adopt the latest catalog read for this product.
                existing.stock_snapshot = product.stock;
                existing.recompute_subtotal();
            }
            None => {
                check_stock(&product.id, quantity, product.stock)?;
                self.lines.push(CartLine::from_product(product, quantity));
            }
        }

        self.recompute();
        Ok(())
    }

    /// Deletes the line for `product_id`. Absent id is a no-op, not an error.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
        self.recompute();
    }

    /// Sets a line's quantity in place. Zero is equivalent to removal; a
    /// quantity above the line's stock snapshot is rejected and the line is
    /// unchanged. Absent id is a no-op.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            check_stock(product_id, quantity, line.stock_snapshot)?;
            line.quantity = quantity;
            line.recompute_subtotal();
            self.recompute();
        }
        Ok(())
    }

    /// Replaces the current discount wholesale.
    pub fn apply_discount(&mut self, kind: DiscountKind, value: Decimal) -> Result<(), CartError> {
        if value.is_sign_negative() {
            return Err(CartError::InvalidDiscount(
                "discount value must not be negative".to_string(),
            ));
        }
        if kind == DiscountKind::Percentage && value > dec!(100) {
            return Err(CartError::InvalidDiscount(
                "percentage discount cannot exceed 100".to_string(),
            ));
        }

        self.discount = Some(Discount { kind, value });
        self.recompute();
        Ok(())
    }

    /// Empties all lines and resets the discount. The selected payment
    /// method is checkout state and is not touched here.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = None;
        self.recompute();
    }

    /// Total units across all lines. Display only.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Builds the full view returned to the UI adapter.
    pub fn to_response(&self) -> CartResponse {
        CartResponse {
            lines: self.lines.clone(),
            discount: self.discount,
            totals: self.totals,
            item_count: self.item_count(),
        }
    }

    fn recompute(&mut self) {
        self.totals = pricing::compute_totals(&self.lines, self.discount.as_ref(), self.tax_rate);
    }
}

// =============================================================================
// Application state
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// One user session's cart plus its checkout coordinator. The coordinator's
/// submitting flag is per-cart, so one session's in-flight checkout never
/// blocks another's.
pub struct CartSession {
    cart: Mutex<Cart>,
    pub coordinator: CheckoutCoordinator,
}

impl CartSession {
    pub fn new() -> Self {
        CartSession {
            cart: Mutex::new(Cart::default()),
            coordinator: CheckoutCoordinator::new(),
        }
    }

    /// Locks the cart for a synchronous mutation. Never held across an
    /// await point.
    pub fn lock_cart(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().expect("cart lock poisoned")
    }

    pub fn cart(&self) -> &Mutex<Cart> {
        &self.cart
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Core application state: carts keyed by session id, the catalog snapshot,
/// and the order service boundary.
pub struct AppState {
    /// In-memory storage for carts, keyed by cart_id.
    /// DashMap allows concurrent access without external Mutexes.
    carts: DashMap<String, Arc<CartSession>>,

    pub catalog: CatalogStore,
    pub orders: InMemoryOrderService,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            carts: DashMap::new(),
            catalog: CatalogStore::new(),
            orders: InMemoryOrderService::new(),
        }
    }

    /// Returns the session for `cart_id`, creating an empty one on first use.
    pub fn session(&self, cart_id: &str) -> Arc<CartSession> {
        self.carts
            .entry(cart_id.to_string())
            .or_insert_with(|| Arc::new(CartSession::new()))
            .clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
