//! Cart Domain Models
//!
//! Data structures for the cart business domain: line items, discounts,
//! computed totals, and the wire shapes used by the REST adapter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

// =============================================================================
// Line items
// =============================================================================

/// One product entry in a cart.
///
/// `line_subtotal` is always `unit_price * quantity`; it is recomputed on
/// every mutation and never treated as an independent source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Identity key; no two lines in a cart share one.
    pub product_id: String,
    pub name: String,
    pub sku: String,
    /// Whole currency units, non-negative.
    pub unit_price: u64,
    /// Always positive; a quantity of zero removes the line instead.
    pub quantity: u32,
    /// Maximum allowed quantity at last catalog read. Advisory only.
    pub stock_snapshot: u32,
    pub line_subtotal: u64,
}

impl CartLine {
    /// Creates a line from a validated product, freezing price and stock at
    /// the moment of adding.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            unit_price: product.price,
            quantity,
            stock_snapshot: product.stock,
            line_subtotal: product.price.saturating_mul(u64::from(quantity)),
        }
    }

    /// Recomputes `line_subtotal` after a quantity change. Saturates rather
    /// than wraps on absurd catalog prices.
    pub fn recompute_subtotal(&mut self) {
        self.line_subtotal = self.unit_price.saturating_mul(u64::from(self.quantity));
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// A flat amount in whole currency units, capped at the subtotal.
    Amount,
    /// A percentage of the subtotal, 0 to 100.
    Percentage,
}

/// A single discount rule. A cart holds at most one; applying a new one
/// replaces the old wholesale, never accumulates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub kind: DiscountKind,
    pub value: Decimal,
}

// =============================================================================
// Totals
// =============================================================================

/// Derived monetary totals for a cart. All values are whole currency units,
/// rounded half-up as they are produced.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: u64,
    pub discount_amount: u64,
    pub tax_amount: u64,
    pub total: u64,
}

// =============================================================================
// Wire shapes (REST adapter)
// =============================================================================

/// Returns the default quantity (1) for added items
fn default_quantity() -> u32 {
    1
}

/// Input for adding a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub product_id: String,

    /// Quantity to add (defaults to 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Input for setting a line's quantity. Zero removes the line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityInput {
    pub quantity: u32,
}

/// Input for replacing the cart's discount.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountInput {
    pub kind: DiscountKind,
    pub value: Decimal,
}

/// Full cart view returned after every read or mutation, so the caller
/// always observes an internally consistent snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub discount: Option<Discount>,
    pub totals: CartTotals,
    pub item_count: u32,
}
