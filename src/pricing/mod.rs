//! Pricing Engine
//!
//! Pure computation from a cart's lines, discount, and tax rate to its
//! monetary totals. No side effects, no I/O; identical input always yields
//! identical output.
//!
//! The target currency has zero minor-unit digits, so every derived value
//! (discount amount, tax amount, total) is rounded half-up to a whole unit
//! as it is produced. Fractions are never carried from one call to the next.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::cart::models::{CartLine, CartTotals, Discount, DiscountKind};

/// Rounds a non-negative decimal half-up to a whole currency unit.
fn round_whole(value: Decimal) -> u64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}

/// Computes the discount amount for a given subtotal. Never negative, never
/// more than the subtotal.
fn discount_amount(subtotal: u64, discount: Option<&Discount>) -> u64 {
    let Some(discount) = discount else {
        return 0;
    };

    let subtotal_dec = Decimal::from(subtotal);
    let raw = match discount.kind {
        DiscountKind::Amount => discount.value,
        DiscountKind::Percentage => subtotal_dec * discount.value / Decimal::from(100),
    };

    round_whole(raw.min(subtotal_dec))
}

/// Computes all derived totals for a cart snapshot.
///
/// `subtotal` is the exact sum of line subtotals; `discount_amount`,
/// `tax_amount`, and `total` are each rounded half-up to whole units.
pub fn compute_totals(
    lines: &[CartLine],
    discount: Option<&Discount>,
    tax_rate: Decimal,
) -> CartTotals {
    let subtotal: u64 = lines.iter().map(|line| line.line_subtotal).sum();
    let discount_amount = discount_amount(subtotal, discount);

    let taxable = Decimal::from(subtotal - discount_amount);
    let tax_amount = round_whole(taxable * tax_rate);
    let total = round_whole(taxable) + tax_amount;

    CartTotals {
        subtotal,
        discount_amount,
        tax_amount,
        total,
    }
}
