//! Stock Guard
//!
//! Advisory pre-validation of requested quantities against the last catalog
//! read. A passing check improves UX but proves nothing: the snapshot can be
//! stale, and the authoritative check happens inside the order service at
//! order-creation time.

use crate::error::CartError;

/// Checks a requested cumulative quantity for a product against its stock
/// snapshot. The caller must reject the triggering mutation atomically when
/// this fails.
pub fn check_stock(product_id: &str, requested: u32, available: u32) -> Result<(), CartError> {
    if requested > available {
        return Err(CartError::StockExceeded {
            product_id: product_id.to_string(),
            requested,
            available,
        });
    }
    Ok(())
}
