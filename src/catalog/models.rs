//! Catalog Domain Models
//!
//! `RawProduct` is the wire shape of a catalog record; `Product` is the
//! validated value type the rest of the engine works with. Malformed records
//! are rejected at this boundary and never reach the cart.

use serde::{Deserialize, Serialize};

/// A catalog record as received from the catalog service, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub name: String,
    pub sku: String,
    /// Whole currency units; the target currency has zero minor-unit digits.
    pub price: u64,
    pub stock: u32,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "pcs".to_string()
}

/// A validated product. Construction goes through `TryFrom<RawProduct>`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price: u64,
    /// Available stock at last catalog read ("last fetched", not live).
    pub stock: u32,
    pub unit: String,
}

impl TryFrom<RawProduct> for Product {
    type Error = String;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err("product id must not be empty".to_string());
        }
        if raw.name.trim().is_empty() {
            return Err(format!("product {} has an empty name", raw.id));
        }
        if raw.sku.trim().is_empty() {
            return Err(format!("product {} has an empty sku", raw.id));
        }

        Ok(Product {
            id: raw.id,
            name: raw.name,
            sku: raw.sku,
            price: raw.price,
            stock: raw.stock,
            unit: raw.unit,
        })
    }
}
