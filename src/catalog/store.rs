//! In-memory catalog snapshot
//!
//! Holds the last fetched view of the product catalog. `replace_all` swaps
//! the entire snapshot in one step, mirroring a wholesale catalog refresh;
//! individual products are never mutated in place.

use super::models::{Product, RawProduct};
use dashmap::DashMap;

/// Read-only product snapshot, keyed by product id.
#[derive(Default)]
pub struct CatalogStore {
    products: DashMap<String, Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
        }
    }

    /// Looks up a product by id, returning a copy of the snapshot record.
    pub fn get_product(&self, id: &str) -> Option<Product> {
        self.products.get(id).map(|p| p.clone())
    }

    /// Replaces the whole snapshot with freshly fetched records, skipping
    /// (and logging) any that fail validation.
    pub fn replace_all(&self, records: Vec<RawProduct>) {
        self.products.clear();
        for raw in records {
            match Product::try_from(raw) {
                Ok(product) => {
                    self.products.insert(product.id.clone(), product);
                }
                Err(reason) => {
                    tracing::warn!("skipping malformed catalog record: {}", reason);
                }
            }
        }
    }

    /// Number of products currently in the snapshot.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, stock: u32) -> RawProduct {
        RawProduct {
            id: id.to_string(),
            name: format!("Product {}", id),
            sku: format!("SKU-{}", id),
            price: 10000,
            stock,
            unit: "pcs".to_string(),
        }
    }

    #[test]
    fn replace_all_swaps_the_snapshot() {
        let store = CatalogStore::new();
        store.replace_all(vec![raw("a", 3), raw("b", 5)]);
        assert_eq!(store.len(), 2);

        store.replace_all(vec![raw("c", 1)]);
        assert_eq!(store.len(), 1);
        assert!(store.get_product("a").is_none());
        assert_eq!(store.get_product("c").unwrap().stock, 1);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let store = CatalogStore::new();
        let mut bad = raw("x", 3);
        bad.id = String::new();
        store.replace_all(vec![bad, raw("ok", 2)]);
        assert_eq!(store.len(), 1);
        assert!(store.get_product("ok").is_some());
    }
}
