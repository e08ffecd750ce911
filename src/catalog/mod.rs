//! Product Catalog Boundary
//!
//! Read-only view of the product catalog as last fetched. The engine never
//! mutates products; the cart only copies the fields it needs (price, stock
//! snapshot) at the moment a line is created.

pub mod models;
pub mod store;

pub use models::{Product, RawProduct};
pub use store::CatalogStore;
