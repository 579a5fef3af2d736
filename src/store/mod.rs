//! Persistence contracts consumed by the services.
//!
//! Services never talk to a database directly: they receive these handles
//! through [`crate::state::AppState`]. [`orm`] backs them with PostgreSQL,
//! [`memory`] keeps everything in-process.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Cart, Product, ProductFields},
};

pub mod memory;
pub mod orm;

pub use memory::{MemoryCartStore, MemoryProductCatalog};
pub use orm::{OrmCartStore, OrmProductCatalog};

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    async fn exists(&self, id: i64) -> AppResult<bool>;

    async fn find_all(&self) -> AppResult<Vec<Product>>;

    async fn insert(&self, fields: ProductFields) -> AppResult<Product>;

    /// Replaces every field of the product. `None` when `id` is unknown.
    async fn update(&self, id: i64, fields: ProductFields) -> AppResult<Option<Product>>;

    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    /// Writes the cart and its line items as one unit, assigning ids to any
    /// that do not have one yet, and returns the stored aggregate.
    async fn save(&self, cart: Cart) -> AppResult<Cart>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Cart>>;

    async fn find_all(&self) -> AppResult<Vec<Cart>>;

    /// Deletes the cart together with every line item it owns.
    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;

    async fn delete_line_item(&self, line_item_id: i64) -> AppResult<()>;

    async fn count_line_items_for_product(&self, product_id: i64) -> AppResult<u64>;
}
