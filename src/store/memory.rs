use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Cart, Product, ProductFields},
    store::{CartStore, ProductCatalog},
};

#[derive(Debug, Default)]
struct ProductTable {
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

/// Product catalog held in process memory. Ids start at 1.
#[derive(Debug, Default)]
pub struct MemoryProductCatalog {
    table: RwLock<ProductTable>,
}

impl MemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductCatalog for MemoryProductCatalog {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.read().rows.contains_key(&id))
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn insert(&self, fields: ProductFields) -> AppResult<Product> {
        let mut table = self.table.write();
        table.last_id += 1;
        let product = Product {
            id: table.last_id,
            name: fields.name,
            brand: fields.brand,
            model: fields.model,
            specification: fields.specification,
            price: fields.price,
            created_at: Utc::now(),
        };
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, fields: ProductFields) -> AppResult<Option<Product>> {
        let mut table = self.table.write();
        let Some(product) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        product.name = fields.name;
        product.brand = fields.brand;
        product.model = fields.model;
        product.specification = fields.specification;
        product.price = fields.price;
        Ok(Some(product.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().rows.remove(&id).is_some())
    }
}

#[derive(Debug, Default)]
struct CartTable {
    last_cart_id: i64,
    last_line_item_id: i64,
    rows: BTreeMap<i64, Cart>,
}

/// Cart store held in process memory.
///
/// A cart and its line items live in one map entry, so every `save` replaces
/// the whole aggregate under a single write lock.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    table: RwLock<CartTable>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn save(&self, mut cart: Cart) -> AppResult<Cart> {
        let mut table = self.table.write();

        let id = match cart.id {
            Some(id) => {
                let stored = table.rows.get(&id).ok_or(AppError::CartNotFound(id))?;
                let stale = cart.items.iter().filter_map(|item| item.id).find(|line_id| {
                    !stored.items.iter().any(|kept| kept.id == Some(*line_id))
                });
                if let Some(line_id) = stale {
                    return Err(AppError::LineItemNotFound(line_id));
                }
                cart.created_at = stored.created_at;
                id
            }
            None => {
                table.last_cart_id += 1;
                table.last_cart_id
            }
        };
        cart.id = Some(id);
        cart.created_at.get_or_insert_with(Utc::now);

        for item in cart.items.iter_mut().filter(|item| item.id.is_none()) {
            table.last_line_item_id += 1;
            item.id = Some(table.last_line_item_id);
        }

        table.rows.insert(id, cart.clone());
        Ok(cart)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Cart>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Cart>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().rows.remove(&id).is_some())
    }

    async fn delete_line_item(&self, line_item_id: i64) -> AppResult<()> {
        let mut table = self.table.write();
        let owner = table
            .rows
            .values_mut()
            .find(|cart| cart.items.iter().any(|item| item.id == Some(line_item_id)));
        if let Some(cart) = owner {
            cart.items.retain(|item| item.id != Some(line_item_id));
            cart.recalculate_total()?;
        }
        Ok(())
    }

    async fn count_line_items_for_product(&self, product_id: i64) -> AppResult<u64> {
        let count = self
            .table
            .read()
            .rows
            .values()
            .flat_map(|cart| cart.items.iter())
            .filter(|item| item.product_id == product_id)
            .count();
        Ok(count as u64)
    }
}
