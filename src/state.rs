use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::store::{
    CartStore, MemoryCartStore, MemoryProductCatalog, OrmCartStore, OrmProductCatalog,
    ProductCatalog,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ProductCatalog>,
    pub carts: Arc<dyn CartStore>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn ProductCatalog>, carts: Arc<dyn CartStore>) -> Self {
        Self { catalog, carts }
    }

    pub fn with_orm(orm: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(OrmProductCatalog::new(orm.clone())),
            Arc::new(OrmCartStore::new(orm)),
        )
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryProductCatalog::new()),
            Arc::new(MemoryCartStore::new()),
        )
    }
}
