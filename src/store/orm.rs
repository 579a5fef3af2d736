use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    entity::{
        cart_line_items::{
            ActiveModel as LineItemActive, Column as LineItemCol, Entity as CartLineItems,
            Model as LineItemModel,
        },
        carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts, Model as CartModel},
        products::{
            ActiveModel as ProductActive, Column as ProductCol, Entity as Products,
            Model as ProductModel,
        },
    },
    error::{AppError, AppResult},
    models::{Cart, CartStatus, LineItem, Product, ProductFields},
    store::{CartStore, ProductCatalog},
};

#[derive(Clone)]
pub struct OrmProductCatalog {
    conn: DatabaseConnection,
}

impl OrmProductCatalog {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ProductCatalog for OrmProductCatalog {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        let product = Products::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(product_from_entity);
        Ok(product)
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let count = Products::find()
            .filter(ProductCol::Id.eq(id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let products = Products::find()
            .order_by_asc(ProductCol::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn insert(&self, fields: ProductFields) -> AppResult<Product> {
        let active = ProductActive {
            id: NotSet,
            name: Set(fields.name),
            brand: Set(fields.brand),
            model: Set(fields.model),
            specification: Set(fields.specification),
            price: Set(fields.price),
            created_at: NotSet,
        };
        let product = active.insert(&self.conn).await?;
        Ok(product_from_entity(product))
    }

    async fn update(&self, id: i64, fields: ProductFields) -> AppResult<Option<Product>> {
        let existing = Products::find_by_id(id).one(&self.conn).await?;
        let existing = match existing {
            Some(p) => p,
            None => return Ok(None),
        };

        let mut active: ProductActive = existing.into();
        active.name = Set(fields.name);
        active.brand = Set(fields.brand);
        active.model = Set(fields.model);
        active.specification = Set(fields.specification);
        active.price = Set(fields.price);

        let product = active.update(&self.conn).await?;
        Ok(Some(product_from_entity(product)))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = Products::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}

#[derive(Clone)]
pub struct OrmCartStore {
    conn: DatabaseConnection,
}

impl OrmCartStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CartStore for OrmCartStore {
    async fn save(&self, cart: Cart) -> AppResult<Cart> {
        let txn = self.conn.begin().await?;

        let finalized = cart.is_finalized();
        let finalized_at = cart.finalized_at.map(Into::into);
        let cart_row = match cart.id {
            Some(id) => {
                CartActive {
                    id: Unchanged(id),
                    total: Set(cart.total),
                    finalized: Set(finalized),
                    finalized_at: Set(finalized_at),
                    created_at: NotSet,
                }
                .update(&txn)
                .await
                .map_err(|err| not_updated_as(err, AppError::CartNotFound(id)))?
            }
            None => {
                CartActive {
                    id: NotSet,
                    total: Set(cart.total),
                    finalized: Set(finalized),
                    finalized_at: Set(finalized_at),
                    created_at: NotSet,
                }
                .insert(&txn)
                .await?
            }
        };

        let mut item_rows = Vec::with_capacity(cart.items.len());
        for item in cart.items {
            let row = match item.id {
                Some(id) => {
                    LineItemActive {
                        id: Unchanged(id),
                        cart_id: NotSet,
                        product_id: NotSet,
                        quantity: Set(item.quantity),
                        unit_price: Set(item.unit_price),
                        subtotal: Set(item.subtotal),
                    }
                    .update(&txn)
                    .await
                    .map_err(|err| not_updated_as(err, AppError::LineItemNotFound(id)))?
                }
                None => {
                    LineItemActive {
                        id: NotSet,
                        cart_id: Set(cart_row.id),
                        product_id: Set(item.product_id),
                        quantity: Set(item.quantity),
                        unit_price: Set(item.unit_price),
                        subtotal: Set(item.subtotal),
                    }
                    .insert(&txn)
                    .await?
                }
            };
            item_rows.push(row);
        }

        txn.commit().await?;

        Ok(cart_from_entity(cart_row, item_rows))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Cart>> {
        let cart = Carts::find_by_id(id).one(&self.conn).await?;
        let cart = match cart {
            Some(c) => c,
            None => return Ok(None),
        };

        let items = cart
            .find_related(CartLineItems)
            .order_by_asc(LineItemCol::Id)
            .all(&self.conn)
            .await?;

        Ok(Some(cart_from_entity(cart, items)))
    }

    async fn find_all(&self) -> AppResult<Vec<Cart>> {
        let carts = Carts::find()
            .order_by_asc(CartCol::Id)
            .find_with_related(CartLineItems)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|(cart, items)| cart_from_entity(cart, items))
            .collect();
        Ok(carts)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let txn = self.conn.begin().await?;

        CartLineItems::delete_many()
            .filter(LineItemCol::CartId.eq(id))
            .exec(&txn)
            .await?;
        let result = Carts::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_line_item(&self, line_item_id: i64) -> AppResult<()> {
        CartLineItems::delete_by_id(line_item_id)
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn count_line_items_for_product(&self, product_id: i64) -> AppResult<u64> {
        let count = CartLineItems::find()
            .filter(LineItemCol::ProductId.eq(product_id))
            .count(&self.conn)
            .await?;
        Ok(count)
    }
}

/// An update that matched no row means the record was deleted after the
/// aggregate was loaded.
fn not_updated_as(err: DbErr, missing: AppError) -> AppError {
    match err {
        DbErr::RecordNotUpdated => missing,
        other => AppError::OrmError(other),
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        brand: model.brand,
        model: model.model,
        specification: model.specification,
        price: model.price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn line_item_from_entity(model: LineItemModel) -> LineItem {
    LineItem {
        id: Some(model.id),
        product_id: model.product_id,
        unit_price: model.unit_price,
        quantity: model.quantity,
        subtotal: model.subtotal,
    }
}

fn cart_from_entity(model: CartModel, mut items: Vec<LineItemModel>) -> Cart {
    items.sort_by_key(|item| item.id);
    Cart {
        id: Some(model.id),
        items: items.into_iter().map(line_item_from_entity).collect(),
        total: model.total,
        status: if model.finalized {
            CartStatus::Finalized
        } else {
            CartStatus::Open
        },
        finalized_at: model.finalized_at.map(|dt| dt.with_timezone(&Utc)),
        created_at: Some(model.created_at.with_timezone(&Utc)),
    }
}
