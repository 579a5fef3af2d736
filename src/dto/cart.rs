use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppError,
    models::{Cart, CartStatus, LineItem},
};

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct CreateCartRequest {
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<CartItemRequest>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CartItemRequest {
    pub product_id: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddItemQuery {
    /// Units to add, at least 1.
    #[serde(rename = "quantidade")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FinalizeCartRequest {
    #[serde(alias = "confirmacao")]
    pub confirmation: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LineItemView {
    pub id: i64,
    pub product_id: i64,
    #[schema(value_type = String, example = "10.00")]
    pub unit_price: Decimal,
    pub quantity: i32,
    #[schema(value_type = String, example = "20.00")]
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartView {
    pub id: i64,
    pub items: Vec<LineItemView>,
    #[schema(value_type = String, example = "20.00")]
    pub total: Decimal,
    pub status: CartStatus,
    pub finalized_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartList {
    pub items: Vec<CartView>,
}

impl TryFrom<LineItem> for LineItemView {
    type Error = AppError;

    fn try_from(item: LineItem) -> Result<Self, Self::Error> {
        let id = item
            .id
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("line item was not persisted")))?;
        Ok(Self {
            id,
            product_id: item.product_id,
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal: item.subtotal,
        })
    }
}

impl TryFrom<Cart> for CartView {
    type Error = AppError;

    fn try_from(cart: Cart) -> Result<Self, Self::Error> {
        let id = cart
            .id
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("cart was not persisted")))?;
        let items = cart
            .items
            .into_iter()
            .map(LineItemView::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id,
            items,
            total: cart.total,
            status: cart.status,
            finalized_at: cart.finalized_at,
            created_at: cart.created_at,
        })
    }
}
