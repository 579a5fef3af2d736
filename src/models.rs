use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub specification: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Everything a product carries besides its store-assigned identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub specification: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    Open,
    Finalized,
}

/// A product line inside a cart.
///
/// `id` stays `None` until the cart store persists the line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: Option<i64>,
    pub product_id: i64,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

impl LineItem {
    pub fn new(product: &Product, quantity: i32) -> AppResult<Self> {
        ensure_quantity(i64::from(quantity))?;
        Ok(Self {
            id: None,
            product_id: product.id,
            unit_price: product.price,
            quantity,
            subtotal: line_subtotal(product.price, quantity)?,
        })
    }

    /// Adds `quantity` units and re-prices the whole line at `unit_price`.
    pub fn merge(&mut self, quantity: i32, unit_price: Decimal) -> AppResult<()> {
        ensure_quantity(i64::from(quantity))?;
        let merged = self
            .quantity
            .checked_add(quantity)
            .ok_or(AppError::InvalidQuantity(
                i64::from(self.quantity) + i64::from(quantity),
            ))?;
        let subtotal = line_subtotal(unit_price, merged)?;

        self.quantity = merged;
        self.unit_price = unit_price;
        self.subtotal = subtotal;
        Ok(())
    }
}

fn ensure_quantity(quantity: i64) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::InvalidQuantity(quantity));
    }
    Ok(())
}

fn line_subtotal(unit_price: Decimal, quantity: i32) -> AppResult<Decimal> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| AppError::Validation("line item subtotal is out of range".into()))
}

/// Sum of the subtotals of `items`.
pub fn sum_subtotals(items: &[LineItem]) -> AppResult<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.subtotal))
        .ok_or_else(|| AppError::Validation("cart total is out of range".into()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Merged,
}

/// The cart aggregate: a cart together with the line items it owns.
///
/// Every mutating method leaves `total` equal to the sum of the line
/// subtotals. Once finalized the cart rejects any further mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: Option<i64>,
    pub items: Vec<LineItem>,
    pub total: Decimal,
    pub status: CartStatus,
    pub finalized_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self {
            id: None,
            items: Vec::new(),
            total: Decimal::ZERO,
            status: CartStatus::Open,
            finalized_at: None,
            created_at: None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.status == CartStatus::Finalized
    }

    pub fn ensure_open(&self) -> AppResult<()> {
        if self.is_finalized() {
            return Err(AppError::CartFinalized(self.id.unwrap_or_default()));
        }
        Ok(())
    }

    /// First line holding `product_id`, the merge key.
    pub fn line_for_product(&self, product_id: i64) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Adds `quantity` units of `product`, merging into the line that already
    /// holds the product if there is one.
    pub fn merge_product(&mut self, product: &Product, quantity: i32) -> AppResult<MergeOutcome> {
        self.ensure_open()?;

        let outcome = match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            Some(existing) => {
                existing.merge(quantity, product.price)?;
                MergeOutcome::Merged
            }
            None => {
                self.items.push(LineItem::new(product, quantity)?);
                MergeOutcome::Inserted
            }
        };

        self.recalculate_total()?;
        Ok(outcome)
    }

    /// Takes the line with `line_item_id` out of the cart and returns it.
    /// The caller is responsible for deleting its persisted record.
    pub fn detach_line_item(&mut self, line_item_id: i64) -> AppResult<LineItem> {
        self.ensure_open()?;

        let position = self
            .items
            .iter()
            .position(|item| item.id == Some(line_item_id))
            .ok_or(AppError::LineItemNotFound(line_item_id))?;
        let detached = self.items.remove(position);

        self.recalculate_total()?;
        Ok(detached)
    }

    pub fn recalculate_total(&mut self) -> AppResult<()> {
        self.total = sum_subtotals(&self.items)?;
        Ok(())
    }

    pub fn finalize(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        self.ensure_open()?;
        if self.items.is_empty() {
            return Err(AppError::Validation(
                "an empty cart cannot be finalized".into(),
            ));
        }
        self.status = CartStatus::Finalized;
        self.finalized_at = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            brand: "Acme".into(),
            model: "X1".into(),
            specification: "Test fixture".into(),
            price,
            created_at: Utc::now(),
        }
    }

    /// Simulates the store assigning ids to lines that have none.
    fn assign_ids(cart: &mut Cart) {
        let mut next = cart.items.iter().filter_map(|i| i.id).max().unwrap_or(0);
        for item in cart.items.iter_mut().filter(|i| i.id.is_none()) {
            next += 1;
            item.id = Some(next);
        }
    }

    #[test]
    fn new_cart_is_open_and_empty() {
        let cart = Cart::new();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);
        assert_eq!(cart.status, CartStatus::Open);
    }

    #[test]
    fn merging_the_same_product_keeps_one_line() {
        let mut cart = Cart::new();
        let p = product(1, dec!(10.00));

        assert_eq!(cart.merge_product(&p, 2).unwrap(), MergeOutcome::Inserted);
        assert_eq!(cart.total, dec!(20.00));

        assert_eq!(cart.merge_product(&p, 3).unwrap(), MergeOutcome::Merged);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.items[0].subtotal, dec!(50.00));
        assert_eq!(cart.total, dec!(50.00));
    }

    #[test]
    fn distinct_products_get_distinct_lines() {
        let mut cart = Cart::new();
        cart.merge_product(&product(1, dec!(10.00)), 1).unwrap();
        cart.merge_product(&product(2, dec!(2.50)), 4).unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total, dec!(20.00));
        assert_eq!(cart.total, sum_subtotals(&cart.items).unwrap());
    }

    #[test]
    fn merge_reprices_the_whole_line_at_the_current_price() {
        let mut cart = Cart::new();
        cart.merge_product(&product(1, dec!(10.00)), 2).unwrap();
        cart.merge_product(&product(1, dec!(12.00)), 1).unwrap();

        let line = cart.line_for_product(1).unwrap();
        assert_eq!(line.unit_price, dec!(12.00));
        assert_eq!(line.subtotal, dec!(36.00));
        assert_eq!(cart.total, dec!(36.00));
    }

    #[test]
    fn zero_quantity_is_rejected_without_touching_the_cart() {
        let mut cart = Cart::new();
        let p = product(1, dec!(10.00));
        cart.merge_product(&p, 1).unwrap();
        let before = cart.clone();

        let err = cart.merge_product(&p, 0).unwrap_err();
        assert!(matches!(err, AppError::InvalidQuantity(0)));
        assert_eq!(cart, before);
    }

    #[test]
    fn quantity_overflow_is_rejected() {
        let mut cart = Cart::new();
        let p = product(1, dec!(1));
        cart.merge_product(&p, i32::MAX).unwrap();
        let before = cart.clone();

        let err = cart.merge_product(&p, 1).unwrap_err();
        assert!(matches!(err, AppError::InvalidQuantity(_)));
        assert_eq!(cart, before);
    }

    #[test]
    fn detaching_the_only_line_zeroes_the_total() {
        let mut cart = Cart::new();
        cart.merge_product(&product(1, dec!(10.00)), 2).unwrap();
        assign_ids(&mut cart);
        let id = cart.items[0].id.unwrap();

        let detached = cart.detach_line_item(id).unwrap();
        assert_eq!(detached.product_id, 1);
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);
    }

    #[test]
    fn detaching_an_unknown_line_leaves_the_cart_unchanged() {
        let mut cart = Cart::new();
        cart.merge_product(&product(1, dec!(10.00)), 2).unwrap();
        assign_ids(&mut cart);
        let before = cart.clone();

        let err = cart.detach_line_item(999).unwrap_err();
        assert!(matches!(err, AppError::LineItemNotFound(999)));
        assert_eq!(cart, before);
    }

    #[test]
    fn finalized_cart_rejects_mutation() {
        let mut cart = Cart::new();
        cart.id = Some(7);
        cart.merge_product(&product(1, dec!(10.00)), 1).unwrap();
        assign_ids(&mut cart);
        cart.finalize(Utc::now()).unwrap();

        assert!(matches!(
            cart.merge_product(&product(1, dec!(10.00)), 1),
            Err(AppError::CartFinalized(7))
        ));
        assert!(matches!(
            cart.detach_line_item(1),
            Err(AppError::CartFinalized(7))
        ));
        assert!(matches!(
            cart.finalize(Utc::now()),
            Err(AppError::CartFinalized(7))
        ));
    }

    #[test]
    fn empty_cart_cannot_be_finalized() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.finalize(Utc::now()),
            Err(AppError::Validation(_))
        ));
        assert_eq!(cart.status, CartStatus::Open);
    }
}
