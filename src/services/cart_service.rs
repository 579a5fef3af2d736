//! Cart aggregate operations.
//!
//! Every mutation follows the same unit of work: load the aggregate from the
//! cart store, apply the change in memory, persist the whole aggregate back.
//! If the final save fails the in-memory change is simply dropped.
//!
//! Two requests mutating the same cart concurrently are not serialized here;
//! the last save wins.

use chrono::Utc;
use validator::Validate;

use crate::{
    dto::cart::{CartList, CartView, CreateCartRequest, FinalizeCartRequest},
    error::{AppError, AppResult},
    models::{Cart, MergeOutcome, Product},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_cart(
    state: &AppState,
    payload: CreateCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    payload.validate()?;

    let mut cart = Cart::new();
    for item in &payload.items {
        let product = state
            .catalog
            .find_by_id(item.product_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("product {} does not exist", item.product_id))
            })?;
        cart.merge_product(&product, item.quantity)
            .map_err(|err| match err {
                AppError::InvalidQuantity(q) => {
                    AppError::Validation(format!("invalid quantity {q} for product {}", product.id))
                }
                other => other,
            })?;
    }

    let cart = state.carts.save(cart).await?;
    tracing::info!(
        cart_id = ?cart.id,
        items = cart.items.len(),
        total = %cart.total,
        "cart created"
    );

    Ok(ApiResponse::success(
        "Cart created",
        CartView::try_from(cart)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_carts(state: &AppState) -> AppResult<ApiResponse<CartList>> {
    let items = state
        .carts
        .find_all()
        .await?
        .into_iter()
        .map(CartView::try_from)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::all(items.len());
    Ok(ApiResponse::success("Carts", CartList { items }, Some(meta)))
}

pub async fn get_cart(state: &AppState, cart_id: i64) -> AppResult<ApiResponse<CartView>> {
    let cart = load_cart(state, cart_id).await?;
    Ok(ApiResponse::success("Cart", CartView::try_from(cart)?, None))
}

pub async fn delete_cart(state: &AppState, cart_id: i64) -> AppResult<()> {
    if !state.carts.delete_by_id(cart_id).await? {
        return Err(AppError::CartNotFound(cart_id));
    }
    tracing::info!(cart_id, "cart deleted");
    Ok(())
}

/// Adds `quantity` units of a product to the cart.
///
/// The product id is the merge key: if the cart already holds a line for the
/// product its quantity grows and the whole line is re-priced at the
/// catalog's current price; otherwise a new line is created.
pub async fn add_or_merge_item(
    state: &AppState,
    cart_id: i64,
    product_id: i64,
    quantity: i32,
) -> AppResult<ApiResponse<CartView>> {
    if quantity < 1 {
        return Err(AppError::InvalidQuantity(i64::from(quantity)));
    }

    let mut cart = load_cart(state, cart_id).await?;
    cart.ensure_open()?;
    let product = load_product(state, product_id).await?;

    let outcome = cart.merge_product(&product, quantity)?;
    let cart = state.carts.save(cart).await?;

    tracing::info!(
        cart_id,
        product_id,
        quantity,
        merged = outcome == MergeOutcome::Merged,
        total = %cart.total,
        "cart item added"
    );

    Ok(ApiResponse::success(
        "Item added",
        CartView::try_from(cart)?,
        Some(Meta::empty()),
    ))
}

/// Removes one line, addressed by its own id, and deletes its record.
pub async fn remove_item(
    state: &AppState,
    cart_id: i64,
    line_item_id: i64,
) -> AppResult<ApiResponse<CartView>> {
    let mut cart = load_cart(state, cart_id).await?;

    let detached = cart.detach_line_item(line_item_id)?;
    state.carts.delete_line_item(line_item_id).await?;
    let cart = state.carts.save(cart).await?;

    tracing::info!(
        cart_id,
        line_item_id,
        product_id = detached.product_id,
        total = %cart.total,
        "cart item removed"
    );

    Ok(ApiResponse::success(
        "Removed from cart",
        CartView::try_from(cart)?,
        Some(Meta::empty()),
    ))
}

pub async fn finalize_cart(
    state: &AppState,
    cart_id: i64,
    payload: FinalizeCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    if !payload.confirmation {
        return Err(AppError::Validation(
            "finalization must be confirmed".into(),
        ));
    }

    let mut cart = load_cart(state, cart_id).await?;
    cart.finalize(Utc::now())?;
    let cart = state.carts.save(cart).await?;

    tracing::info!(cart_id, total = %cart.total, "cart finalized");

    Ok(ApiResponse::success(
        "Cart finalized",
        CartView::try_from(cart)?,
        Some(Meta::empty()),
    ))
}

async fn load_cart(state: &AppState, cart_id: i64) -> AppResult<Cart> {
    state
        .carts
        .find_by_id(cart_id)
        .await?
        .ok_or(AppError::CartNotFound(cart_id))
}

async fn load_product(state: &AppState, product_id: i64) -> AppResult<Product> {
    state
        .catalog
        .find_by_id(product_id)
        .await?
        .ok_or(AppError::ProductNotFound(product_id))
}
