use validator::Validate;

use crate::{
    dto::products::{ProductList, ProductRequest},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items = state.catalog.find_all().await?;
    let meta = Meta::all(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i64) -> AppResult<ApiResponse<Product>> {
    let result = state.catalog.find_by_id(id).await?;
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::ProductNotFound(id)),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn create_product(
    state: &AppState,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    let product = state.catalog.insert(payload.into()).await?;

    tracing::info!(product_id = product.id, price = %product.price, "product created");

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

/// Replaces every descriptive field and the price. Carts keep the price they
/// captured until the product is merged into them again.
pub async fn update_product(
    state: &AppState,
    id: i64,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    let product = state.catalog.update(id, payload.into()).await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::ProductNotFound(id)),
    };

    tracing::info!(product_id = product.id, price = %product.price, "product updated");

    Ok(ApiResponse::success(
        "Updated",
        product,
        Some(Meta::empty()),
    ))
}

/// Products still referenced by a cart line cannot be deleted.
pub async fn delete_product(state: &AppState, id: i64) -> AppResult<()> {
    if !state.catalog.exists(id).await? {
        return Err(AppError::ProductNotFound(id));
    }

    let references = state.carts.count_line_items_for_product(id).await?;
    if references > 0 {
        return Err(AppError::Validation(format!(
            "product {id} is referenced by {references} cart line item(s)"
        )));
    }

    if !state.catalog.delete_by_id(id).await? {
        return Err(AppError::ProductNotFound(id));
    }

    tracing::info!(product_id = id, "product deleted");
    Ok(())
}
