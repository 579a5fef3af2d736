use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::cart::{AddItemQuery, CartList, CartView, CreateCartRequest, FinalizeCartRequest},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_carts).post(create_cart))
        .route("/{id}", get(get_cart).delete(delete_cart))
        // POST takes a product id, DELETE a line-item id.
        .route("/{id}/itens/{key}", post(add_item).delete(remove_item))
        .route("/{id}/finalizar", post(finalize_cart))
}

#[utoipa::path(
    post,
    path = "/carrinhos",
    request_body(content = CreateCartRequest, description = "Optional initial items"),
    responses(
        (status = 201, description = "Cart created", body = ApiResponse<CartView>),
        (status = 400, description = "Unknown product or invalid quantity"),
    ),
    tag = "Carts"
)]
pub async fn create_cart(
    State(state): State<AppState>,
    payload: Result<Option<Json<CreateCartRequest>>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<CartView>>)> {
    let payload = payload?.map(|Json(p)| p).unwrap_or_default();
    let resp = cart_service::create_cart(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/carrinhos",
    responses(
        (status = 200, description = "List carts", body = ApiResponse<CartList>)
    ),
    tag = "Carts"
)]
pub async fn list_carts(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartList>>> {
    let resp = cart_service::list_carts(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/carrinhos/{id}",
    params(
        ("id" = i64, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Get cart", body = ApiResponse<CartView>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let Path(id) = path?;
    let resp = cart_service::get_cart(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/carrinhos/{id}",
    params(
        ("id" = i64, Path, description = "Cart ID")
    ),
    responses(
        (status = 204, description = "Cart and its items deleted"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn delete_cart(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    cart_service::delete_cart(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/carrinhos/{id}/itens/{product_id}",
    params(
        ("id" = i64, Path, description = "Cart ID"),
        ("product_id" = i64, Path, description = "Product ID"),
        AddItemQuery
    ),
    responses(
        (status = 201, description = "Item added or merged", body = ApiResponse<CartView>),
        (status = 400, description = "Invalid quantity or finalized cart"),
        (status = 404, description = "Cart or product not found"),
    ),
    tag = "Carts"
)]
pub async fn add_item(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    query: Result<Query<AddItemQuery>, QueryRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<CartView>>)> {
    let Path((id, product_id)) = path?;
    let Query(query) = query?;
    let resp = cart_service::add_or_merge_item(&state, id, product_id, query.quantity).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/carrinhos/{id}/itens/{item_id}",
    params(
        ("id" = i64, Path, description = "Cart ID"),
        ("item_id" = i64, Path, description = "Line item ID")
    ),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<CartView>),
        (status = 400, description = "Finalized cart"),
        (status = 404, description = "Cart or line item not found"),
    ),
    tag = "Carts"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let Path((id, item_id)) = path?;
    let resp = cart_service::remove_item(&state, id, item_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/carrinhos/{id}/finalizar",
    params(
        ("id" = i64, Path, description = "Cart ID")
    ),
    request_body = FinalizeCartRequest,
    responses(
        (status = 201, description = "Cart finalized", body = ApiResponse<CartView>),
        (status = 400, description = "Not confirmed, empty or already finalized"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn finalize_cart(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FinalizeCartRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<CartView>>)> {
    let Path(id) = path?;
    let Json(payload) = payload?;
    let resp = cart_service::finalize_cart(&state, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
