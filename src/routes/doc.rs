use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{CartItemRequest, CartList, CartView, CreateCartRequest, FinalizeCartRequest, LineItemView},
        products::{ProductList, ProductRequest},
    },
    models::{CartStatus, Product},
    response::{ApiResponse, Meta},
    routes::{carts, health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        carts::create_cart,
        carts::list_carts,
        carts::get_cart,
        carts::delete_cart,
        carts::add_item,
        carts::remove_item,
        carts::finalize_cart
    ),
    components(
        schemas(
            Product,
            ProductRequest,
            ProductList,
            CartStatus,
            CartView,
            LineItemView,
            CartList,
            CreateCartRequest,
            CartItemRequest,
            FinalizeCartRequest,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<CartList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Carts", description = "Shopping cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
