use axum::{Router, routing::get};

use crate::state::AppState;

pub mod carts;
pub mod doc;
pub mod health;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/produtos", products::router())
        .nest("/carrinhos", carts::router())
}
