//! Product routes. Each handler's `Validated<_>` argument carries its rule chain,
//! so validation runs and short-circuits before the handler body.

use crate::handlers::product::{
    create_product, delete_product, get_product, list_products, update_availability, update_product,
};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Mounted under `/api/json/v1/products`.
pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product)
                .put(update_product)
                .patch(update_availability)
                .delete(delete_product),
        )
        .with_state(state)
}
