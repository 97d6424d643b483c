//! HTTP handlers.

pub mod product;
pub use product::*;

use axum::Json;

/// `GET /api` greeting.
#[utoipa::path(
    get,
    path = "/api",
    responses((status = 200, description = "Service greeting", body = String))
)]
pub async fn api_root() -> Json<&'static str> {
    Json("Desde server")
}
