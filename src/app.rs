//! Application assembly: routers, documentation and cross-cutting layers.

use crate::config::Settings;
use crate::docs::ApiDoc;
use crate::handlers::api_root;
use crate::routes::{common_routes, product_routes};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const PRODUCTS_PREFIX: &str = "/api/json/v1/products";

const BODY_LIMIT: usize = 1024 * 1024;

pub fn build_app(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .route("/api", get(api_root))
        .nest(PRODUCTS_PREFIX, product_routes(state))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(cors_layer(&settings.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Allow-list of origins, or any origin when the list is empty.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
