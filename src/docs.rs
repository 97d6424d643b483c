//! OpenAPI document for the products API, served by Swagger UI.

use crate::models::{Product, ProductSummary};
use crate::requests::{CreateProduct, UpdateProduct};
use crate::service::validation::{FieldError, Location};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// `{data: Product}`
#[derive(Serialize, ToSchema)]
pub struct ProductBody {
    pub data: Product,
}

/// `{data: [Product]}` without timestamps.
#[derive(Serialize, ToSchema)]
pub struct ProductListBody {
    pub data: Vec<ProductSummary>,
}

/// `{data: "Producto Eliminado"}`
#[derive(Serialize, ToSchema)]
pub struct DeletedBody {
    #[schema(example = "Producto Eliminado")]
    pub data: String,
}

#[derive(Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub error: Vec<FieldError>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc {
    #[schema(example = "Producto no encontrado ")]
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API Rust / Axum",
        version = "1.0",
        description = "API Docs for Products"
    ),
    paths(
        crate::handlers::api_root,
        crate::handlers::product::list_products,
        crate::handlers::product::get_product,
        crate::handlers::product::create_product,
        crate::handlers::product::update_product,
        crate::handlers::product::update_availability,
        crate::handlers::product::delete_product,
    ),
    components(schemas(
        Product,
        ProductSummary,
        CreateProduct,
        UpdateProduct,
        ProductBody,
        ProductListBody,
        DeletedBody,
        FieldError,
        Location,
        ValidationErrorBody,
        ErrorBodyDoc
    )),
    tags((name = "Products", description = "API operations related to products"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_product_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/json/v1/products"));
        assert!(paths.contains_key("/api/json/v1/products/{id}"));
        assert_eq!(doc.info.title, "REST API Rust / Axum");
        let schemas = &doc.components.as_ref().unwrap().schemas;
        assert!(schemas.contains_key("FieldError"));
        assert!(schemas.contains_key("Location"));
    }
}
