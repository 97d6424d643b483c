//! Product handlers. Each one is reached only after its rule chain passed.

use crate::docs::{DeletedBody, ErrorBodyDoc, ProductBody, ProductListBody, ValidationErrorBody};
use crate::error::AppError;
use crate::extractors::Validated;
use crate::models::{NewProduct, ProductSummary};
use crate::requests::{CreateProduct, ProductId, UpdateProduct, UpdateRequest};
use crate::response::{created, ok, PRODUCT_DELETED};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// List products, cheapest first.
#[utoipa::path(
    get,
    path = "/api/json/v1/products",
    tag = "Products",
    responses(
        (status = 200, description = "Products ordered by price, without timestamps", body = ProductListBody)
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products: Vec<ProductSummary> = state
        .store
        .list()
        .await?
        .into_iter()
        .map(ProductSummary::from)
        .collect();
    Ok(ok(products))
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/json/v1/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductBody),
        (status = 400, description = "Invalid id", body = ValidationErrorBody),
        (status = 404, description = "No such product", body = ErrorBodyDoc)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Validated(ProductId(id)): Validated<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.store.find(id).await?.ok_or(AppError::NotFound)?;
    Ok(ok(product))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/json/v1/products",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductBody),
        (status = 400, description = "Validation failed", body = ValidationErrorBody)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Validated(input): Validated<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.store.create(NewProduct::from(input)).await?;
    tracing::info!(product_id = product.id, "product created");
    Ok(created(product))
}

/// Overwrite name, price and availability.
#[utoipa::path(
    put,
    path = "/api/json/v1/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductBody),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 404, description = "No such product", body = ErrorBodyDoc)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Validated(UpdateRequest { id: ProductId(id), changes }): Validated<UpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut product = state.store.find(id).await?.ok_or(AppError::NotFound)?;
    product.apply(changes);
    let product = state.store.save(&product).await?.ok_or(AppError::NotFound)?;
    tracing::info!(product_id = id, "product updated");
    Ok(ok(product))
}

/// Flip availability.
#[utoipa::path(
    patch,
    path = "/api/json/v1/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Availability toggled", body = ProductBody),
        (status = 400, description = "Invalid id", body = ValidationErrorBody),
        (status = 404, description = "No such product", body = ErrorBodyDoc)
    )
)]
pub async fn update_availability(
    State(state): State<AppState>,
    Validated(ProductId(id)): Validated<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    let mut product = state.store.find(id).await?.ok_or(AppError::NotFound)?;
    product.toggle_availability();
    let product = state.store.save(&product).await?.ok_or(AppError::NotFound)?;
    tracing::info!(product_id = id, availability = product.availability, "availability toggled");
    Ok(ok(product))
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/json/v1/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = DeletedBody),
        (status = 400, description = "Invalid id", body = ValidationErrorBody),
        (status = 404, description = "No such product", body = ErrorBodyDoc)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Validated(ProductId(id)): Validated<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    state.store.find(id).await?.ok_or(AppError::NotFound)?;
    if !state.store.destroy(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(product_id = id, "product deleted");
    Ok(ok(PRODUCT_DELETED))
}
