//! Standard `{data: ...}` response envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Confirmation sent after a delete.
pub const PRODUCT_DELETED: &str = "Producto Eliminado";

#[derive(Serialize)]
pub struct Data<T> {
    pub data: T,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Data<T>>) {
    (StatusCode::CREATED, Json(Data { data }))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<Data<T>>) {
    (StatusCode::OK, Json(Data { data }))
}
