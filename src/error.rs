//! Typed errors and HTTP mapping.

use crate::service::validation::FieldError;
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Body of every 404 answered for a missing product. The trailing space is part of the wire format.
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado ";

const INTERNAL_ERROR: &str = "Error interno del servidor";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed: {} error(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("product not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
pub struct ErrorBody<T> {
    pub error: T,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: errors })).into_response()
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody { error: PRODUCT_NOT_FOUND }),
            )
                .into_response(),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody { error: INTERNAL_ERROR }),
                )
                    .into_response()
            }
        }
    }
}
