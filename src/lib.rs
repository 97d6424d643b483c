//! Products API: CRUD over a single product resource with declarative request validation.

pub mod app;
pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod requests;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use app::{build_app, PRODUCTS_PREFIX};
pub use config::Settings;
pub use error::{AppError, ConfigError, PRODUCT_NOT_FOUND};
pub use models::{NewProduct, Product, ProductChanges, ProductSummary};
pub use state::AppState;
pub use store::{connect_db, InMemoryProductStore, PgProductStore, ProductStore, StoreError};
