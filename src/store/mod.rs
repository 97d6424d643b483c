//! Product persistence: the `ProductStore` seam, its PostgreSQL and in-memory backends, and the connect lifecycle.

mod memory;
mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

use crate::models::{NewProduct, Product};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Each handler performs at most one read and one write through this trait.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Round-trip to the backend.
    async fn ping(&self) -> StoreResult<()>;

    /// Create the products table if missing. With `force`, drop existing records first.
    async fn sync(&self, force: bool) -> StoreResult<()>;

    /// All records, price ascending.
    async fn list(&self) -> StoreResult<Vec<Product>>;

    async fn find(&self, id: i32) -> StoreResult<Option<Product>>;

    async fn create(&self, input: NewProduct) -> StoreResult<Product>;

    /// Persist name, price and availability of an existing record. `None` if it is gone.
    async fn save(&self, product: &Product) -> StoreResult<Option<Product>>;

    /// Remove a record. Returns whether it existed.
    async fn destroy(&self, id: i32) -> StoreResult<bool>;
}

/// Authenticate against the store and sync the schema. Failure is logged and
/// reported as `false`; the caller keeps serving in a degraded state.
pub async fn connect_db(store: &dyn ProductStore) -> bool {
    let result = match store.ping().await {
        Ok(()) => store.sync(false).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            tracing::info!("Conexión exitosa a la BD");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Hubo un error al conectar a la BD");
            false
        }
    }
}
