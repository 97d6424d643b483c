//! Shared application state for all routes.

use crate::store::ProductStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Injected so tests can swap in the in-memory store.
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new<S: ProductStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
