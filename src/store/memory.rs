use super::{ProductStore, StoreResult};
use crate::models::{NewProduct, Product};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    next_id: i32,
    products: BTreeMap<i32, Product>,
}

/// In-process store with the same ordering and id rules as the PostgreSQL one.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn sync(&self, force: bool) -> StoreResult<()> {
        if force {
            let mut inner = self.inner.write().await;
            inner.products.clear();
            inner.next_id = 0;
        }
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let inner = self.inner.read().await;
        let mut products: Vec<Product> = inner.products.values().cloned().collect();
        products.sort_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id)));
        Ok(products)
    }

    async fn find(&self, id: i32) -> StoreResult<Option<Product>> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn create(&self, input: NewProduct) -> StoreResult<Product> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let now = Utc::now();
        let product = Product {
            id: inner.next_id,
            name: input.name,
            price: input.price,
            availability: input.availability,
            created_at: now,
            updated_at: now,
        };
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn save(&self, product: &Product) -> StoreResult<Option<Product>> {
        let mut inner = self.inner.write().await;
        Ok(inner.products.get_mut(&product.id).map(|stored| {
            stored.name = product.name.clone();
            stored.price = product.price;
            stored.availability = product.availability;
            stored.updated_at = Utc::now();
            stored.clone()
        }))
    }

    async fn destroy(&self, id: i32) -> StoreResult<bool> {
        Ok(self.inner.write().await.products.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_product(name: &str, price: i64) -> NewProduct {
        NewProduct {
            name: name.into(),
            price: Decimal::new(price, 0),
            availability: true,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_list_is_price_ordered() {
        let store = InMemoryProductStore::new();
        let a = store.create(new_product("Monitor", 300)).await.unwrap();
        let b = store.create(new_product("Mouse", 20)).await.unwrap();
        let c = store.create(new_product("Teclado", 20)).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));

        let ids: Vec<i32> = store.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn save_persists_and_refreshes_updated_at() {
        let store = InMemoryProductStore::new();
        let mut p = store.create(new_product("Monitor", 300)).await.unwrap();
        p.toggle_availability();
        let saved = store.save(&p).await.unwrap().unwrap();
        assert!(!saved.availability);
        assert!(saved.updated_at >= saved.created_at);
        assert!(!store.find(p.id).await.unwrap().unwrap().availability);
    }

    #[tokio::test]
    async fn save_and_destroy_on_missing_record() {
        let store = InMemoryProductStore::new();
        let mut p = store.create(new_product("Monitor", 300)).await.unwrap();
        assert!(store.destroy(p.id).await.unwrap());
        assert!(!store.destroy(p.id).await.unwrap());
        p.name = "Otro".into();
        assert!(store.save(&p).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn forced_sync_clears_records() {
        let store = InMemoryProductStore::new();
        store.create(new_product("Monitor", 300)).await.unwrap();
        store.sync(true).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.create(new_product("Mouse", 20)).await.unwrap().id, 1);
    }
}
