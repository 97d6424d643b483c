//! PostgreSQL backend. The pool is created lazily so the process starts even when the database is down.

use super::{ProductStore, StoreResult};
use crate::models::{NewProduct, Product};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

const COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        price NUMERIC NOT NULL CHECK (price > 0),
        availability BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazy pool; no connection is attempted until the first query.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(database_url)?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn sync(&self, force: bool) -> StoreResult<()> {
        if force {
            tracing::warn!("dropping products table");
            sqlx::query("DROP TABLE IF EXISTS products").execute(&self.pool).await?;
        }
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let sql = format!("SELECT {} FROM products ORDER BY price ASC, id ASC", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> StoreResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: NewProduct) -> StoreResult<Product> {
        let sql = format!(
            "INSERT INTO products (name, price, availability) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.availability)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, product: &Product) -> StoreResult<Option<Product>> {
        let sql = format!(
            "UPDATE products SET name = $2, price = $3, availability = $4, updated_at = NOW() WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = product.id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.availability)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn destroy(&self, id: i32) -> StoreResult<bool> {
        tracing::debug!(id, "delete product");
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::connect_db;

    #[tokio::test]
    async fn unreachable_database_degrades_instead_of_failing() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy("postgres://nobody@127.0.0.1:1/products")
            .unwrap();
        let store = PgProductStore::new(pool);
        assert!(!connect_db(&store).await);
        assert!(store.find(1).await.is_err());
    }
}
