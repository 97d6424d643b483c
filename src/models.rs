//! Product record and its write payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// A stored product. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product as listed: timestamps left out.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub availability: bool,
}

impl From<Product> for ProductSummary {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            availability: p.availability,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub availability: bool,
}

/// Full overwrite of the mutable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: Decimal,
    pub availability: bool,
}

impl Product {
    pub fn apply(&mut self, changes: ProductChanges) {
        self.name = changes.name;
        self.price = changes.price;
        self.availability = changes.availability;
    }

    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
    }
}
