//! Validated request types, one per route shape, with their rule chains.

use crate::error::AppError;
use crate::models::{NewProduct, ProductChanges};
use crate::service::validation::{as_bool, as_text, is_positive, FieldError, FieldRules, Location, RequestInput, RuleSet};
use rust_decimal::Decimal;
use std::str::FromStr;
use utoipa::ToSchema;

pub const INVALID_ID: &str = "ID no válido";
pub const EMPTY_NAME: &str = "El nombre del Producto no debe ir vacio";
pub const EMPTY_PRICE: &str = "El precio del Producto no debe ir vacio";
pub const NON_NUMERIC_PRICE: &str = "Valor no Válido";
pub const INVALID_PRICE: &str = "Precio no válido";
pub const INVALID_AVAILABILITY: &str = "Valor para disponibilidad no válido";

fn id_rules() -> FieldRules {
    FieldRules::param("id").is_int(INVALID_ID)
}

fn name_rules() -> FieldRules {
    FieldRules::body("name").not_empty(EMPTY_NAME)
}

fn price_rules() -> FieldRules {
    FieldRules::body("price")
        .not_empty(EMPTY_PRICE)
        .is_numeric(NON_NUMERIC_PRICE)
        .custom(is_positive, INVALID_PRICE)
}

fn availability_rules() -> FieldRules {
    FieldRules::body("availability").is_boolean(INVALID_AVAILABILITY)
}

/// An id that passed `is_int` but does not fit the key type cannot match any record.
fn read_id(input: &RequestInput) -> Result<i32, AppError> {
    as_text(input.get(Location::Params, "id").as_ref())
        .trim_start_matches('+')
        .parse()
        .map_err(|_| AppError::NotFound)
}

fn read_name(input: &RequestInput) -> String {
    as_text(input.body.get("name"))
}

fn read_price(input: &RequestInput) -> Result<Decimal, AppError> {
    let raw = input.body.get("price");
    let text = as_text(raw);
    let text = text.trim_start_matches('+');
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .filter(|d| *d > Decimal::ZERO)
        .ok_or_else(|| {
            AppError::Validation(vec![FieldError::new(
                Location::Body,
                "price",
                raw.cloned(),
                INVALID_PRICE,
            )])
        })
}

fn read_availability(input: &RequestInput) -> Option<bool> {
    as_bool(input.body.get("availability"))
}

/// `GET|PATCH|DELETE /:id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i32);

impl RuleSet for ProductId {
    fn rules() -> Vec<FieldRules> {
        vec![id_rules()]
    }

    fn from_input(input: &RequestInput) -> Result<Self, AppError> {
        read_id(input).map(ProductId)
    }
}

/// `POST /` body.
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct CreateProduct {
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,
    #[schema(value_type = f64, example = 300)]
    pub price: Decimal,
    /// Defaults to `true`.
    pub availability: Option<bool>,
}

impl RuleSet for CreateProduct {
    fn rules() -> Vec<FieldRules> {
        vec![
            name_rules(),
            price_rules(),
            FieldRules::body("availability").optional().is_boolean(INVALID_AVAILABILITY),
        ]
    }

    fn from_input(input: &RequestInput) -> Result<Self, AppError> {
        Ok(Self {
            name: read_name(input),
            price: read_price(input)?,
            availability: read_availability(input),
        })
    }
}

impl From<CreateProduct> for NewProduct {
    fn from(c: CreateProduct) -> Self {
        Self {
            name: c.name,
            price: c.price,
            availability: c.availability.unwrap_or(true),
        }
    }
}

/// `PUT /:id` body: every field is required.
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct UpdateProduct {
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,
    #[schema(value_type = f64, example = 399)]
    pub price: Decimal,
    pub availability: bool,
}

/// Id and body of a full update, validated together.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub id: ProductId,
    pub changes: ProductChanges,
}

impl RuleSet for UpdateRequest {
    fn rules() -> Vec<FieldRules> {
        vec![id_rules(), name_rules(), price_rules(), availability_rules()]
    }

    fn from_input(input: &RequestInput) -> Result<Self, AppError> {
        let availability = read_availability(input).ok_or_else(|| {
            AppError::Validation(vec![FieldError::new(
                Location::Body,
                "availability",
                input.body.get("availability").cloned(),
                INVALID_AVAILABILITY,
            )])
        })?;
        Ok(Self {
            id: ProductId::from_input(input)?,
            changes: ProductChanges {
                name: read_name(input),
                price: read_price(input)?,
                availability,
            },
        })
    }
}
