//! Request validation engine.

pub mod validation;
pub use validation::{validate, FieldError, FieldRules, Location, RequestInput, RuleSet};
