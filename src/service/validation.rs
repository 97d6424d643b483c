//! Request validation from declarative rule chains.
//!
//! Every check of every field runs, so the number of reported errors depends only on
//! which checks fail. Values are judged by their text form: a missing or null value is
//! the empty string, numbers and booleans use their literal text.

use crate::error::AppError;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// One failed check, serialized as `{type, value, msg, path, location}`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "field")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    #[schema(example = "Precio no válido")]
    pub msg: String,
    #[schema(example = "price")]
    pub path: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(location: Location, path: &str, value: Option<Value>, msg: &str) -> Self {
        Self {
            kind: "field",
            value,
            msg: msg.to_string(),
            path: path.to_string(),
            location,
        }
    }
}

/// Raw request input a rule chain runs against: path params and the JSON body object.
#[derive(Debug, Default, Clone)]
pub struct RequestInput {
    pub params: HashMap<String, String>,
    pub body: Map<String, Value>,
}

impl RequestInput {
    pub fn get(&self, location: Location, field: &str) -> Option<Value> {
        match location {
            Location::Body => self.body.get(field).cloned(),
            Location::Params => self.params.get(field).map(|s| Value::String(s.clone())),
        }
    }
}

pub type Predicate = fn(Option<&Value>) -> bool;

struct Check {
    predicate: Predicate,
    message: &'static str,
}

/// Ordered checks for a single field.
pub struct FieldRules {
    location: Location,
    field: &'static str,
    optional: bool,
    checks: Vec<Check>,
}

impl FieldRules {
    pub fn body(field: &'static str) -> Self {
        Self::at(Location::Body, field)
    }

    pub fn param(field: &'static str) -> Self {
        Self::at(Location::Params, field)
    }

    fn at(location: Location, field: &'static str) -> Self {
        Self {
            location,
            field,
            optional: false,
            checks: Vec::new(),
        }
    }

    /// Skip every check when the field is absent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.custom(|v| !as_text(v).is_empty(), message)
    }

    pub fn is_numeric(self, message: &'static str) -> Self {
        self.custom(|v| numeric_re().is_match(&as_text(v)), message)
    }

    pub fn is_int(self, message: &'static str) -> Self {
        self.custom(|v| int_re().is_match(&as_text(v)), message)
    }

    pub fn is_boolean(self, message: &'static str) -> Self {
        self.custom(|v| matches!(as_text(v).as_str(), "true" | "false" | "1" | "0"), message)
    }

    pub fn custom(mut self, predicate: Predicate, message: &'static str) -> Self {
        self.checks.push(Check { predicate, message });
        self
    }

    fn run(&self, input: &RequestInput, errors: &mut Vec<FieldError>) {
        let value = input.get(self.location, self.field);
        if self.optional && value.is_none() {
            return;
        }
        for check in &self.checks {
            if !(check.predicate)(value.as_ref()) {
                errors.push(FieldError::new(self.location, self.field, value.clone(), check.message));
            }
        }
    }
}

/// Run all rules against the input, collecting every failure in declaration order.
pub fn validate(input: &RequestInput, rules: &[FieldRules]) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    for rule in rules {
        rule.run(input, &mut errors);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A request type guarded by a rule chain. `from_input` runs only after the chain passed.
pub trait RuleSet: Sized {
    fn rules() -> Vec<FieldRules>;

    fn from_input(input: &RequestInput) -> Result<Self, AppError>;
}

/// Text form of a value as validators see it.
pub fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_text(n),
        Some(other) => other.to_string(),
    }
}

/// Plain positional notation: `1e16` reads as `10000000000000000`, `1e-6` as `0.000001`.
fn number_text(n: &Number) -> String {
    if n.is_f64() {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    } else {
        n.to_string()
    }
}

/// Loose numeric coercion used by comparison rules. Unparseable input is NaN.
pub fn as_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        Some(_) => f64::NAN,
    }
}

/// Boolean reading of a value that passed `is_boolean`.
pub fn as_bool(value: Option<&Value>) -> Option<bool> {
    match as_text(value).as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn is_positive(value: Option<&Value>) -> bool {
    as_number(value) > 0.0
}

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("numeric pattern compiles"))
}

fn int_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?(0|[1-9][0-9]*)$").expect("integer pattern compiles"))
}
