//! Run a rule chain over path params and JSON body before the handler executes.

use crate::error::AppError;
use crate::service::validation::{validate, RequestInput, RuleSet};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, HeaderMap},
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Extractor yielding `T` only when every rule of `T::rules()` passed.
/// Failures short-circuit with 400 and the full itemized error list.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: RuleSet + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(p)| p)
            .unwrap_or_default();
        let body = if is_json(&parts.headers) {
            let req = Request::from_parts(parts, body);
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            body_to_map(&bytes)?
        } else {
            Map::new()
        };

        let input = RequestInput { params, body };
        validate(&input, &T::rules()).map_err(AppError::Validation)?;
        T::from_input(&input).map(Validated)
    }
}

/// Only `application/json` bodies are parsed; any other content type reads as `{}`.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Empty bodies read as `{}`; anything other than a JSON object is rejected.
fn body_to_map(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(m)) => Ok(m),
        Ok(_) => Err(AppError::BadRequest("body must be a JSON object".into())),
        Err(e) => Err(AppError::BadRequest(format!("invalid JSON body: {}", e))),
    }
}
