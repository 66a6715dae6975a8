//! Custom Axum extractors

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

use crate::models::{FieldSource, ValidationError};

/// Lenient JSON object body.
///
/// Never rejects: a missing, unreadable or non-object body yields an empty
/// extractor, so handlers can answer with a field-specific 400 instead of
/// axum's generic JSON rejection. The Content-Type header is not checked.
#[derive(Debug, Default)]
pub struct JsonBody(pub Option<Map<String, Value>>);

impl JsonBody {
    /// Look up a field in the body.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.as_ref().and_then(|map| map.get(field))
    }

    /// Take a required string field.
    ///
    /// Only an absent field (or no usable body) is reported as missing; a
    /// present non-string value, `null` included, is an invalid format.
    /// Emptiness is left to the caller.
    pub fn required_str(&self, field: &'static str) -> Result<&str, ValidationError> {
        match self.get(field) {
            Some(Value::String(s)) => Ok(s),
            None => Err(ValidationError::Missing {
                field,
                source: FieldSource::Body,
            }),
            Some(_) => Err(ValidationError::InvalidFormat {
                field,
                reason: "must be a string",
            }),
        }
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(bytes) = Bytes::from_request(req, state).await else {
            return Ok(Self(None));
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(Self(Some(map))),
            _ => Ok(Self(None)),
        }
    }
}
