//! Request payload validation.
//!
//! Each entity has a function turning a JSON object into its validated
//! `New*` draft. Structural checks go through [`Fields`]; checks that need
//! the store (foreign keys, email uniqueness) run in the same pass so every
//! problem is reported at once.
//!
//! [`Fields`]: hotel_booking_core::Fields

mod hotel;
mod registration;
mod reservation;
mod room;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::error::AppError;

pub use hotel::hotel;
pub use registration::Registration;
pub use reservation::{new_reservation, patch_reservation};
pub use room::room;

/// A JSON object request body.
///
/// Malformed JSON and non-object bodies are rejected with `400 {"error": ...}`.
#[derive(Debug, Clone)]
pub struct Payload(pub Map<String, Value>);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AppError::BadRequest(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_kind(&other)
            ))),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
pub(crate) fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, header};

    use super::*;

    fn json_request(body: &'static str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/hotels/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_object_body_is_accepted() {
        let Payload(map) = Payload::from_request(json_request(r#"{"name": "Hotel A"}"#), &())
            .await
            .unwrap();
        assert_eq!(map.get("name"), Some(&Value::from("Hotel A")));
    }

    #[tokio::test]
    async fn test_non_object_body_is_rejected() {
        let err = Payload::from_request(json_request("[1, 2]"), &())
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::BadRequest(ref message) if message.contains("got list")),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let err = Payload::from_request(json_request("{\"name\": "), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
