//! JSON response envelopes.
//!
//! Every response body is a single JSON object whose keys name the payload:
//! `{"movie": {...}}` on success, `{"error": ...}` on failure. Values are
//! serialised when they are inserted, so a value that cannot be represented
//! as JSON is reported before any part of the response exists.

use std::collections::BTreeMap;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Media type stamped on every envelope response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Failure to turn an envelope into response bytes.
#[derive(Debug, Error)]
#[error("failed to encode response body: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Keyed container wrapping a response body.
///
/// # Examples
/// ```
/// use greenlight::inbound::http::envelope::Envelope;
///
/// let env = Envelope::new()
///     .with("message", &"movie deleted")
///     .expect("strings serialise");
/// assert_eq!(
///     serde_json::to_string(&env).expect("serialise"),
///     r#"{"message":"movie deleted"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Envelope(BTreeMap<String, Value>);

impl Envelope {
    /// Create an empty envelope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialise `value` under `key`, replacing any previous entry.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: &impl Serialize,
    ) -> Result<(), EncodeError> {
        self.0.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Builder form of [`Envelope::insert`].
    pub fn with(mut self, key: impl Into<String>, value: &impl Serialize) -> Result<Self, EncodeError> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Borrow the serialised value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Build a response carrying `envelope` as its body.
///
/// The body is serialised first, with a trailing newline appended; the
/// caller's headers are applied next, then the content type is forced to
/// JSON, then the status is fixed. A serialisation failure therefore leaves
/// nothing half-built.
pub fn write_json(
    status: StatusCode,
    envelope: &Envelope,
    headers: &HeaderMap,
) -> Result<HttpResponse, EncodeError> {
    let mut body = serde_json::to_vec(envelope)?;
    body.push(b'\n');

    let mut builder = HttpResponse::build(status);
    for (name, value) in headers.iter() {
        builder.append_header((name.clone(), value.clone()));
    }
    builder.insert_header((
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    ));
    Ok(builder.body(body))
}
