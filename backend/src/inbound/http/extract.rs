//! Request-body extraction on top of the strict decoder.
//!
//! Actix delivers bodies as a chunk stream. [`read_json`] buffers at most
//! [`MAX_BODY_BYTES`], stopping as soon as the budget is exceeded, and then
//! hands the buffer to [`decode`]. [`StrictJson`] wraps the same steps as an
//! extractor for handlers that need nothing else from the body.

use std::io;

use actix_web::dev::Payload;
use actix_web::error::PayloadError;
use actix_web::web::{Bytes, BytesMut};
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;

use crate::domain::Error;
use crate::inbound::http::decode::{
    DecodeError, DecodeFailure, MAX_BODY_BYTES, classify, decode,
};

/// Extractor decoding the request body with the strict decoder.
///
/// Failures surface as `400 Bad Request` envelopes.
#[derive(Debug)]
pub struct StrictJson<T>(pub T);

impl<T> StrictJson<T> {
    /// Unwrap the decoded value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for StrictJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        Box::pin(async move {
            let value = read_json(&mut payload).await?;
            Ok(StrictJson(value))
        })
    }
}

/// Buffer a body stream within the size policy and strictly decode it.
pub async fn read_json<T, S>(payload: &mut S) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
    S: Stream<Item = Result<Bytes, PayloadError>> + Unpin,
{
    let body = read_bounded(payload, MAX_BODY_BYTES)
        .await
        .map_err(|failure| classify(failure, &[]))?;
    decode(&body[..], MAX_BODY_BYTES)
}

async fn read_bounded<S>(payload: &mut S, max_bytes: u64) -> Result<BytesMut, DecodeFailure>
where
    S: Stream<Item = Result<Bytes, PayloadError>> + Unpin,
{
    let limit = usize::try_from(max_bytes).unwrap_or(usize::MAX);
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| payload_failure(err, max_bytes))?;
        if body.len().saturating_add(chunk.len()) > limit {
            return Err(DecodeFailure::LimitExceeded {
                limit_bytes: max_bytes,
            });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn payload_failure(err: PayloadError, max_bytes: u64) -> DecodeFailure {
    let kind = match err {
        PayloadError::Overflow => {
            return DecodeFailure::LimitExceeded {
                limit_bytes: max_bytes,
            };
        }
        PayloadError::Incomplete(_) => io::ErrorKind::UnexpectedEof,
        _ => io::ErrorKind::Other,
    };
    DecodeFailure::Read(io::Error::new(kind, err.to_string()))
}
