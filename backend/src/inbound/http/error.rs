//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning every
//! failure into an `{"error": ...}` envelope with the matching status code.
//! Internal failures are logged in full and reach clients only as a generic
//! message.

use actix_web::http::StatusCode;
use actix_web::http::header::HeaderMap;
use actix_web::{HttpResponse, ResponseError};
use tracing::{error, warn};

use crate::domain::ports::MovieRepositoryError;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::decode::DecodeError;
use crate::inbound::http::envelope::{EncodeError, Envelope, write_json};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Client-facing text for every internal failure.
pub const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";
/// Client-facing text for unknown routes and missing records.
pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::FailedValidation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_envelope(error: &Error) -> Result<Envelope, EncodeError> {
    match (error.code(), error.field_errors()) {
        (ErrorCode::InternalError, _) => Envelope::new().with("error", &SERVER_ERROR_MESSAGE),
        (_, Some(fields)) => Envelope::new().with("error", fields),
        (_, None) => Envelope::new().with("error", &error.message()),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(
                error = %self,
                trace_id = self.trace_id().unwrap_or_default(),
                "request failed with internal error"
            );
        }

        let response = error_envelope(self)
            .and_then(|envelope| write_json(self.status_code(), &envelope, &HeaderMap::new()));
        match response {
            Ok(response) => response,
            Err(encode_error) => {
                error!(error = %encode_error, "failed to encode error response");
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

impl From<DecodeError> for Error {
    /// Map a classified decode failure to a `400` error.
    ///
    /// # Panics
    ///
    /// Panics on [`DecodeError::InvalidDestination`]: decoding into a type
    /// that cannot receive data is a defect in the handler, not the request.
    fn from(err: DecodeError) -> Self {
        if err.is_fatal() {
            panic!("strict JSON decoder used with an invalid destination: {err}");
        }
        warn!(error = %err, "rejected request body");
        Error::try_new(ErrorCode::InvalidRequest, err.to_string())
            .unwrap_or_else(|_| Error::invalid_request("body could not be decoded"))
    }
}

impl From<MovieRepositoryError> for Error {
    fn from(err: MovieRepositoryError) -> Self {
        match err {
            MovieRepositoryError::NotFound => Error::not_found(NOT_FOUND_MESSAGE),
            MovieRepositoryError::Query { .. } => Error::internal(err.to_string()),
        }
    }
}

impl From<EncodeError> for Error {
    fn from(err: EncodeError) -> Self {
        Error::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests;
