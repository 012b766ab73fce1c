//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the domain only decides the failure category and the message.

use thiserror::Error as ThisError;

use crate::domain::validator::FieldErrors;
use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request body or parameters could not be understood.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The resource exists but does not support the request method.
    MethodNotAllowed,
    /// The request was understood but failed business validation.
    FailedValidation,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `field_errors` is only populated for [`ErrorCode::FailedValidation`].
///
/// # Examples
/// ```
/// use greenlight::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("the requested resource could not be found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    field_errors: Option<FieldErrors>,
    trace_id: Option<String>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ErrorValidationError {
    /// The message is empty after trimming whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// A trace identifier was supplied but is blank.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// Captures the current trace identifier when one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            field_errors: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Field-keyed validation failures, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }

    /// Trace identifier captured when the error was created.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach a trace identifier, replacing any captured one.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach a trace identifier after checking it is not blank.
    pub fn try_with_trace_id(self, id: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(self.with_trace_id(id))
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::MethodNotAllowed`].
    pub fn method_not_allowed(method: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::MethodNotAllowed,
            format!("the {method} method is not supported for this resource"),
        )
    }

    /// Build a [`ErrorCode::FailedValidation`] error carrying every field failure.
    ///
    /// # Examples
    /// ```
    /// use greenlight::domain::{Error, ErrorCode, Validator};
    ///
    /// let mut v = Validator::new();
    /// v.add_error("title", "must be provided");
    /// let err = Error::failed_validation(v.into_errors());
    /// assert_eq!(err.code(), ErrorCode::FailedValidation);
    /// assert_eq!(
    ///     err.field_errors().and_then(|f| f.get("title")).map(String::as_str),
    ///     Some("must be provided")
    /// );
    /// ```
    pub fn failed_validation(field_errors: FieldErrors) -> Self {
        let mut error = Self::new(ErrorCode::FailedValidation, "failed validation");
        error.field_errors = Some(field_errors);
        error
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    ///
    /// The message is for server-side logs only; adapters redact it.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
