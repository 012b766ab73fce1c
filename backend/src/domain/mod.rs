//! Domain primitives and aggregates.
//!
//! Purpose: define the transport-agnostic types used by the HTTP adapter and
//! the persistence port. Serialisation contracts live on each type.
//!
//! Public surface:
//! - Error / ErrorCode — failure category and message.
//! - Runtime — minute count with a `"<N> mins"` wire format.
//! - Validator — field-keyed validation accumulator.
//! - Movie / MovieDraft — the movie record and its editable fields.

pub mod error;
pub mod movie;
pub mod ports;
pub mod runtime;
pub mod validator;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::movie::{Movie, MovieDraft, validate_movie};
pub use self::runtime::{InvalidRuntimeFormat, Runtime};
pub use self::validator::{FieldErrors, Validator};
