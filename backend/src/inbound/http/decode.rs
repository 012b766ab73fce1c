//! Strict JSON request-body decoding.
//!
//! [`decode`] reads at most `max_bytes` from a body, parses exactly one JSON
//! value into the destination type and rejects object keys the destination
//! does not declare. Every failure is funnelled through [`classify`] so
//! callers only ever see the closed [`DecodeError`] set.
//!
//! Strictness is structural: ignored keys are reported by `serde_ignored`
//! and the failing field of a type error comes from `serde_path_to_error`.
//! Destination types must therefore not set `deny_unknown_fields`; the
//! decoder enforces it for them.

use std::io::{self, Read};

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

/// Request body size policy.
pub const MAX_BODY_BYTES: u64 = 1_048_576;

/// Classified decode failure.
///
/// All variants except [`DecodeError::InvalidDestination`] describe a
/// client mistake and render as a `400 Bad Request` message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Malformed JSON; `offset` counts the bytes read up to and including
    /// the offending one.
    #[error("body contains badly-formed JSON (at character {offset})")]
    Syntax { offset: u64 },
    /// The body stream ended before the declared payload was delivered.
    #[error("body contains badly-formed JSON")]
    TruncatedBody,
    /// A value does not fit the declared type of its destination.
    #[error("{}", type_mismatch_message(.field, .offset))]
    TypeMismatch { field: Option<String>, offset: u64 },
    /// Nothing but whitespace was sent.
    #[error("body must not be empty")]
    EmptyBody,
    /// An object key the destination does not declare.
    #[error("body contains unknown field {name:?}")]
    UnknownField { name: String },
    /// The body exceeds the byte budget.
    #[error("body must not be larger than {limit_bytes} bytes")]
    BodyTooLarge { limit_bytes: u64 },
    /// More than one JSON value, or trailing non-whitespace.
    #[error("body must only contain a single JSON value")]
    MultipleValues,
    /// The destination type cannot receive decoded data. A defect in the
    /// calling code, never a client error.
    #[error("JSON cannot be decoded into {type_name}")]
    InvalidDestination { type_name: &'static str },
    /// Any other failure, passed through with its description.
    #[error("{cause}")]
    Other { cause: String },
}

impl DecodeError {
    /// `true` for failures the caller must not turn into a client response.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidDestination { .. })
    }
}

fn type_mismatch_message(field: &Option<String>, offset: &u64) -> String {
    match field {
        Some(field) => format!("body contains incorrect JSON type for field {field:?}"),
        None => format!("body contains incorrect JSON type (at character {offset})"),
    }
}

/// Raw failure reported by the reader, the byte budget or the JSON engine.
#[derive(Debug)]
pub enum DecodeFailure {
    /// Reading the body stream failed.
    Read(io::Error),
    /// More than `limit_bytes` were offered.
    LimitExceeded { limit_bytes: u64 },
    /// The JSON engine rejected the first value; `path` locates the failing
    /// field when one is known.
    Parse {
        error: serde_json::Error,
        path: Option<String>,
    },
    /// The destination ignored the key at `path`.
    IgnoredKey { path: String },
    /// Something other than whitespace followed the first value.
    TrailingData,
}

/// Map a raw failure to exactly one [`DecodeError`].
///
/// `body` is the input that was being decoded; it is needed to turn the
/// engine's line and column into a byte offset and to tell an empty body
/// from a truncated one.
pub fn classify(failure: DecodeFailure, body: &[u8]) -> DecodeError {
    match failure {
        DecodeFailure::Read(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
            DecodeError::TruncatedBody
        }
        DecodeFailure::Read(error) => DecodeError::Other {
            cause: error.to_string(),
        },
        DecodeFailure::LimitExceeded { limit_bytes } => DecodeError::BodyTooLarge { limit_bytes },
        DecodeFailure::IgnoredKey { path } => DecodeError::UnknownField { name: path },
        DecodeFailure::TrailingData => DecodeError::MultipleValues,
        DecodeFailure::Parse { error, path } => classify_parse(&error, path, body),
    }
}

fn classify_parse(error: &serde_json::Error, path: Option<String>, body: &[u8]) -> DecodeError {
    let offset = byte_offset(body, error.line(), error.column());
    match error.classify() {
        Category::Eof if is_blank(body) => DecodeError::EmptyBody,
        Category::Eof | Category::Syntax => DecodeError::Syntax { offset },
        Category::Data => classify_data(error, path, offset),
        Category::Io => DecodeError::Other {
            cause: error.to_string(),
        },
    }
}

// serde's `de::Error` helpers render fixed message prefixes; they are the
// only signal distinguishing a type mismatch from a custom rejection.
const TYPE_MISMATCH_PREFIXES: [&str; 3] = ["invalid type: ", "invalid value: ", "invalid length "];
const UNKNOWN_FIELD_PREFIX: &str = "unknown field `";

fn classify_data(error: &serde_json::Error, path: Option<String>, offset: u64) -> DecodeError {
    let message = error.to_string();
    if let Some(name) = unknown_field_name(&message) {
        let name = match path {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_owned(),
        };
        return DecodeError::UnknownField { name };
    }
    if TYPE_MISMATCH_PREFIXES
        .iter()
        .any(|prefix| message.starts_with(prefix))
    {
        return DecodeError::TypeMismatch {
            field: path,
            offset,
        };
    }
    DecodeError::Other {
        cause: without_position(&message, error).to_owned(),
    }
}

/// Strip the ` at line L column C` suffix serde_json appends to messages.
fn without_position<'a>(message: &'a str, error: &serde_json::Error) -> &'a str {
    if error.line() == 0 {
        return message;
    }
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    message.strip_suffix(suffix.as_str()).unwrap_or(message)
}

fn unknown_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix(UNKNOWN_FIELD_PREFIX)?;
    rest.split_once('`').map(|(name, _)| name)
}

fn is_blank(body: &[u8]) -> bool {
    body.iter()
        .all(|byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Convert the engine's 1-based line and in-line byte column to an absolute
/// byte offset.
fn byte_offset(body: &[u8], line: usize, column: usize) -> u64 {
    let line_start = if line <= 1 {
        0
    } else {
        body.iter()
            .enumerate()
            .filter(|(_, byte)| **byte == b'\n')
            .nth(line - 2)
            .map_or(body.len(), |(index, _)| index + 1)
    };
    u64::try_from(line_start.saturating_add(column)).unwrap_or(u64::MAX)
}

/// Read at most `max_bytes` from `body` and decode one JSON value from it.
///
/// The body is fully buffered before parsing, so an oversized body is
/// rejected without any partial decode.
///
/// # Examples
/// ```
/// use greenlight::inbound::http::decode::{decode, DecodeError, MAX_BODY_BYTES};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Input {
///     a: i32,
/// }
///
/// let input: Input = decode(&br#"{"a":1}"#[..], MAX_BODY_BYTES).expect("valid body");
/// assert_eq!(input.a, 1);
///
/// let err = decode::<Input, _>(&br#"{"a":1}{"a":2}"#[..], MAX_BODY_BYTES).unwrap_err();
/// assert_eq!(err, DecodeError::MultipleValues);
/// ```
pub fn decode<T, R>(body: R, max_bytes: u64) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
    R: Read,
{
    let bytes = read_bounded(body, max_bytes).map_err(|failure| classify(failure, &[]))?;
    decode_slice(&bytes).map_err(|failure| classify(failure, &bytes))
}

fn read_bounded<R: Read>(body: R, max_bytes: u64) -> Result<Vec<u8>, DecodeFailure> {
    let mut bytes = Vec::new();
    body.take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(DecodeFailure::Read)?;
    let read = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    if read > max_bytes {
        return Err(DecodeFailure::LimitExceeded {
            limit_bytes: max_bytes,
        });
    }
    Ok(bytes)
}

/// Decode exactly one JSON value from an already bounded buffer.
pub(crate) fn decode_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeFailure> {
    let mut ignored: Option<String> = None;
    let mut on_ignored = |path: serde_ignored::Path<'_>| {
        if ignored.is_none() {
            ignored = Some(path.to_string());
        }
    };

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let parsed: Result<T, _> =
        serde_path_to_error::deserialize(serde_ignored::Deserializer::new(&mut de, &mut on_ignored));
    let value = parsed.map_err(|error| {
        let path = (error.path().iter().next().is_some()).then(|| error.path().to_string());
        DecodeFailure::Parse {
            error: error.into_inner(),
            path,
        }
    })?;

    if let Some(path) = ignored {
        return Err(DecodeFailure::IgnoredKey { path });
    }
    de.end().map_err(|_| DecodeFailure::TrailingData)?;
    Ok(value)
}
