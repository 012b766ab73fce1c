//! Movie runtime in whole minutes and its `"<N> mins"` wire format.
//!
//! The codec is a pair of plain functions, [`format_runtime`] and
//! [`parse_runtime`], plus JSON-level wrappers that add and strip the string
//! quoting. Serde routes through the same functions via `try_from`/`into`, so
//! every place a [`Runtime`] crosses the wire uses one implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const UNIT: &str = "mins";

/// Signed count of minutes.
///
/// # Examples
/// ```
/// use greenlight::domain::Runtime;
///
/// let runtime: Runtime = serde_json::from_str(r#""142 mins""#).expect("valid runtime");
/// assert_eq!(runtime.minutes(), 142);
/// assert_eq!(serde_json::to_string(&runtime).expect("serialise"), r#""142 mins""#);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Runtime(i32);

/// Returned when text is not exactly `<integer> mins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid runtime format")]
pub struct InvalidRuntimeFormat;

impl Runtime {
    /// Wrap a minute count.
    pub const fn new(minutes: i32) -> Self {
        Self(minutes)
    }

    /// Minute count.
    pub const fn minutes(self) -> i32 {
        self.0
    }

    /// `true` for the zero value an absent input field decodes to.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for Runtime {
    fn from(minutes: i32) -> Self {
        Self(minutes)
    }
}

impl From<Runtime> for String {
    fn from(value: Runtime) -> Self {
        format_runtime(value.0)
    }
}

impl TryFrom<String> for Runtime {
    type Error = InvalidRuntimeFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_runtime(&value).map(Self)
    }
}

impl std::fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {UNIT}", self.0)
    }
}

/// Render `minutes` as unquoted `"<minutes> mins"` text.
pub fn format_runtime(minutes: i32) -> String {
    format!("{minutes} {UNIT}")
}

/// Parse unquoted `"<minutes> mins"` text.
///
/// Exactly two tokens separated by a single space; the unit is the
/// case-sensitive literal `mins` and the count must fit in an `i32`.
pub fn parse_runtime(text: &str) -> Result<i32, InvalidRuntimeFormat> {
    let mut parts = text.split(' ');
    let (Some(count), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(InvalidRuntimeFormat);
    };
    if unit != UNIT {
        return Err(InvalidRuntimeFormat);
    }
    count.parse::<i32>().map_err(|_| InvalidRuntimeFormat)
}

/// Encode `minutes` as a quoted JSON string such as `"142 mins"`.
///
/// # Examples
/// ```
/// use greenlight::domain::runtime::encode_json;
///
/// assert_eq!(encode_json(142), r#""142 mins""#);
/// ```
pub fn encode_json(minutes: i32) -> String {
    // A JSON string literal of ASCII digits and a space needs no escaping.
    format!("\"{}\"", format_runtime(minutes))
}

/// Decode a quoted JSON string such as `"142 mins"` into minutes.
pub fn decode_json(text: &str) -> Result<i32, InvalidRuntimeFormat> {
    let unquoted: String = serde_json::from_str(text).map_err(|_| InvalidRuntimeFormat)?;
    parse_runtime(&unquoted)
}
