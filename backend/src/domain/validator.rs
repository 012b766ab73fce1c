//! Field-keyed accumulation of validation failures.
//!
//! A [`Validator`] is created per validation pass, collects at most one
//! message per field and is inspected once by the caller before responding.
//! The free predicates are building blocks for resource-specific rules.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;
use std::sync::OnceLock;

use regex::Regex;

/// Validation failures keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Email-address-shaped pattern shared by every caller.
///
/// Compiled on first use; `main` warms it before the server starts.
pub fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Accumulator of field validation failures.
///
/// The first message recorded for a field wins; later messages for the same
/// field are dropped.
///
/// # Examples
/// ```
/// use greenlight::domain::Validator;
///
/// let mut v = Validator::new();
/// v.check(false, "title", "must be provided");
/// v.check(false, "title", "must not be more than 500 bytes long");
/// assert!(!v.valid());
/// assert_eq!(v.errors()["title"], "must be provided");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no failure has been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` for `key` unless the key already has one.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `key` when `ok` is false.
    pub fn check(&mut self, ok: bool, key: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.add_error(key, message);
        }
    }

    /// Borrow the recorded failures.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consume the validator, yielding the recorded failures.
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// `true` when `value` equals one of `candidates`.
pub fn permitted_value<T: PartialEq + ?Sized>(value: &T, candidates: &[&T]) -> bool {
    candidates.iter().any(|candidate| *candidate == value)
}

/// `true` when `value` matches the precompiled `pattern`.
pub fn matches(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}

/// `true` when no element of `values` repeats.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|value| seen.insert(value))
}
