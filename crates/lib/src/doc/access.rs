//! Typed accessors with documented fallbacks.
//!
//! Every accessor here lowercases its key and is written once against [`ReadDoc`], so it
//! works the same on [`Doc`](super::Doc) and [`FrozenDoc`](super::FrozenDoc).
//!
//! There are two policies. The `*_or_default`/`*_or_empty`/`*_or_false` accessors never
//! fail: a missing key or a value of the wrong type yields the fallback. The strict
//! [`TypedAccess::get_value`] reports a [`DocError::TypeMismatch`] instead.

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::Value as JsonValue;

use super::{DocError, FromValue, ReadDoc, Value, coerce::parse_datetime};
use crate::constants::{ETAG, ID, NULL_ID, RESULTS};

/// Text of an identity field, or `default` when it is missing, null or empty.
pub(crate) fn identity_view<D: ReadDoc>(doc: &D, key: &str, default: &str) -> String {
    match doc.lookup(key).map(Value::to_text) {
        Some(text) if !text.is_empty() => text,
        _ => default.to_string(),
    }
}

/// Converts an integral decimal within `u64` range.
///
/// The digit count and scale are checked before rescaling, so a value like `1e300000000`
/// is rejected without being expanded.
fn decimal_to_u64(decimal: &BigDecimal) -> Option<u64> {
    let (_, scale) = decimal.as_bigint_and_exponent();
    let digits = i64::try_from(decimal.digits()).ok()?;
    // u64::MAX has 20 digits
    if scale > digits || digits - scale > 20 {
        return None;
    }
    if !decimal.is_integer() {
        return None;
    }
    decimal.with_scale(0).to_plain_string().parse().ok()
}

fn parse_loose_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    parse_datetime(text).or_else(|| {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

/// Getters shared by both document forms.
///
/// ```
/// # use jsonobject::{Doc, TypedAccess};
/// let doc = Doc::parse(r#"{"Count": "12", "Flag": true, "Name": null}"#).unwrap();
///
/// assert_eq!(doc.get_number_or_default("count"), 12);
/// assert_eq!(doc.get_number_or_default("flag"), 0);
/// assert_eq!(doc.get_string_or_empty("name"), "");
/// assert!(doc.get_bool_or_false("FLAG"));
/// assert!(doc.get_value::<i64>("flag").is_err());
/// ```
pub trait TypedAccess: ReadDoc {
    /// The text form of the value, or `""` when missing or null.
    fn get_string_or_empty(&self, key: &str) -> String {
        self.lookup(key).map(Value::to_text).unwrap_or_default()
    }

    /// An integer, or a string that parses as one. Anything else, booleans included,
    /// yields 0.
    fn get_number_or_default(&self, key: &str) -> i64 {
        match self.lookup(key) {
            Some(Value::Integer(n)) => *n,
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// A non-negative integer, an integral decimal within `u64` range, or a string that
    /// parses as one. Anything else yields 0.
    fn get_ulong_or_default(&self, key: &str) -> u64 {
        match self.lookup(key) {
            Some(Value::Integer(n)) => u64::try_from(*n).unwrap_or(0),
            Some(Value::Decimal(d)) => decimal_to_u64(d).unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// A date-time, or a string that parses as one (a bare date reads as midnight UTC).
    /// Anything else falls back to the Unix epoch.
    fn get_datetime_or_default(&self, key: &str) -> DateTime<FixedOffset> {
        let parsed = match self.lookup(key) {
            Some(Value::DateTime(dt)) => Some(*dt),
            Some(Value::String(s)) => parse_loose_datetime(s),
            Some(Value::Json(JsonValue::String(s))) => parse_loose_datetime(s),
            _ => None,
        };
        parsed.unwrap_or_default()
    }

    /// A boolean, or `false`.
    fn get_bool_or_false(&self, key: &str) -> bool {
        self.lookup(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// A detached copy of the list under `key`.
    ///
    /// A missing key, a non-list value, or a list with any element that does not convert
    /// to `T` all yield an empty list. Only an empty key is an error.
    fn get_list<T: FromValue<Self>>(&self, key: &str) -> Result<Vec<T>, DocError> {
        if key.is_empty() {
            return Err(DocError::empty_key());
        }
        let converted: Option<Vec<T>> = match self.lookup(key) {
            Some(Value::ValueArray(items)) => items.iter().map(T::from_value).collect(),
            Some(Value::ObjectArray(docs)) => docs.iter().map(T::from_document).collect(),
            _ => None,
        };
        Ok(converted.unwrap_or_default())
    }

    /// The value under `key` converted to `T`.
    ///
    /// A missing key reads as the empty string, so `get_value::<String>` returns `""` for
    /// it. A present value that does not convert is a [`DocError::TypeMismatch`].
    fn get_value<T: FromValue<Self>>(&self, key: &str) -> Result<T, DocError> {
        if key.is_empty() {
            return Err(DocError::empty_key());
        }
        let missing = Value::String(String::new());
        let value = self.lookup(key).unwrap_or(&missing);
        T::from_value(value).ok_or_else(|| DocError::TypeMismatch {
            key: key.to_string(),
            expected: std::any::type_name::<T>().to_string(),
            actual: value.type_name().to_string(),
        })
    }

    /// The documents under `results`.
    ///
    /// A single nested document is a one-element list; an object array is returned as is.
    fn results(&self) -> Vec<&Self> {
        match self.lookup(RESULTS) {
            Some(Value::Document(doc)) => vec![doc],
            Some(Value::ObjectArray(docs)) => docs.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// The first element of [`results`](TypedAccess::results).
    fn first_result(&self) -> Option<&Self> {
        self.results().into_iter().next()
    }

    /// True for an empty document, an empty `results`, or a first result without identity.
    fn has_no_results(&self) -> bool {
        if self.entry_count() == 0 {
            return true;
        }
        match self.first_result() {
            None => true,
            Some(first) => identity_view(first, ID, NULL_ID) == NULL_ID,
        }
    }

    /// True if `etag` is present and its text equals `etag`.
    fn etag_matches(&self, etag: &str) -> bool {
        self.lookup(ETAG)
            .is_some_and(|value| value.to_text() == etag)
    }

    /// [`etag_matches`](TypedAccess::etag_matches) on the first result. An empty `etag`
    /// never matches.
    fn first_result_etag_matches(&self, etag: &str) -> bool {
        !etag.is_empty() && self.first_result().is_some_and(|first| first.etag_matches(etag))
    }
}

impl<D: ReadDoc> TypedAccess for D {}
