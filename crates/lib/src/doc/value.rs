//! Value types for documents.
//!
//! This module provides the [`Value`] enum that represents everything a document can
//! store. Values are either scalars (null, booleans, integers, decimals, date-times and
//! strings) or branches (nested documents and arrays).
//!
//! `Value` is generic over the nested-document type so that the mutable and the persistent
//! document forms share one algebra: [`Value`] (`Value<Doc>`) lives in a [`Doc`] and
//! [`FrozenValue`] (`Value<FrozenDoc>`) lives in a [`FrozenDoc`].

use std::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde_json::Value as JsonValue;

use super::{Doc, FrozenDoc, ReadDoc};

/// Values that can be stored in documents.
///
/// # Value Types
///
/// ## Scalars
/// - [`Value::Null`] - JSON null
/// - [`Value::Bool`] - Boolean values
/// - [`Value::Integer`] - 64-bit signed integers
/// - [`Value::Decimal`] - Arbitrary precision decimals, never a binary float
/// - [`Value::DateTime`] - Timestamps with their UTC offset
/// - [`Value::String`] - UTF-8 text
///
/// ## Branches
/// - [`Value::Document`] - A nested document of the same form as its parent
/// - [`Value::ValueArray`] - An array whose first element was a scalar
/// - [`Value::ObjectArray`] - An ordered list of nested documents
///
/// ## Embedded JSON
/// - [`Value::Json`] - A generic JSON subtree that has not been coerced yet. Reference
///   readers coerce it on demand; rendering emits it unchanged.
///
/// # Direct Comparisons
///
/// ```
/// # use jsonobject::Value;
/// let text: Value = Value::from("hello");
/// let number: Value = Value::from(42);
///
/// assert!(text == "hello");
/// assert!(number == 42i64);
/// assert!(!(text == 42i64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<D = Doc> {
    /// JSON null
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Decimal value
    Decimal(BigDecimal),
    /// Date-time value
    DateTime(DateTime<FixedOffset>),
    /// Text value
    String(String),
    /// Nested document
    Document(D),
    /// Array of values
    ValueArray(Vec<Value<D>>),
    /// Array of nested documents
    ObjectArray(Vec<D>),
    /// Generic JSON subtree, not yet coerced
    Json(JsonValue),
}

/// Value stored inside a [`FrozenDoc`].
pub type FrozenValue = Value<FrozenDoc>;

impl<D> Value<D> {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::DateTime(_) => "datetime",
            Value::String(_) => "string",
            Value::Document(_) => "document",
            Value::ValueArray(_) => "value-array",
            Value::ObjectArray(_) => "object-array",
            Value::Json(_) => "json",
        }
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a scalar value
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Bool(_)
                | Value::Integer(_)
                | Value::Decimal(_)
                | Value::DateTime(_)
                | Value::String(_)
        )
    }

    /// Returns true if this is either kind of array
    pub fn is_list(&self) -> bool {
        matches!(self, Value::ValueArray(_) | Value::ObjectArray(_))
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a decimal
    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// Attempts to convert to a date-time
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a nested document
    pub fn as_document(&self) -> Option<&D> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable nested document
    pub fn as_document_mut(&mut self) -> Option<&mut D> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Attempts to convert to a value array
    pub fn as_value_array(&self) -> Option<&[Value<D>]> {
        match self {
            Value::ValueArray(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable value array
    pub fn as_value_array_mut(&mut self) -> Option<&mut Vec<Value<D>>> {
        match self {
            Value::ValueArray(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to convert to an object array
    pub fn as_object_array(&self) -> Option<&[D]> {
        match self {
            Value::ObjectArray(docs) => Some(docs),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable object array
    pub fn as_object_array_mut(&mut self) -> Option<&mut Vec<D>> {
        match self {
            Value::ObjectArray(docs) => Some(docs),
            _ => None,
        }
    }

    /// Rebuilds this value with every nested document passed through `f`.
    ///
    /// Scalars are cloned. Arrays keep their order and their kind.
    pub fn map_documents<E, F>(&self, f: &F) -> Value<E>
    where
        F: Fn(&D) -> E,
    {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Integer(n) => Value::Integer(*n),
            Value::Decimal(d) => Value::Decimal(d.clone()),
            Value::DateTime(dt) => Value::DateTime(*dt),
            Value::String(s) => Value::String(s.clone()),
            Value::Document(doc) => Value::Document(f(doc)),
            Value::ValueArray(items) => {
                Value::ValueArray(items.iter().map(|item| item.map_documents(f)).collect())
            }
            Value::ObjectArray(docs) => Value::ObjectArray(docs.iter().map(f).collect()),
            Value::Json(json) => Value::Json(json.clone()),
        }
    }
}

impl<D: ReadDoc> Value<D> {
    /// Renders this value as a generic JSON tree.
    ///
    /// Integers stay integral, decimals are written in plain notation with at least one
    /// fractional digit, and date-times become RFC 3339 strings.
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Integer(n) => JsonValue::from(*n),
            Value::Decimal(d) => {
                let text = decimal_to_plain(d);
                match serde_json::Number::from_str(&text) {
                    Ok(number) => JsonValue::Number(number),
                    Err(_) => JsonValue::String(text),
                }
            }
            Value::DateTime(dt) => JsonValue::String(datetime_to_text(dt)),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Document(doc) => doc.to_json_value(),
            Value::ValueArray(items) => {
                JsonValue::Array(items.iter().map(Value::to_json_value).collect())
            }
            Value::ObjectArray(docs) => {
                JsonValue::Array(docs.iter().map(ReadDoc::to_json_value).collect())
            }
            Value::Json(json) => json.clone(),
        }
    }

    /// Returns the text form of this value.
    ///
    /// Null becomes the empty string and strings are returned verbatim. Numbers, booleans
    /// and date-times use their canonical JSON spelling without quotes; branches render as
    /// compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Decimal(d) => decimal_to_plain(d),
            Value::DateTime(dt) => datetime_to_text(dt),
            Value::Json(JsonValue::String(s)) => s.clone(),
            Value::Json(JsonValue::Null) => String::new(),
            other => other.to_json_value().to_string(),
        }
    }
}

impl Value<Doc> {
    /// Converts this value for storage in a snapshot, freezing nested documents.
    pub fn freeze(&self) -> FrozenValue {
        self.map_documents(&FrozenDoc::from_mutable)
    }
}

impl Value<FrozenDoc> {
    /// Converts this value for storage in a mutable document, thawing nested snapshots.
    pub fn thaw(&self) -> Value {
        self.map_documents(&FrozenDoc::to_mutable)
    }
}

/// Writes a decimal in plain notation, keeping a fractional part so it reads back as a
/// decimal rather than an integer.
pub(crate) fn decimal_to_plain(decimal: &BigDecimal) -> String {
    let plain = decimal.to_plain_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

pub(crate) fn datetime_to_text(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl<D: ReadDoc> fmt::Display for Value<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_value())
    }
}

// Convenient From implementations for common types
impl<D> From<bool> for Value<D> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<D> From<i64> for Value<D> {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl<D> From<i32> for Value<D> {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl<D> From<u32> for Value<D> {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl<D> From<u64> for Value<D> {
    fn from(value: u64) -> Self {
        // Values past i64::MAX stay exact as decimals
        match i64::try_from(value) {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Decimal(BigDecimal::from(value)),
        }
    }
}

impl<D> From<f64> for Value<D> {
    fn from(value: f64) -> Self {
        // Go through the shortest round-trip spelling so 12.01 stays 12.01
        match BigDecimal::from_str(&value.to_string()) {
            Ok(decimal) => Value::Decimal(decimal),
            Err(_) => Value::Null,
        }
    }
}

impl<D> From<BigDecimal> for Value<D> {
    fn from(value: BigDecimal) -> Self {
        Value::Decimal(value)
    }
}

impl<D> From<DateTime<FixedOffset>> for Value<D> {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::DateTime(value)
    }
}

impl<D> From<DateTime<Utc>> for Value<D> {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value.into())
    }
}

impl<D> From<String> for Value<D> {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<D> From<&str> for Value<D> {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<D> From<Vec<Value<D>>> for Value<D> {
    fn from(value: Vec<Value<D>>) -> Self {
        Value::ValueArray(value)
    }
}

impl<D> From<Vec<String>> for Value<D> {
    fn from(value: Vec<String>) -> Self {
        Value::ValueArray(value.into_iter().map(Value::String).collect())
    }
}

impl<D> From<Vec<&str>> for Value<D> {
    fn from(value: Vec<&str>) -> Self {
        Value::ValueArray(value.into_iter().map(Value::from).collect())
    }
}

impl From<Doc> for Value<Doc> {
    fn from(value: Doc) -> Self {
        Value::Document(value)
    }
}

impl From<Vec<Doc>> for Value<Doc> {
    fn from(value: Vec<Doc>) -> Self {
        Value::ObjectArray(value)
    }
}

impl From<FrozenDoc> for Value<FrozenDoc> {
    fn from(value: FrozenDoc) -> Self {
        Value::Document(value)
    }
}

impl From<Vec<FrozenDoc>> for Value<FrozenDoc> {
    fn from(value: Vec<FrozenDoc>) -> Self {
        Value::ObjectArray(value)
    }
}

impl<D, T: Into<Value<D>>> FromIterator<T> for Value<D> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::ValueArray(iter.into_iter().map(Into::into).collect())
    }
}

/// Types that can be extracted from a stored value.
///
/// This drives the strict [`get_value`](super::TypedAccess::get_value) accessor and the
/// element conversion of [`get_list`](super::TypedAccess::get_list). Conversions are exact:
/// a string never parses into a number here.
pub trait FromValue<D>: Sized {
    /// Converts a stored value, or returns `None` if it has another shape.
    fn from_value(value: &Value<D>) -> Option<Self>;

    /// Converts an element of an object array.
    fn from_document(_doc: &D) -> Option<Self> {
        None
    }
}

impl<D> FromValue<D> for String {
    fn from_value(value: &Value<D>) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl<D> FromValue<D> for i64 {
    fn from_value(value: &Value<D>) -> Option<Self> {
        value.as_integer()
    }
}

impl<D> FromValue<D> for bool {
    fn from_value(value: &Value<D>) -> Option<Self> {
        value.as_bool()
    }
}

impl<D> FromValue<D> for BigDecimal {
    fn from_value(value: &Value<D>) -> Option<Self> {
        match value {
            Value::Decimal(d) => Some(d.clone()),
            Value::Integer(n) => Some(BigDecimal::from(*n)),
            _ => None,
        }
    }
}

impl<D> FromValue<D> for DateTime<FixedOffset> {
    fn from_value(value: &Value<D>) -> Option<Self> {
        value.as_datetime().copied()
    }
}

impl<D: Clone> FromValue<D> for Value<D> {
    fn from_value(value: &Value<D>) -> Option<Self> {
        Some(value.clone())
    }

    fn from_document(doc: &D) -> Option<Self> {
        Some(Value::Document(doc.clone()))
    }
}

impl FromValue<Doc> for Doc {
    fn from_value(value: &Value<Doc>) -> Option<Self> {
        value.as_document().cloned()
    }

    fn from_document(doc: &Doc) -> Option<Self> {
        Some(doc.clone())
    }
}

impl FromValue<FrozenDoc> for FrozenDoc {
    fn from_value(value: &Value<FrozenDoc>) -> Option<Self> {
        value.as_document().cloned()
    }

    fn from_document(doc: &FrozenDoc) -> Option<Self> {
        Some(doc.clone())
    }
}

// PartialEq implementations for comparing Value with other types
impl<D> PartialEq<str> for Value<D> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl<D> PartialEq<&str> for Value<D> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl<D> PartialEq<String> for Value<D> {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

impl<D> PartialEq<i64> for Value<D> {
    fn eq(&self, other: &i64) -> bool {
        self.as_integer() == Some(*other)
    }
}

impl<D> PartialEq<bool> for Value<D> {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

// Reverse implementations for symmetry
impl<D> PartialEq<Value<D>> for str {
    fn eq(&self, other: &Value<D>) -> bool {
        other == self
    }
}

impl<D> PartialEq<Value<D>> for &str {
    fn eq(&self, other: &Value<D>) -> bool {
        other == self
    }
}

impl<D> PartialEq<Value<D>> for String {
    fn eq(&self, other: &Value<D>) -> bool {
        other == self
    }
}

impl<D> PartialEq<Value<D>> for i64 {
    fn eq(&self, other: &Value<D>) -> bool {
        other == self
    }
}

impl<D> PartialEq<Value<D>> for bool {
    fn eq(&self, other: &Value<D>) -> bool {
        other == self
    }
}
