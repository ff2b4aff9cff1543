//! Typed coercion from generic JSON into document values.
//!
//! Parsing happens in two steps. `serde_json` turns text into a generic tree, then this
//! module walks the tree, assigns each node a [`JsonTag`] and maps the tag onto the matching
//! [`Value`] variant. The mapping is decided by the tag, never by probing the literal text
//! after the fact.
//!
//! The same walk drops generated fields (keys starting with
//! [`GENERATED_ARTICLE_PREFIX`](crate::constants::GENERATED_ARTICLE_PREFIX) or
//! [`GENERATED_ENTITY_PREFIX`](crate::constants::GENERATED_ENTITY_PREFIX)) at every level
//! unless [`ParseOptions::keep_generated`] is set.

use std::{collections::BTreeSet, str::FromStr};

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde_json::{Map, Value as JsonValue};
use tracing::trace;

use super::{DocError, ReadDoc, Value, normalize_key};
use crate::constants::is_generated_key;

/// How strings that look like timestamps are tagged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateHandling {
    /// ISO 8601 date-time strings are tagged as dates and become [`Value::DateTime`].
    #[default]
    Detect,
    /// Every string stays a [`Value::String`].
    AsText,
}

/// Options controlling a parse.
///
/// ```
/// # use jsonobject::{DateHandling, Doc, ParseOptions};
/// let options = ParseOptions::new().with_generated(true);
/// let doc = Doc::parse_with(r#"{"a_gen_summary": "x"}"#, options).unwrap();
/// assert!(doc.contains_key("a_gen_summary"));
///
/// let text = ParseOptions::new().with_dates(DateHandling::AsText);
/// let doc = Doc::parse_with(r#"{"at": "2014-06-23T10:00:00Z"}"#, text).unwrap();
/// assert_eq!(doc.get("at").and_then(|v| v.as_str()), Some("2014-06-23T10:00:00Z"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep keys carrying a generated-field prefix instead of dropping them.
    pub keep_generated: bool,
    /// Tagging policy for timestamp-like strings.
    pub dates: DateHandling,
}

impl ParseOptions {
    /// Default options: generated fields dropped, dates detected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether generated fields survive the parse.
    pub fn with_generated(mut self, keep: bool) -> Self {
        self.keep_generated = keep;
        self
    }

    /// Sets the tagging policy for timestamp-like strings.
    pub fn with_dates(mut self, dates: DateHandling) -> Self {
        self.dates = dates;
        self
    }
}

/// The generic kind of a JSON node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonTag {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Date,
    Object,
    Array,
}

/// Classifies a generic JSON node.
///
/// Numbers are `Integer` when they are written without fraction or exponent and fit in 64
/// bits (signed or unsigned), `Float` otherwise. Strings are `Date` when `dates` is
/// [`DateHandling::Detect`] and they parse as an ISO 8601 date-time.
pub fn tag_of(value: &JsonValue, dates: DateHandling) -> JsonTag {
    match value {
        JsonValue::Null => JsonTag::Null,
        JsonValue::Bool(_) => JsonTag::Boolean,
        JsonValue::Number(n) if n.is_i64() || n.is_u64() => JsonTag::Integer,
        JsonValue::Number(_) => JsonTag::Float,
        JsonValue::String(s) if dates == DateHandling::Detect && parse_datetime(s).is_some() => {
            JsonTag::Date
        }
        JsonValue::String(_) => JsonTag::String,
        JsonValue::Object(_) => JsonTag::Object,
        JsonValue::Array(_) => JsonTag::Array,
    }
}

/// Parses an ISO 8601 date-time. Timestamps without an offset are taken as UTC.
pub(crate) fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    // Cheap shape check before handing off to chrono
    if !text.starts_with(|c: char| c.is_ascii_digit()) || !text.contains('T') {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Parses JSON text into a generic tree.
///
/// Keys and strings may also be written with single quotes, as in `{'id': 1}`. Text that
/// fails the strict parse is retried once with single-quoted strings rewritten; if that
/// fails too, the strict parse error is reported.
pub fn parse_json_text(text: &str) -> Result<JsonValue, DocError> {
    let strict = match serde_json::from_str(text) {
        Ok(json) => return Ok(json),
        Err(e) => e,
    };
    if let Some(json) =
        requote_single_quoted(text).and_then(|requoted| serde_json::from_str(&requoted).ok())
    {
        trace!("accepted single-quoted JSON");
        return Ok(json);
    }
    Err(DocError::MalformedInput {
        reason: strict.to_string(),
    })
}

/// Rewrites single-quoted strings as double-quoted JSON strings.
///
/// Returns `None` when there is nothing to rewrite or a string is left unterminated.
fn requote_single_quoted(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars();
    let mut rewritten = false;
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push('"');
                let mut closed = false;
                while let Some(c) = chars.next() {
                    out.push(c);
                    match c {
                        '\\' => out.push(chars.next()?),
                        '"' => {
                            closed = true;
                            break;
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return None;
                }
            }
            '\'' => {
                rewritten = true;
                out.push('"');
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '\'' => {
                            closed = true;
                            break;
                        }
                        '"' => out.push_str("\\\""),
                        '\\' => match chars.next()? {
                            '\'' => out.push('\''),
                            escaped => {
                                out.push('\\');
                                out.push(escaped);
                            }
                        },
                        other => out.push(other),
                    }
                }
                if !closed {
                    return None;
                }
                out.push('"');
            }
            other => out.push(other),
        }
    }
    rewritten.then_some(out)
}

/// Coerces a generic JSON node into a document value.
pub fn coerce_value<D: ReadDoc>(
    value: &JsonValue,
    options: ParseOptions,
) -> Result<Value<D>, DocError> {
    let coerced = match (tag_of(value, options.dates), value) {
        (JsonTag::Null, _) => Value::Null,
        (JsonTag::Boolean, JsonValue::Bool(b)) => Value::Bool(*b),
        (JsonTag::Integer, JsonValue::Number(n)) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Decimal(parse_decimal(&n.to_string())?),
        },
        (JsonTag::Float, JsonValue::Number(n)) => Value::Decimal(parse_decimal(&n.to_string())?),
        (JsonTag::Date, JsonValue::String(s)) => match parse_datetime(s) {
            Some(dt) => Value::DateTime(dt),
            None => Value::String(s.clone()),
        },
        (JsonTag::Object, JsonValue::Object(map)) => Value::Document(coerce_object(map, options)?),
        (JsonTag::Array, JsonValue::Array(items)) => coerce_array(items, options)?,
        (_, JsonValue::String(s)) => Value::String(s.clone()),
        // Tags always agree with the node they were computed from
        (_, other) => Value::String(other.to_string()),
    };
    Ok(coerced)
}

/// Coerces a generic JSON object into a document of type `D`.
///
/// Keys are lowercased. Two source keys that collide after lowercasing are rejected with
/// [`DocError::DuplicateKey`].
pub fn coerce_object<D: ReadDoc>(
    map: &Map<String, JsonValue>,
    options: ParseOptions,
) -> Result<D, DocError> {
    let mut seen = BTreeSet::new();
    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        let key = normalize_key(key).into_owned();
        if !options.keep_generated && is_generated_key(&key) {
            trace!(key = %key, "dropping generated field");
            continue;
        }
        if !seen.insert(key.clone()) {
            return Err(DocError::DuplicateKey { key });
        }
        let value = coerce_value(value, options)?;
        entries.push((key, value));
    }
    Ok(D::from_entries(entries))
}

/// Coerces a generic JSON node expected to be an object.
pub fn coerce_root<D: ReadDoc>(value: &JsonValue, options: ParseOptions) -> Result<D, DocError> {
    match value {
        JsonValue::Object(map) => coerce_object(map, options),
        other => Err(DocError::MalformedInput {
            reason: format!("expected a JSON object at the top level, found {}", kind(other)),
        }),
    }
}

fn coerce_array<D: ReadDoc>(items: &[JsonValue], options: ParseOptions) -> Result<Value<D>, DocError> {
    match items.first() {
        None => Ok(Value::ValueArray(Vec::new())),
        Some(JsonValue::Object(_)) => {
            let docs = items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    JsonValue::Object(map) => coerce_object(map, options),
                    other => Err(DocError::MalformedInput {
                        reason: format!(
                            "object array element {index} is {} rather than an object",
                            kind(other)
                        ),
                    }),
                })
                .collect::<Result<Vec<D>, _>>()?;
            Ok(Value::ObjectArray(docs))
        }
        Some(_) => {
            let values = items
                .iter()
                .map(|item| coerce_value(item, options))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::ValueArray(values))
        }
    }
}

fn parse_decimal(text: &str) -> Result<BigDecimal, DocError> {
    BigDecimal::from_str(text).map_err(|e| DocError::MalformedInput {
        reason: format!("number '{text}' is not a decimal: {e}"),
    })
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
