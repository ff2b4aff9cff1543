//! Reference fields: typed, many-valued links stored inside a document.
//!
//! A reference field lives under `{prefix}{name}_ids`, where the prefix is `a_` for
//! article references and `e_` for entity references. Its value is a nested document with
//! exactly two fields:
//!
//! ```json
//! { "e_owner_ids": { "type": "person", "values": ["42", "43"] } }
//! ```
//!
//! Writers always replace whatever was stored under the derived key. Readers never fail;
//! they fall back to an empty list or string when the key is missing or not reference
//! shaped. Readers also accept a raw [`Value::Json`] object at the key and coerce it
//! before reading.

use std::borrow::Cow;

use serde_json::Value as JsonValue;

use super::{
    Doc, FrozenDoc, ParseOptions, ReadDoc, TypedAccess, Value, coerce::coerce_object,
};
use crate::constants::{
    ARTICLE_PREFIX, ENTITY_PREFIX, REFERENCE_SUFFIX, REFERENCE_TYPE, REFERENCE_VALUES,
};

/// The two flavors of reference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// Links to articles, prefix `a_`
    Article,
    /// Links to entities, prefix `e_`
    Entity,
}

impl ReferenceKind {
    /// Key prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            ReferenceKind::Article => ARTICLE_PREFIX,
            ReferenceKind::Entity => ENTITY_PREFIX,
        }
    }

    /// Classifies a reference key by its prefix.
    pub fn of_key(key: &str) -> Option<Self> {
        if !key.ends_with(REFERENCE_SUFFIX) {
            None
        } else if key.starts_with(ARTICLE_PREFIX) {
            Some(ReferenceKind::Article)
        } else if key.starts_with(ENTITY_PREFIX) {
            Some(ReferenceKind::Entity)
        } else {
            None
        }
    }

    /// Derives the key for a field named `name`, e.g. `user` becomes `e_user_ids`.
    pub fn reference_name(self, name: &str) -> String {
        format!("{}{}{}", self.prefix(), name.to_lowercase(), REFERENCE_SUFFIX)
    }
}

/// Derives the key of a reference field.
pub fn reference_name(kind: ReferenceKind, name: &str) -> String {
    kind.reference_name(name)
}

/// Derives the key of an entity reference field.
///
/// ```
/// # use jsonobject::doc::reference::entity_reference_name;
/// assert_eq!(entity_reference_name("user"), "e_user_ids");
/// ```
pub fn entity_reference_name(name: &str) -> String {
    ReferenceKind::Entity.reference_name(name)
}

/// Derives the key of an article reference field.
pub fn article_reference_name(name: &str) -> String {
    ReferenceKind::Article.reference_name(name)
}

/// Builds the two-field `{type, values}` document.
fn reference_shape<D, I>(ref_type: &str, values: I) -> D
where
    D: ReadDoc,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let values = values
        .into_iter()
        .map(|value| Value::String(value.into()))
        .collect();
    D::from_entries([
        (REFERENCE_TYPE.to_string(), Value::String(ref_type.to_string())),
        (REFERENCE_VALUES.to_string(), Value::ValueArray(values)),
    ])
}

/// Resolves the inner reference document, coercing a raw JSON object on the way.
fn inner_reference<D: ReadDoc>(value: Option<&Value<D>>) -> Option<Cow<'_, D>> {
    match value? {
        Value::Document(inner) => Some(Cow::Borrowed(inner)),
        Value::Json(JsonValue::Object(map)) => {
            coerce_object(map, ParseOptions::default()).ok().map(Cow::Owned)
        }
        _ => None,
    }
}

/// Readers for reference fields, available on both document forms.
pub trait ReferenceRead: ReadDoc {
    /// Values of the reference stored under the full key `key`, or an empty list.
    fn values_from_reference(&self, key: &str) -> Vec<String> {
        inner_reference(self.lookup(key))
            .map(|inner| inner.values_from_object())
            .unwrap_or_default()
    }

    /// The first value of the reference under `key`, or the empty string.
    fn first_value_or_empty_from_reference(&self, key: &str) -> String {
        self.values_from_reference(key)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// The referenced kind stored under `key`, or the empty string.
    fn type_from_reference(&self, key: &str) -> String {
        inner_reference(self.lookup(key))
            .and_then(|inner| {
                inner
                    .lookup(REFERENCE_TYPE)
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default()
    }

    /// Reads `values` from a document that is itself the inner `{type, values}` shape.
    ///
    /// Returns an empty list unless every element is a string.
    fn values_from_object(&self) -> Vec<String> {
        self.get_list::<String>(REFERENCE_VALUES).unwrap_or_default()
    }

    /// Every key ending in `_ids` whose value the readers above can read: a nested document,
    /// or a raw JSON object coerced on the way.
    fn reference_fields(&self) -> Vec<(&str, Cow<'_, Self>)> {
        self.entries()
            .filter(|(key, _)| key.ends_with(REFERENCE_SUFFIX))
            .filter_map(|(key, value)| inner_reference(Some(value)).map(|inner| (key, inner)))
            .collect()
    }

    /// Reference fields with the article prefix.
    fn article_references(&self) -> Vec<(&str, Cow<'_, Self>)> {
        self.references_of_kind(ReferenceKind::Article)
    }

    /// Reference fields with the entity prefix.
    fn entity_references(&self) -> Vec<(&str, Cow<'_, Self>)> {
        self.references_of_kind(ReferenceKind::Entity)
    }

    fn references_of_kind(&self, kind: ReferenceKind) -> Vec<(&str, Cow<'_, Self>)> {
        self.reference_fields()
            .into_iter()
            .filter(|(key, _)| key.starts_with(kind.prefix()))
            .collect()
    }

    /// True if at least one key ends in `_ids`, whatever its prefix or value.
    fn contains_reference_fields(&self) -> bool {
        self.entries().any(|(key, _)| key.ends_with(REFERENCE_SUFFIX))
    }
}

impl<D: ReadDoc> ReferenceRead for D {}

impl Doc {
    /// Writes a reference field under an explicit, already derived key.
    pub fn create_reference_field<I>(&mut self, key: &str, ref_type: &str, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let shape: Doc = reference_shape(ref_type, values);
        self.set(key, Value::Document(shape));
    }

    /// Writes `a_{name}_ids`, replacing any previous value.
    pub fn create_article_reference_field<I>(&mut self, name: &str, ref_type: &str, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.create_reference_field(&article_reference_name(name), ref_type, values);
    }

    /// Writes `e_{name}_ids`, replacing any previous value.
    pub fn create_entity_reference_field<I>(&mut self, name: &str, ref_type: &str, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.create_reference_field(&entity_reference_name(name), ref_type, values);
    }
}

impl FrozenDoc {
    /// Returns a snapshot with a reference field written under an explicit key.
    pub fn create_reference_field<I>(&self, key: &str, ref_type: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let shape: FrozenDoc = reference_shape(ref_type, values);
        self.set_item(key, Value::Document(shape))
    }

    /// Returns a snapshot with `a_{name}_ids` written.
    pub fn create_article_reference_field<I>(&self, name: &str, ref_type: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.create_reference_field(&article_reference_name(name), ref_type, values)
    }

    /// Returns a snapshot with `e_{name}_ids` written.
    pub fn create_entity_reference_field<I>(&self, name: &str, ref_type: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.create_reference_field(&entity_reference_name(name), ref_type, values)
    }
}
