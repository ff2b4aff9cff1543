//! The persistent document.
//!
//! [`FrozenDoc`] mirrors [`Doc`] but never changes once built. Editors such as
//! [`FrozenDoc::set_item`] return a new snapshot; the receiver stays valid and observable
//! by every other holder. Storage is an [`im::OrdMap`], so unaffected subtrees are shared
//! between a snapshot and the snapshots derived from it.

use std::fmt;

use im::OrdMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use super::{
    Doc, DocError, FrozenValue, ParseOptions, ReadDoc,
    access::identity_view,
    coerce::{coerce_root, parse_json_text},
    normalize_key, normalize_owned,
};
use crate::{
    Result,
    constants::{ID, NULL_ID, PARENT_ID, PARENT_TYPE, SYSTEM_PREFIX, TEMPORARY_PREFIX},
};

/// An immutable, structurally shared document snapshot.
///
/// Every nested document and every element of an object array is itself a `FrozenDoc`.
///
/// ```
/// # use jsonobject::{Doc, FrozenDoc, Value};
/// let doc = Doc::new().with("Title", "draft");
/// let first = FrozenDoc::from_mutable(&doc);
/// let second = first.set_item("title", "final");
///
/// assert_eq!(first.get("title"), Some(&Value::from("draft")));
/// assert_eq!(second.get("title"), Some(&Value::from("final")));
/// assert_eq!(first.to_mutable(), doc);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrozenDoc {
    entries: OrdMap<String, FrozenValue>,
}

impl FrozenDoc {
    /// Creates a new empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses JSON text straight into a snapshot.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, ParseOptions::default())
    }

    /// Parses JSON text straight into a snapshot with explicit options.
    pub fn parse_with(text: &str, options: ParseOptions) -> Result<Self> {
        let json = parse_json_text(text)?;
        Ok(coerce_root(&json, options)?)
    }

    /// Takes a deep snapshot of a mutable document.
    ///
    /// Nested documents and object-array elements are frozen recursively. Scalars and value
    /// arrays are copied, so later edits to `doc` never show up in the snapshot.
    pub fn from_mutable(doc: &Doc) -> Self {
        Self {
            entries: doc
                .iter()
                .map(|(key, value)| (key.to_string(), value.freeze()))
                .collect(),
        }
    }

    /// Converts back to an editable document, thawing nested snapshots recursively.
    pub fn to_mutable(&self) -> Doc {
        Doc::from_entries(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.thaw())),
        )
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the snapshot contains the given key
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(normalize_key(key).as_ref())
    }

    /// Gets a value by key
    pub fn get(&self, key: &str) -> Option<&FrozenValue> {
        self.entries.get(normalize_key(key).as_ref())
    }

    /// Iterates over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrozenValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over values in key order
    pub fn values(&self) -> impl Iterator<Item = &FrozenValue> {
        self.entries.values()
    }

    /// Returns a snapshot with `key` inserted.
    ///
    /// Adding a key that already holds an equal value returns an unchanged snapshot;
    /// adding a different value fails with [`DocError::DuplicateKey`].
    pub fn add(
        &self,
        key: impl Into<String>,
        value: impl Into<FrozenValue>,
    ) -> std::result::Result<Self, DocError> {
        let key = normalize_owned(key.into());
        if key.is_empty() {
            return Err(DocError::empty_key());
        }
        let value = value.into();
        match self.entries.get(&key) {
            Some(existing) if *existing == value => Ok(self.clone()),
            Some(_) => Err(DocError::DuplicateKey { key }),
            None => Ok(Self {
                entries: self.entries.update(key, value),
            }),
        }
    }

    /// Returns a snapshot with every pair added, with the rules of [`FrozenDoc::add`].
    ///
    /// Nothing is applied if any pair fails.
    pub fn add_range<K, V>(
        &self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> std::result::Result<Self, DocError>
    where
        K: Into<String>,
        V: Into<FrozenValue>,
    {
        pairs
            .into_iter()
            .try_fold(self.clone(), |snapshot, (key, value)| snapshot.add(key, value))
    }

    /// Returns an empty snapshot.
    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Returns a snapshot without `key`.
    pub fn remove(&self, key: &str) -> Self {
        Self {
            entries: self.entries.without(normalize_key(key).as_ref()),
        }
    }

    /// Returns a snapshot with `key` set, overwriting any previous value.
    ///
    /// Like [`Doc::set`], this accepts the empty key; [`FrozenDoc::add`] rejects it.
    pub fn set_item(&self, key: impl Into<String>, value: impl Into<FrozenValue>) -> Self {
        let key = normalize_owned(key.into());
        if key.is_empty() {
            debug!("storing a value under the empty key");
        }
        Self {
            entries: self.entries.update(key, value.into()),
        }
    }

    /// Returns a snapshot with every pair set, overwriting.
    pub fn set_items<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FrozenValue>,
    {
        let mut entries = self.entries.clone();
        for (key, value) in pairs {
            entries.insert(normalize_owned(key.into()), value.into());
        }
        Self { entries }
    }

    /// The document identity, or `"0"` when it is missing, null or empty.
    pub fn id(&self) -> String {
        identity_view(self, ID, NULL_ID)
    }

    /// The parent identity, or `"0"`.
    pub fn parent_id(&self) -> String {
        identity_view(self, PARENT_ID, NULL_ID)
    }

    /// The parent kind, or the empty string.
    pub fn parent_type(&self) -> String {
        identity_view(self, PARENT_TYPE, "")
    }

    /// True when the snapshot has no parent identity.
    pub fn is_root_object(&self) -> bool {
        self.parent_id() == NULL_ID
    }

    /// True when both the parent identity and the parent kind are set.
    pub fn has_parent(&self) -> bool {
        self.parent_id() != NULL_ID && !self.parent_type().is_empty()
    }

    /// Returns a snapshot without temporary fields (`tmp_` prefix).
    pub fn without_temporary_properties(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| !key.starts_with(TEMPORARY_PREFIX))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    /// Returns a snapshot with every system field (`sys_` prefix) of `source` copied in.
    pub fn with_system_properties_from(&self, source: &FrozenDoc) -> Self {
        self.set_items(
            source
                .iter()
                .filter(|(key, _)| key.starts_with(SYSTEM_PREFIX))
                .map(|(key, value)| (key.to_string(), value.clone())),
        )
    }

    /// Renders the snapshot as a generic JSON tree.
    pub fn to_json_value(&self) -> JsonValue {
        ReadDoc::to_json_value(self)
    }

    /// Renders the snapshot as compact canonical JSON.
    pub fn to_json_string(&self) -> String {
        self.to_json_value().to_string()
    }
}

impl ReadDoc for FrozenDoc {
    fn lookup(&self, key: &str) -> Option<&FrozenValue> {
        self.get(key)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &FrozenValue)> {
        self.iter()
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn from_entries(entries: impl IntoIterator<Item = (String, FrozenValue)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (normalize_owned(k), v))
                .collect(),
        }
    }
}

impl From<&Doc> for FrozenDoc {
    fn from(doc: &Doc) -> Self {
        FrozenDoc::from_mutable(doc)
    }
}

impl From<Doc> for FrozenDoc {
    fn from(doc: Doc) -> Self {
        FrozenDoc::from_mutable(&doc)
    }
}

impl fmt::Display for FrozenDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_value())
    }
}

impl Serialize for FrozenDoc {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FrozenDoc {
    fn deserialize<De: serde::Deserializer<'de>>(
        deserializer: De,
    ) -> std::result::Result<Self, De::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        coerce_root(&json, ParseOptions::default()).map_err(serde::de::Error::custom)
    }
}
