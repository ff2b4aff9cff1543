//! The mutable document.
//!
//! [`Doc`] is an editable, case-insensitive key/value container. It is what parsing
//! produces and what callers edit in place before taking a [`FrozenDoc`] snapshot.

use std::{collections::BTreeMap, fmt, io::Read};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, trace};

use super::{
    DocError, FrozenDoc, ParseOptions, ReadDoc, Value,
    coerce::{coerce_root, parse_json_text},
    normalize_key, normalize_owned,
};
use crate::{
    Result,
    constants::{ID, NULL_ID, PARENT_ID, PARENT_TYPE, SYSTEM_PREFIX, TEMPORARY_PREFIX},
};

/// An editable JSON document with case-insensitive keys.
///
/// Every key is lowercased before it is stored or looked up, so `"Title"`, `"TITLE"` and
/// `"title"` all name the same entry.
///
/// # Core Operations
///
/// - **Parsing**: [`Doc::parse`], [`Doc::parse_with`], [`Doc::from_json`], [`Doc::from_reader`]
/// - **Access**: [`Doc::get`], [`Doc::contains_key`], [`Doc::iter`]
/// - **Editing**: [`Doc::set`] overwrites, [`Doc::add`] refuses to, [`Doc::add_range`] upserts
/// - **Identity**: [`Doc::id`], [`Doc::parent_id`], [`Doc::parent_type`]
/// - **Rendering**: [`Doc::to_json_string`], [`Display`](fmt::Display)
///
/// # Examples
///
/// ```
/// # use jsonobject::{Doc, Value};
/// let mut doc = Doc::new();
/// doc.set("Title", "Pump inspection");
/// doc.set("Priority", 2);
///
/// assert_eq!(doc.get("title"), Some(&Value::from("Pump inspection")));
/// assert!(doc.add("PRIORITY", 3).is_err());
/// assert_eq!(doc.to_json_string(), r#"{"priority":2,"title":"Pump inspection"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doc {
    entries: BTreeMap<String, Value>,
}

impl Doc {
    /// Creates a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses JSON text with default options.
    ///
    /// Generated fields are dropped and ISO 8601 timestamps become date-times. Keys and
    /// strings may be single-quoted. Text that is not a JSON object fails with
    /// [`DocError::MalformedInput`].
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, ParseOptions::default())
    }

    /// Parses JSON text with explicit options.
    pub fn parse_with(text: &str, options: ParseOptions) -> Result<Self> {
        let json = parse_json_text(text)?;
        Ok(Self::from_json(&json, options)?)
    }

    /// Builds a document from an already-parsed generic JSON tree.
    pub fn from_json(json: &JsonValue, options: ParseOptions) -> std::result::Result<Self, DocError> {
        coerce_root(json, options)
    }

    /// Reads `reader` to the end and parses it like [`Doc::parse_with`].
    pub fn from_reader<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse_with(&text, options)
    }

    /// Builder-style setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the document has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the document contains the given key
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(normalize_key(key).as_ref())
    }

    /// Gets a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(normalize_key(key).as_ref())
    }

    /// Gets a mutable reference to a value by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(normalize_key(key).as_ref())
    }

    /// Sets a value, overwriting any previous one. Returns the value that was replaced.
    ///
    /// Any key is accepted, the empty key included. Use [`Doc::add`] to have an empty key
    /// rejected.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = normalize_owned(key.into());
        if key.is_empty() {
            debug!("storing a value under the empty key");
        }
        self.entries.insert(key, value.into())
    }

    /// Inserts a value under a key that must not exist yet.
    ///
    /// Unlike [`Doc::set`], an existing entry is an error and stays untouched.
    pub fn add(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> std::result::Result<(), DocError> {
        let key = normalize_owned(key.into());
        if key.is_empty() {
            return Err(DocError::empty_key());
        }
        if self.entries.contains_key(&key) {
            return Err(DocError::DuplicateKey { key });
        }
        self.entries.insert(key, value.into());
        Ok(())
    }

    /// Sets every pair, overwriting existing entries.
    pub fn add_range<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in pairs {
            self.set(key, value);
        }
    }

    /// Removes a value by key, returning it if it existed
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(normalize_key(key).as_ref())
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over values in key order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// The document identity.
    ///
    /// A missing, null or empty `id` is replaced by `"0"`, and the replacement is written
    /// back into the document.
    pub fn id(&mut self) -> String {
        self.ensure_identity(ID, NULL_ID)
    }

    /// The parent identity, defaulting to `"0"` the same way as [`Doc::id`].
    pub fn parent_id(&mut self) -> String {
        self.ensure_identity(PARENT_ID, NULL_ID)
    }

    /// The parent kind, defaulting to the empty string.
    pub fn parent_type(&mut self) -> String {
        self.ensure_identity(PARENT_TYPE, "")
    }

    /// True when the document has no parent identity.
    pub fn is_root_object(&mut self) -> bool {
        self.parent_id() == NULL_ID
    }

    /// True when both the parent identity and the parent kind are set.
    pub fn has_parent(&mut self) -> bool {
        self.parent_id() != NULL_ID && !self.parent_type().is_empty()
    }

    fn ensure_identity(&mut self, key: &'static str, default: &'static str) -> String {
        let current = self
            .entries
            .get(key)
            .map(Value::to_text)
            .unwrap_or_default();
        if !current.is_empty() {
            return current;
        }
        trace!(key, default, "materializing identity default");
        self.entries.insert(key.to_string(), Value::from(default));
        default.to_string()
    }

    /// Returns the list stored under `key`, inserting an empty one if the key is missing.
    ///
    /// The returned list is attached: pushing to it edits the document. An empty object
    /// array is reshaped into a value array; any other non-list value is
    /// [`DocError::NotAList`].
    pub fn get_list_and_create_if_missing(
        &mut self,
        key: &str,
    ) -> std::result::Result<&mut Vec<Value>, DocError> {
        if key.is_empty() {
            return Err(DocError::empty_key());
        }
        let key = normalize_key(key).into_owned();
        let slot = self.entries.entry(key.clone()).or_insert_with(|| {
            debug!(key = %key, "creating list on demand");
            Value::ValueArray(Vec::new())
        });
        if matches!(slot, Value::ObjectArray(docs) if docs.is_empty()) {
            *slot = Value::ValueArray(Vec::new());
        }
        match slot {
            Value::ValueArray(items) => Ok(items),
            other => Err(DocError::NotAList {
                key,
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Object-array counterpart of [`Doc::get_list_and_create_if_missing`].
    pub fn get_object_list_and_create_if_missing(
        &mut self,
        key: &str,
    ) -> std::result::Result<&mut Vec<Doc>, DocError> {
        if key.is_empty() {
            return Err(DocError::empty_key());
        }
        let key = normalize_key(key).into_owned();
        let slot = self.entries.entry(key.clone()).or_insert_with(|| {
            debug!(key = %key, "creating object list on demand");
            Value::ObjectArray(Vec::new())
        });
        if matches!(slot, Value::ValueArray(items) if items.is_empty()) {
            *slot = Value::ObjectArray(Vec::new());
        }
        match slot {
            Value::ObjectArray(docs) => Ok(docs),
            other => Err(DocError::NotAList {
                key,
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Copies every system field (`sys_` prefix) of `source` into this document,
    /// overwriting.
    pub fn set_system_properties_from(&mut self, source: &Doc) {
        for (key, value) in source.iter().filter(|(k, _)| k.starts_with(SYSTEM_PREFIX)) {
            self.entries.insert(key.to_string(), value.clone());
        }
    }

    /// Removes every temporary field (`tmp_` prefix).
    pub fn remove_temporary_properties(&mut self) {
        self.entries.retain(|key, _| !key.starts_with(TEMPORARY_PREFIX));
    }

    /// Copy restricted to the given keys. Keys that are absent are ignored.
    pub fn clone_keeping_only<K: AsRef<str>>(&self, keys: impl IntoIterator<Item = K>) -> Doc {
        let mut kept = Doc::new();
        for key in keys {
            let key = normalize_key(key.as_ref());
            if let Some(value) = self.entries.get(key.as_ref()) {
                kept.entries.insert(key.into_owned(), value.clone());
            }
        }
        kept
    }

    /// Takes a persistent snapshot of this document.
    pub fn freeze(&self) -> FrozenDoc {
        FrozenDoc::from_mutable(self)
    }

    /// Renders the document as a generic JSON tree.
    pub fn to_json_value(&self) -> JsonValue {
        ReadDoc::to_json_value(self)
    }

    /// Renders the document as compact canonical JSON.
    pub fn to_json_string(&self) -> String {
        self.to_json_value().to_string()
    }

    /// Renders the document as indented canonical JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value())?)
    }

    /// Writes compact canonical JSON to `writer`.
    pub fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer(writer, &self.to_json_value())?)
    }
}

impl ReadDoc for Doc {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter()
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (normalize_owned(k), v))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Doc {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Doc::new();
        doc.add_range(iter);
        doc
    }
}

impl From<FrozenDoc> for Doc {
    fn from(snapshot: FrozenDoc) -> Self {
        snapshot.to_mutable()
    }
}

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_value())
    }
}

impl Serialize for Doc {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Doc {
    fn deserialize<De: serde::Deserializer<'de>>(
        deserializer: De,
    ) -> std::result::Result<Self, De::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Doc::from_json(&json, ParseOptions::default()).map_err(serde::de::Error::custom)
    }
}
