//! Document model: one value algebra, two storage strategies.
//!
//! A document is a mapping from lowercase string keys to [`Value`]s. It comes in two
//! forms that share everything but their storage:
//!
//! - [`Doc`] edits in place and is what parsing produces.
//! - [`FrozenDoc`] is a persistent snapshot. Its editors return new snapshots and the
//!   receiver stays observable and unchanged.
//!
//! Both implement [`ReadDoc`], the read contract. The typed accessors in [`TypedAccess`] and
//! the reference-field readers in [`ReferenceRead`] are written once against that contract
//! and apply to either form.
//!
//! # Usage
//!
//! ```
//! use jsonobject::{Doc, FrozenDoc, ReferenceRead, TypedAccess};
//!
//! let mut doc = Doc::parse(r#"{"Id": 7, "Title": "Pump inspection"}"#).unwrap();
//! assert_eq!(doc.id(), "7");
//! assert_eq!(doc.get_string_or_empty("TITLE"), "Pump inspection");
//!
//! let snapshot = FrozenDoc::from_mutable(&doc);
//! let linked = snapshot.create_entity_reference_field("owner", "person", ["42"]);
//! assert_eq!(linked.values_from_reference("e_owner_ids"), vec!["42".to_string()]);
//! assert!(!snapshot.contains_key("e_owner_ids"));
//! ```

use std::borrow::Cow;

// Submodules
pub mod access;
pub mod coerce;
pub mod errors;
pub mod frozen;
pub mod mutable;
pub mod reference;
pub mod value;

// Convenience re-exports for core document types
pub use access::TypedAccess;
pub use coerce::{DateHandling, JsonTag, ParseOptions};
pub use errors::DocError;
pub use frozen::FrozenDoc;
pub use mutable::Doc;
pub use reference::{ReferenceKind, ReferenceRead};
pub use value::{FromValue, FrozenValue, Value};

/// Lowercases a key, borrowing when it is already lowercase.
///
/// Every document operation routes its key through here before touching storage.
pub fn normalize_key(key: &str) -> Cow<'_, str> {
    if key.chars().flat_map(char::to_lowercase).eq(key.chars()) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(key.to_lowercase())
    }
}

/// Owned variant of [`normalize_key`] that reuses the allocation when possible.
pub(crate) fn normalize_owned(key: String) -> String {
    match normalize_key(&key) {
        Cow::Borrowed(_) => key,
        Cow::Owned(lower) => lower,
    }
}

/// The read contract shared by [`Doc`] and [`FrozenDoc`].
///
/// Nested documents inside a `Value<Self>` are always of the implementing type, so a
/// snapshot never contains a mutable child and vice versa.
pub trait ReadDoc: Clone + Sized {
    /// Looks up the value stored under `key`, normalizing the key first.
    fn lookup(&self, key: &str) -> Option<&Value<Self>>;

    /// Iterates over every entry. Keys are already normalized.
    fn entries(&self) -> impl Iterator<Item = (&str, &Value<Self>)>;

    /// Number of entries.
    fn entry_count(&self) -> usize;

    /// Builds a document from key/value pairs, normalizing keys. Later pairs win.
    fn from_entries(entries: impl IntoIterator<Item = (String, Value<Self>)>) -> Self;

    /// Returns true if `key` is present.
    fn has_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Renders the document as a generic JSON tree, the inverse of parsing.
    fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries()
                .map(|(key, value)| (key.to_string(), value.to_json_value()))
                .collect(),
        )
    }
}
