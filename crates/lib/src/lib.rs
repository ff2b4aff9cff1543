//!
//! jsonobject: schema-less JSON documents that remember what type every value had.
//!
//! ## Core Concepts
//!
//! * **Documents (`doc::Doc`)**: An editable key/value container. Keys are lowercased on every
//!   read and write, so `"Title"` and `"title"` name the same entry.
//! * **Snapshots (`doc::FrozenDoc`)**: An immutable, structurally shared copy of a document.
//!   Every edit returns a new snapshot and leaves the receiver untouched.
//! * **Values (`doc::Value`)**: A closed union of null, bool, integer, decimal, date-time,
//!   string, nested document, value array and object array. Parsing picks the variant from
//!   the JSON token kind, and rendering maps each variant back to its natural JSON form.
//! * **Reference fields (`doc::ReferenceRead`)**: Typed links to other articles or entities,
//!   stored as `{prefix}{name}_ids: { "type": ..., "values": [...] }`.
//! * **Typed accessors (`doc::TypedAccess`)**: Getters with documented fallbacks, shared by
//!   both document forms through the [`doc::ReadDoc`] read contract.

pub mod constants;
pub mod doc;
pub mod envelope;

pub use doc::{
    DateHandling, Doc, DocError, FromValue, FrozenDoc, FrozenValue, ParseOptions, ReadDoc,
    ReferenceKind, ReferenceRead, TypedAccess, Value,
};

/// Result type used throughout the jsonobject library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the jsonobject library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured document errors from the doc module
    #[error(transparent)]
    Doc(doc::DocError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Doc(_) => "doc",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error reports input text that is not valid JSON.
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_malformed_input(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error reports an unusable argument, such as an empty key.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error reports an insert over an existing key.
    pub fn is_duplicate_key(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_duplicate_key(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this error is document-related.
    pub fn is_doc_error(&self) -> bool {
        matches!(self, Error::Doc(_))
    }
}
