//! Error types for document operations.
//!
//! This module defines structured error types for parsing and accessing documents,
//! providing context for malformed input, strict-accessor type mismatches, unusable
//! arguments and rejected inserts.

use thiserror::Error;

/// Structured error types for document operations.
///
/// Only the strict operations report these. The defaulting accessors in
/// [`TypedAccess`](super::TypedAccess) swallow type mismatches and return their
/// documented fallback instead.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocError {
    /// Source text is not valid JSON, or its shape cannot be represented
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// A present value could not be converted to the requested type
    #[error("cannot convert the value of '{key}' to '{expected}' (found {actual})")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    /// An argument was empty where a value is required
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// An insert targeted a key that already holds a value
    #[error("an entry with key '{key}' already exists")]
    DuplicateKey { key: String },

    /// A key expected to hold a list holds something else
    #[error("key '{key}' is not a list (found {actual})")]
    NotAList { key: String, actual: String },
}

impl DocError {
    /// Shorthand for the empty-key case shared by every key-taking operation.
    pub(crate) fn empty_key() -> Self {
        DocError::InvalidArgument {
            argument: "key",
            reason: "must not be empty".to_string(),
        }
    }

    /// Check if this error reports malformed input
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, DocError::MalformedInput { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, DocError::TypeMismatch { .. } | DocError::NotAList { .. })
    }

    /// Check if this error reports an invalid argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DocError::InvalidArgument { .. })
    }

    /// Check if this error reports a duplicate insert
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, DocError::DuplicateKey { .. })
    }

    /// Get the key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            DocError::TypeMismatch { key, .. }
            | DocError::DuplicateKey { key }
            | DocError::NotAList { key, .. } => Some(key),
            _ => None,
        }
    }
}

// Conversion from DocError to the main Error type
impl From<DocError> for crate::Error {
    fn from(err: DocError) -> Self {
        crate::Error::Doc(err)
    }
}
