//! Constants used throughout the jsonobject library.
//!
//! This module provides central definitions for the reserved keys and key prefixes that
//! give documents their conventions. All of them are lowercase, matching the key
//! normalization applied by both document forms.

/// Identity key of a document.
pub const ID: &str = "id";

/// Key holding the identity of the parent document.
pub const PARENT_ID: &str = "parentid";

/// Key holding the kind of the parent document.
pub const PARENT_TYPE: &str = "parenttype";

/// Sentinel identity used when a document has no `id` (or no `parentid`).
pub const NULL_ID: &str = "0";

/// Prefix of article reference fields.
pub const ARTICLE_PREFIX: &str = "a_";

/// Prefix of entity reference fields.
pub const ENTITY_PREFIX: &str = "e_";

/// Prefix of generated article fields, dropped on parse unless explicitly kept.
pub const GENERATED_ARTICLE_PREFIX: &str = "a_gen_";

/// Prefix of generated entity fields, dropped on parse unless explicitly kept.
pub const GENERATED_ENTITY_PREFIX: &str = "e_gen_";

/// Prefix of temporary fields, removable on demand.
pub const TEMPORARY_PREFIX: &str = "tmp_";

/// Prefix of system fields, copied from a parent document on demand.
pub const SYSTEM_PREFIX: &str = "sys_";

/// Suffix shared by every reference field key.
pub const REFERENCE_SUFFIX: &str = "_ids";

/// Key of the referenced kind inside a reference field.
pub const REFERENCE_TYPE: &str = "type";

/// Key of the referenced identifiers inside a reference field.
pub const REFERENCE_VALUES: &str = "values";

/// Key of the result collection in query responses.
pub const RESULTS: &str = "results";

/// Key of the entity tag used for optimistic concurrency checks.
pub const ETAG: &str = "etag";

/// Returns true if `key` carries one of the generated-field prefixes.
pub fn is_generated_key(key: &str) -> bool {
    key.starts_with(GENERATED_ARTICLE_PREFIX) || key.starts_with(GENERATED_ENTITY_PREFIX)
}
