//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A provider-assigned key id (UUID string).
pub type KeyId = String;

/// An alias name without the `alias/` prefix.
pub type AliasName = String;

/// A provider resource id as it appears in tag queries.
pub type ResourceId = String;
