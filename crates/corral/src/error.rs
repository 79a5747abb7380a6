//! Error taxonomy shared by every collection.

use thiserror::Error;

/// Failure reported by a collection operation.
///
/// Every fallible operation has a `try_*` sibling that returns an
/// `Option`/`bool` instead; the sibling never disturbs the collection on
/// failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Index or position argument outside the valid window
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    /// Pop/front/back on a zero-size collection
    #[error("Operation on empty collection")]
    EmptyCollection,
    /// Associative lookup for a key that is not present
    #[error("Unknown key: {key}")]
    UnknownKey { key: String },
    /// Strict insertion or rename onto a key that already exists
    #[error("Duplicate key: {key}")]
    DuplicateKey { key: String },
    /// Comparison across operands with different ordering disciplines
    #[error("Collections are not comparable: {reason}")]
    NotComparable { reason: String },
    /// Set algebra across operands with different ordering disciplines
    #[error("Incompatible collections: {reason}")]
    IncompatibleCollection { reason: String },
    /// Packet encode/decode mismatch
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl CollectionError {
    /// Build an `UnknownKey` error from any debuggable key
    pub(crate) fn unknown_key(key: &impl std::fmt::Debug) -> Self {
        CollectionError::UnknownKey {
            key: format!("{key:?}"),
        }
    }

    /// Build a `DuplicateKey` error from any debuggable key
    pub(crate) fn duplicate_key(key: &impl std::fmt::Debug) -> Self {
        CollectionError::DuplicateKey {
            key: format!("{key:?}"),
        }
    }
}
