// Copyright (c) 2025 Weighted Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Weighted Trie.
//!
//! Absence is never an error here: a search miss yields an empty result and
//! deleting an unknown word is a no-op. Errors are limited to rejected input
//! and failures reported by the storage backend.

use super::node::{NodeId, Weight};

/// Failures reported by a [`NodeStore`](super::NodeStore) implementation.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum StorageError {
    /// The referenced node does not exist in the store.
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    /// No edge connects the two nodes.
    #[error("No edge from {parent} to {child}")]
    EdgeNotFound {
        /// Parent side of the missing edge.
        parent: NodeId,
        /// Child side of the missing edge.
        child: NodeId,
    },

    /// The node still carries a word or has children and cannot be detached.
    #[error("Node {0} is still in use and cannot be discarded")]
    NotDiscardable(NodeId),

    /// Opaque backend failure (connectivity loss, aborted transaction, ...).
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Result type for storage adapter operations
pub type StoreResult<T> = Result<T, StorageError>;

/// Errors that can occur in Weighted Trie operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum WeightedTrieError {
    /// Error when an empty word is inserted.
    #[error("Empty word not allowed")]
    EmptyWord,

    /// Error when a weight is negative, not a number, or large enough to make a
    /// path total overflow.
    #[error("Invalid weight {weight} for word '{word}': weights must be non-negative and keep path totals finite")]
    InvalidWeight {
        /// The word being inserted.
        word: String,
        /// The rejected weight.
        weight: Weight,
    },

    /// Error when a word exceeds the maximum length allowed.
    #[error("Word '{word}' exceeds maximum length of {max_length} characters")]
    WordTooLong {
        /// The word that was too long.
        word: String,
        /// The maximum allowed length.
        max_length: usize,
    },

    /// The storage backend failed; the operation was rolled back.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WeightedTrieError::EmptyWord;
        assert_eq!(err.to_string(), "Empty word not allowed");

        let err = WeightedTrieError::WordTooLong {
            word: "test".to_string(),
            max_length: 3,
        };
        assert_eq!(
            err.to_string(),
            "Word 'test' exceeds maximum length of 3 characters"
        );

        let err = WeightedTrieError::InvalidWeight {
            word: "cat".to_string(),
            weight: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid weight -2 for word 'cat': weights must be non-negative and keep path totals finite"
        );
    }

    #[test]
    fn test_storage_error_converts() {
        let err: WeightedTrieError = StorageError::NodeNotFound(NodeId(4)).into();
        assert_eq!(err.to_string(), "Storage error: Node #4 not found");
        assert_eq!(
            err,
            WeightedTrieError::Storage(StorageError::NodeNotFound(NodeId(4)))
        );
    }
}
