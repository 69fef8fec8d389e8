// Copyright (c) 2025 Weighted Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Weighted Trie Implementation
//!
//! A prefix tree whose edges carry weights. Every insertion writes one weight
//! onto each edge along the word's path; queries report the cumulative weight
//! of the root-to-node path and rank prefix matches by it.
//!
//! # Key Features
//!
//! * Shared prefixes share nodes, so "app" and "apple" reuse the same chain
//! * Re-inserting a word overwrites its edge weights instead of summing them
//! * Deletion only clears the end-of-word marker (tombstone), so longer words
//!   through the deleted word's path keep working
//! * Pluggable storage through the [`NodeStore`] trait
//!
//! # Concurrency Safety
//!
//! Each public operation runs inside one scope over the store: queries share a
//! read lock, mutations take the write lock and roll back on failure. No
//! caller can observe a half-built path.
//!
//! # Example
//!
//! ```
//! use weighted_trie_lib::data_structures::weighted_trie::WeightedTrie;
//!
//! let trie = WeightedTrie::new();
//! trie.add_word("apple", 5.0).unwrap();
//! assert_eq!(trie.search_word("apple").unwrap()[0].total_weight, 25.0);
//!
//! // "app" rewrites the three edges it shares with "apple"
//! trie.add_word("App", 3.0).unwrap();
//! assert_eq!(trie.search_word("apple").unwrap()[0].total_weight, 19.0);
//!
//! let ranked = trie.starts_with("ap").unwrap();
//! assert_eq!(ranked[0].word(), Some("apple"));
//! assert_eq!(ranked[1].word(), Some("app"));
//! ```

mod error;
mod node;
mod query;
mod resolver;
mod scope;
mod store;

use parking_lot::RwLock;
use tracing::debug;

pub use error::{StorageError, StoreResult, WeightedTrieError};
pub use node::{is_valid_weight, Edge, NodeId, SearchHit, TrieNode, Weight, WordWeight};
pub use scope::{ReadScope, WriteScope};
pub use store::{ArenaStore, NodeStore};

#[cfg(test)]
pub use store::MockNodeStore;

/// Result type for Weighted Trie operations
pub type WeightedTrieResult<T> = Result<T, WeightedTrieError>;

/// Weight applied to every edge when none is given.
pub const DEFAULT_WEIGHT: Weight = 1.0;

/// Default limit on the number of characters in a word.
pub const DEFAULT_MAX_WORD_LENGTH: usize = 128;

/// Configuration options for the Weighted Trie
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTrieConfig {
    /// Weight used by [`WeightedTrie::add_word_default`]
    pub default_weight: Weight,

    /// Maximum number of characters in an inserted word
    pub max_word_length: usize,
}

impl Default for WeightedTrieConfig {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
        }
    }
}

/// Weighted prefix tree over a [`NodeStore`].
#[derive(Debug)]
pub struct WeightedTrie<S: NodeStore = ArenaStore> {
    /// Node storage; the only shared mutable state
    store: RwLock<S>,

    /// Configuration options
    config: WeightedTrieConfig,
}

impl WeightedTrie<ArenaStore> {
    /// Creates an empty trie backed by an [`ArenaStore`].
    pub fn new() -> Self {
        Self::with_config(WeightedTrieConfig::default())
    }

    /// Creates an empty in-memory trie with the given configuration.
    pub fn with_config(config: WeightedTrieConfig) -> Self {
        Self::with_store(ArenaStore::new(), config)
    }
}

impl Default for WeightedTrie<ArenaStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: NodeStore> WeightedTrie<S> {
    /// Creates a trie over an existing store.
    pub fn with_store(store: S, config: WeightedTrieConfig) -> Self {
        Self {
            store: RwLock::new(store),
            config,
        }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &WeightedTrieConfig {
        &self.config
    }

    /// Lowercases `word` and checks it against the insertion rules.
    fn validate(&self, word: &str, weight: Weight) -> WeightedTrieResult<String> {
        if word.is_empty() {
            return Err(WeightedTrieError::EmptyWord);
        }

        let word = word.to_lowercase();
        if !is_valid_weight(weight, self.config.max_word_length) {
            return Err(WeightedTrieError::InvalidWeight { word, weight });
        }
        if word.chars().count() > self.config.max_word_length {
            return Err(WeightedTrieError::WordTooLong {
                word,
                max_length: self.config.max_word_length,
            });
        }
        Ok(word)
    }

    /// Inserts a word, writing `weight` onto every edge of its path.
    ///
    /// Missing nodes are created; existing ones are reused and their edge
    /// weights overwritten.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - `true` if the word was not stored before.
    /// * `Err(WeightedTrieError)` - If the input was rejected or the store failed.
    pub fn add_word<W: AsRef<str>>(&self, word: W, weight: Weight) -> WeightedTrieResult<bool> {
        let word = self.validate(word.as_ref(), weight)?;

        let mut scope = WriteScope::acquire(&self.store);
        let added = resolver::insert_path(&mut scope, &word, weight)?;
        scope.commit();

        debug!(%word, weight, added, "add_word");
        Ok(added)
    }

    /// Inserts a word with the configured default weight.
    pub fn add_word_default<W: AsRef<str>>(&self, word: W) -> WeightedTrieResult<bool> {
        self.add_word(word, self.config.default_weight)
    }

    /// Inserts many words in one write scope.
    ///
    /// Entries without a weight use the configured default. Every entry is
    /// validated before the store is touched, and a storage failure rolls back
    /// the whole batch.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of words that were not stored before.
    /// * `Err(WeightedTrieError)` - If any entry was rejected or the store failed.
    pub fn add_words<I, W>(&self, entries: I) -> WeightedTrieResult<usize>
    where
        I: IntoIterator<Item = (W, Option<Weight>)>,
        W: AsRef<str>,
    {
        let batch = entries
            .into_iter()
            .map(|(word, weight)| {
                let weight = weight.unwrap_or(self.config.default_weight);
                self.validate(word.as_ref(), weight).map(|w| (w, weight))
            })
            .collect::<WeightedTrieResult<Vec<_>>>()?;

        let mut scope = WriteScope::acquire(&self.store);
        let mut added = 0;
        for (word, weight) in &batch {
            if resolver::insert_path(&mut scope, word, *weight)? {
                added += 1;
            }
        }
        scope.commit();

        debug!(entries = batch.len(), added, "add_words");
        Ok(added)
    }

    /// Looks up a word exactly.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SearchHit>)` - One hit with the word's cumulative weight, or
    ///   empty if the word is not stored (prefixes of stored words do not count).
    /// * `Err(WeightedTrieError)` - If the store failed.
    pub fn search_word<W: AsRef<str>>(&self, word: W) -> WeightedTrieResult<Vec<SearchHit>> {
        let word = word.as_ref().to_lowercase();

        let scope = ReadScope::acquire(&self.store);
        let hit = query::exact(&*scope, &word)?;

        debug!(%word, found = hit.is_some(), "search_word");
        Ok(hit.into_iter().collect())
    }

    /// Lists every stored word starting with `prefix`, heaviest first.
    ///
    /// The prefix itself is included when it is a stored word. Weights are
    /// measured from the root. An empty prefix lists the whole trie.
    pub fn starts_with<P: AsRef<str>>(&self, prefix: P) -> WeightedTrieResult<Vec<SearchHit>> {
        let prefix = prefix.as_ref().to_lowercase();

        let scope = ReadScope::acquire(&self.store);
        let hits = query::with_prefix(&*scope, &prefix)?;

        debug!(%prefix, matches = hits.len(), "starts_with");
        Ok(hits)
    }

    /// Removes a word by clearing its end-of-word marker.
    ///
    /// Nodes and edges stay in place, so other words sharing the path are
    /// unaffected. Deleting a word that is not stored is a no-op.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - `true` if the word was stored and has been removed.
    /// * `Err(WeightedTrieError)` - If the store failed.
    pub fn delete_word<W: AsRef<str>>(&self, word: W) -> WeightedTrieResult<bool> {
        let word = word.as_ref().to_lowercase();

        let mut scope = WriteScope::acquire(&self.store);
        let removed = match query::exact(&*scope, &word)? {
            Some(hit) => {
                scope.clear_end(hit.node.id)?;
                true
            }
            None => false,
        };
        scope.commit();

        debug!(%word, removed, "delete_word");
        Ok(removed)
    }

    /// Lists every stored word with its cumulative weight, heaviest first.
    pub fn get_all_words(&self) -> WeightedTrieResult<Vec<WordWeight>> {
        let scope = ReadScope::acquire(&self.store);
        let hits = query::with_prefix(&*scope, "")?;

        debug!(words = hits.len(), "get_all_words");
        Ok(hits.into_iter().map(WordWeight::from).collect())
    }

    /// Returns the number of stored words.
    ///
    /// This requires traversing the entire trie, so it's an O(n) operation.
    pub fn len(&self) -> WeightedTrieResult<usize> {
        let scope = ReadScope::acquire(&self.store);
        Ok(query::count_words(&*scope)?)
    }

    /// Checks whether no word is stored.
    ///
    /// Tombstoned nodes left behind by deletions do not count.
    pub fn is_empty(&self) -> WeightedTrieResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Returns the number of nodes held by the store, including the root and
    /// nodes whose words were deleted.
    pub fn node_count(&self) -> WeightedTrieResult<usize> {
        let scope = ReadScope::acquire(&self.store);
        Ok(scope.node_count()?)
    }

    /// Removes every word and node except the root.
    pub fn clear(&self) -> WeightedTrieResult<()> {
        let mut scope = WriteScope::acquire(&self.store);
        scope.reset()?;
        scope.commit();

        debug!("clear");
        Ok(())
    }
}
