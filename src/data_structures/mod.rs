//! Data structures for the Weighted Trie crate.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Every public operation isolated behind an explicit lock scope
//! - Storage reachable only through a narrow adapter trait

pub mod weighted_trie;

// Re-export common data structures
pub use weighted_trie::{WeightedTrie, WeightedTrieConfig, WeightedTrieError, WeightedTrieResult};
