//! Weighted Trie Library
//!
//! This library contains a weighted prefix tree together with the
//! configuration, error handling and word-list loading used by the
//! `weighted_trie` command-line tool. It can also be used as a dependency by
//! other projects.
//!
//! # Architecture
//!
//! - The trie engine is a set of stateless algorithms over one node store
//! - Storage backends plug in through the `NodeStore` trait
//! - Every operation is atomic with respect to concurrent callers
//! - Not-found is an empty result, never an error

#![forbid(unsafe_code)]

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod wordlist;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Weighted Trie crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
