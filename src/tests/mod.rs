//! Test modules for the Weighted Trie crate.
//!
//! This module contains the crate-internal test suites:
//! - Unit tests for configuration and error handling
//! - Property-based tests for the trie engine using proptest
//! - Table-driven tests using test-case
//! - Test fixtures and utilities

pub mod test_utils;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{weight_strategy, word_strategy, FaultSwitch, FaultyStore, TestFixture};
