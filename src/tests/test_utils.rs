//! Test utilities and fixtures for the Weighted Trie crate.
//!
//! This module provides reusable test components: proptest strategies for
//! words and weights, a temporary-file fixture, and a store wrapper that
//! injects storage failures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use tempfile::TempDir;

use crate::data_structures::weighted_trie::{
    ArenaStore, Edge, NodeId, NodeStore, StorageError, StoreResult, TrieNode, Weight,
};

/// Generate a strategy for short lowercase words.
///
/// A small alphabet keeps shared prefixes frequent.
pub fn word_strategy(max_length: usize) -> BoxedStrategy<String> {
    proptest::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'd', 'é']), 1..=max_length)
        .prop_map(|chars| chars.into_iter().collect::<String>())
        .boxed()
}

/// Generate a strategy for integral, non-negative weights.
///
/// Whole numbers keep cumulative sums exact so tests can compare with `==`.
pub fn weight_strategy() -> BoxedStrategy<Weight> {
    (0u32..100).prop_map(Weight::from).boxed()
}

/// Test fixture holding a temporary directory for config and word-list files.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Create a file within the fixture directory.
    ///
    /// # Parameters
    ///
    /// * `name` - File name, including extension.
    /// * `contents` - The contents to write to the file.
    pub fn create_file<C: AsRef<[u8]>>(
        &self,
        name: &str,
        contents: C,
    ) -> std::io::Result<std::path::PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

const DISARMED: usize = usize::MAX;

/// Handle that decides when a [`FaultyStore`] fails.
#[derive(Debug, Clone)]
pub struct FaultSwitch(Arc<AtomicUsize>);

impl FaultSwitch {
    /// Fails the mutation that follows the next `budget` successful ones.
    pub fn arm(&self, budget: usize) {
        self.0.store(budget, Ordering::SeqCst);
    }

    fn spend(&self) -> StoreResult<()> {
        let previous = self
            .0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| match n {
                DISARMED => None,
                0 => Some(DISARMED),
                n => Some(n - 1),
            });
        match previous {
            Ok(0) => Err(StorageError::Backend("injected failure".to_string())),
            _ => Ok(()),
        }
    }
}

/// Arena store that fails one mutation when its [`FaultSwitch`] fires.
///
/// The switch disarms itself after firing, so the rollback that follows can
/// run to completion.
#[derive(Debug)]
pub struct FaultyStore {
    inner: ArenaStore,
    switch: FaultSwitch,
}

impl FaultyStore {
    /// Wraps an empty arena; the store never fails until the switch is armed.
    pub fn new() -> (Self, FaultSwitch) {
        let switch = FaultSwitch(Arc::new(AtomicUsize::new(DISARMED)));
        let store = Self {
            inner: ArenaStore::new(),
            switch: switch.clone(),
        };
        (store, switch)
    }

    fn spend(&self) -> StoreResult<()> {
        self.switch.spend()
    }
}

impl NodeStore for FaultyStore {
    fn get_or_create(&mut self, parent: NodeId, ch: char) -> StoreResult<NodeId> {
        self.spend()?;
        self.inner.get_or_create(parent, ch)
    }

    fn get(&self, id: NodeId) -> StoreResult<Option<TrieNode>> {
        self.inner.get(id)
    }

    fn set_edge_weight(
        &mut self,
        parent: NodeId,
        child: NodeId,
        weight: Weight,
    ) -> StoreResult<()> {
        self.spend()?;
        self.inner.set_edge_weight(parent, child, weight)
    }

    fn mark_end(&mut self, id: NodeId, word: &str) -> StoreResult<()> {
        self.spend()?;
        self.inner.mark_end(id, word)
    }

    fn clear_end(&mut self, id: NodeId) -> StoreResult<()> {
        self.spend()?;
        self.inner.clear_end(id)
    }

    fn children_of(&self, id: NodeId) -> StoreResult<Vec<(char, NodeId, Weight)>> {
        self.inner.children_of(id)
    }

    fn child(&self, parent: NodeId, ch: char) -> StoreResult<Option<Edge>> {
        self.inner.child(parent, ch)
    }

    // Rollback must always be able to run.
    fn discard(&mut self, parent: NodeId, child: NodeId) -> StoreResult<()> {
        self.inner.discard(parent, child)
    }

    fn node_count(&self) -> StoreResult<usize> {
        self.inner.node_count()
    }

    fn reset(&mut self) -> StoreResult<()> {
        self.inner.reset()
    }
}
