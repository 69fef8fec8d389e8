// Copyright (c) 2025 Weighted Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Per-operation isolation scopes.
//!
//! Every public trie operation runs inside exactly one scope. A [`ReadScope`]
//! holds the shared lock, so readers proceed in parallel and never observe a
//! half-applied write. A [`WriteScope`] holds the exclusive lock and journals
//! each mutation it performs; unless [`WriteScope::commit`] is called, dropping
//! the scope replays the journal backwards and the store is left as it was
//! before the operation started.

use std::ops::Deref;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::StoreResult;
use super::node::{NodeId, Weight};
use super::store::NodeStore;

/// Shared, read-only access to the store for the duration of one operation.
pub struct ReadScope<'a, S: NodeStore> {
    guard: RwLockReadGuard<'a, S>,
}

impl<'a, S: NodeStore> ReadScope<'a, S> {
    /// Blocks until no writer holds the store.
    pub fn acquire(lock: &'a RwLock<S>) -> Self {
        Self { guard: lock.read() }
    }
}

impl<S: NodeStore> Deref for ReadScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.guard
    }
}

/// A single mutation, recorded with what is needed to revert it.
#[derive(Debug, Clone, PartialEq)]
enum Undo {
    Created { parent: NodeId, child: NodeId },
    Weight { parent: NodeId, child: NodeId, previous: Weight },
    End { id: NodeId, previous: Option<String> },
}

/// Exclusive access to the store with an undo journal.
pub struct WriteScope<'a, S: NodeStore> {
    guard: RwLockWriteGuard<'a, S>,
    journal: Vec<Undo>,
    committed: bool,
}

impl<'a, S: NodeStore> WriteScope<'a, S> {
    /// Blocks until the store is free of readers and writers.
    pub fn acquire(lock: &'a RwLock<S>) -> Self {
        Self {
            guard: lock.write(),
            journal: Vec::new(),
            committed: false,
        }
    }

    /// Resolves or creates the `ch` child of `parent`.
    pub fn get_or_create(&mut self, parent: NodeId, ch: char) -> StoreResult<NodeId> {
        let existing = self.guard.child(parent, ch)?;
        let id = self.guard.get_or_create(parent, ch)?;
        if existing.is_none() {
            tracing::trace!(%parent, %ch, child = %id, "created node");
            self.journal.push(Undo::Created { parent, child: id });
        }
        Ok(id)
    }

    /// Overwrites the weight of `parent -> child`.
    pub fn set_edge_weight(
        &mut self,
        parent: NodeId,
        child: NodeId,
        weight: Weight,
    ) -> StoreResult<()> {
        let previous = match self.guard.get(child)?.and_then(|node| node.ch) {
            Some(ch) => self
                .guard
                .child(parent, ch)?
                .filter(|edge| edge.target == child)
                .map(|edge| edge.weight),
            None => None,
        };

        self.guard.set_edge_weight(parent, child, weight)?;
        if let Some(previous) = previous {
            self.journal.push(Undo::Weight {
                parent,
                child,
                previous,
            });
        }
        Ok(())
    }

    /// Marks `id` as the end of `word`.
    pub fn mark_end(&mut self, id: NodeId, word: &str) -> StoreResult<()> {
        let previous = self.previous_word(id)?;
        self.guard.mark_end(id, word)?;
        self.journal.push(Undo::End { id, previous });
        Ok(())
    }

    /// Clears the end-of-word marker of `id`.
    pub fn clear_end(&mut self, id: NodeId) -> StoreResult<()> {
        let previous = self.previous_word(id)?;
        self.guard.clear_end(id)?;
        self.journal.push(Undo::End { id, previous });
        Ok(())
    }

    /// Drops every node except the root. Not journaled.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.guard.reset()
    }

    /// Makes the scope's mutations permanent and releases the lock.
    pub fn commit(mut self) {
        self.journal.clear();
        self.committed = true;
    }

    fn previous_word(&self, id: NodeId) -> StoreResult<Option<String>> {
        Ok(self.guard.get(id)?.and_then(|node| node.word))
    }

    fn rollback(&mut self) {
        tracing::debug!(entries = self.journal.len(), "rolling back write scope");
        while let Some(undo) = self.journal.pop() {
            let result = match &undo {
                Undo::Created { parent, child } => self.guard.discard(*parent, *child),
                Undo::Weight {
                    parent,
                    child,
                    previous,
                } => self.guard.set_edge_weight(*parent, *child, *previous),
                Undo::End {
                    id,
                    previous: Some(word),
                } => self.guard.mark_end(*id, word),
                Undo::End { id, previous: None } => self.guard.clear_end(*id),
            };
            if let Err(e) = result {
                tracing::error!(error = %e, ?undo, "failed to revert mutation during rollback");
            }
        }
    }
}

impl<S: NodeStore> Deref for WriteScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.guard
    }
}

impl<S: NodeStore> Drop for WriteScope<'_, S> {
    fn drop(&mut self) {
        if !self.committed && !self.journal.is_empty() {
            self.rollback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::weighted_trie::store::ArenaStore;

    #[test]
    fn test_uncommitted_scope_rolls_back() {
        let lock = RwLock::new(ArenaStore::new());
        {
            let mut scope = WriteScope::acquire(&lock);
            let a = scope.get_or_create(NodeId::ROOT, 'a').unwrap();
            scope.set_edge_weight(NodeId::ROOT, a, 2.0).unwrap();
            let b = scope.get_or_create(a, 'b').unwrap();
            scope.set_edge_weight(a, b, 2.0).unwrap();
            scope.mark_end(b, "ab").unwrap();
        }

        let store = ReadScope::acquire(&lock);
        assert_eq!(store.node_count().unwrap(), 1);
        assert!(store.children_of(NodeId::ROOT).unwrap().is_empty());
    }

    #[test]
    fn test_rollback_restores_previous_state() {
        let lock = RwLock::new(ArenaStore::new());
        let a = {
            let mut scope = WriteScope::acquire(&lock);
            let a = scope.get_or_create(NodeId::ROOT, 'a').unwrap();
            scope.set_edge_weight(NodeId::ROOT, a, 1.0).unwrap();
            scope.mark_end(a, "a").unwrap();
            scope.commit();
            a
        };

        {
            let mut scope = WriteScope::acquire(&lock);
            scope.set_edge_weight(NodeId::ROOT, a, 9.0).unwrap();
            scope.clear_end(a).unwrap();
            let b = scope.get_or_create(a, 'b').unwrap();
            scope.set_edge_weight(a, b, 9.0).unwrap();
        }

        let store = ReadScope::acquire(&lock);
        let node = store.get(a).unwrap().unwrap();
        assert!(node.is_end);
        assert_eq!(node.word.as_deref(), Some("a"));
        assert_eq!(store.child(NodeId::ROOT, 'a').unwrap().unwrap().weight, 1.0);
        assert!(store.children_of(a).unwrap().is_empty());
        assert_eq!(store.node_count().unwrap(), 2);
    }

    #[test]
    fn test_rollback_restores_weight_among_siblings() {
        let lock = RwLock::new(ArenaStore::new());
        {
            let mut scope = WriteScope::acquire(&lock);
            for (ch, weight) in ('a'..='z').zip(1..) {
                let id = scope.get_or_create(NodeId::ROOT, ch).unwrap();
                scope.set_edge_weight(NodeId::ROOT, id, Weight::from(weight)).unwrap();
            }
            scope.commit();
        }

        {
            let mut scope = WriteScope::acquire(&lock);
            let m = scope.get_or_create(NodeId::ROOT, 'm').unwrap();
            scope.set_edge_weight(NodeId::ROOT, m, 99.0).unwrap();
            assert_eq!(
                scope.journal,
                vec![Undo::Weight {
                    parent: NodeId::ROOT,
                    child: m,
                    previous: 13.0
                }]
            );
        }

        let store = ReadScope::acquire(&lock);
        assert_eq!(store.child(NodeId::ROOT, 'm').unwrap().unwrap().weight, 13.0);
    }

    #[test]
    fn test_existing_child_is_not_journaled_as_created() {
        let lock = RwLock::new(ArenaStore::new());
        {
            let mut scope = WriteScope::acquire(&lock);
            scope.get_or_create(NodeId::ROOT, 'x').unwrap();
            scope.commit();
        }
        {
            let mut scope = WriteScope::acquire(&lock);
            scope.get_or_create(NodeId::ROOT, 'x').unwrap();
            assert!(scope.journal.is_empty());
        }

        assert_eq!(ReadScope::acquire(&lock).node_count().unwrap(), 2);
    }
}
