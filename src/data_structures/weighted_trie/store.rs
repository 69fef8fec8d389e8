// Copyright (c) 2025 Weighted Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node storage for the Weighted Trie.
//!
//! [`NodeStore`] is the narrow interface the trie engine drives. Any backend
//! that can keep nodes addressable by a stable handle (an embedded map, a
//! relational schema, a graph database) can implement it. [`ArenaStore`] is
//! the in-memory default: nodes live in a `Vec` and reference their children
//! by index.

use fnv::FnvHashMap;

use super::error::{StorageError, StoreResult};
use super::node::{Edge, NodeId, TrieNode, Weight};

/// Storage adapter contract used by the trie engine.
///
/// Structural operations are idempotent: asking for an existing
/// `(parent, char)` child returns the existing handle.
#[cfg_attr(test, mockall::automock)]
pub trait NodeStore: Send + Sync {
    /// Returns the child of `parent` for `ch`, creating the node and its edge if missing.
    fn get_or_create(&mut self, parent: NodeId, ch: char) -> StoreResult<NodeId>;

    /// Returns a copy of the node, or `None` if the handle is unknown.
    fn get(&self, id: NodeId) -> StoreResult<Option<TrieNode>>;

    /// Overwrites the weight of the edge `parent -> child`.
    fn set_edge_weight(&mut self, parent: NodeId, child: NodeId, weight: Weight)
        -> StoreResult<()>;

    /// Marks `id` as the end of `word`.
    fn mark_end(&mut self, id: NodeId, word: &str) -> StoreResult<()>;

    /// Clears the end-of-word marker of `id`.
    fn clear_end(&mut self, id: NodeId) -> StoreResult<()>;

    /// Lists the outgoing edges of `id` as `(char, child, weight)`.
    fn children_of(&self, id: NodeId) -> StoreResult<Vec<(char, NodeId, Weight)>>;

    /// Looks up the edge of `parent` labelled `ch` without creating it.
    fn child(&self, parent: NodeId, ch: char) -> StoreResult<Option<Edge>> {
        Ok(self
            .children_of(parent)?
            .into_iter()
            .find(|(c, _, _)| *c == ch)
            .map(|(_, target, weight)| Edge { target, weight }))
    }

    /// Detaches a childless, non-terminal node from its parent.
    ///
    /// Only used to undo node creation when a write scope is rolled back.
    fn discard(&mut self, parent: NodeId, child: NodeId) -> StoreResult<()>;

    /// Number of nodes held, including the root.
    fn node_count(&self) -> StoreResult<usize>;

    /// Drops every node except the root.
    fn reset(&mut self) -> StoreResult<()>;
}

/// One arena slot: the node and its outgoing edges.
#[derive(Debug, Clone)]
struct Slot {
    node: TrieNode,
    children: FnvHashMap<char, Edge>,
}

impl Slot {
    fn new(node: TrieNode) -> Self {
        Self {
            node,
            children: FnvHashMap::default(),
        }
    }
}

/// In-memory arena backend.
///
/// Slots freed by [`NodeStore::discard`] are recycled through a free list, so
/// handles stay small and dense.
#[derive(Debug, Clone)]
pub struct ArenaStore {
    slots: Vec<Option<Slot>>,
    free_list: Vec<usize>,
    live: usize,
}

impl ArenaStore {
    /// Creates a store holding only the root.
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Slot::new(TrieNode::root()))],
            free_list: Vec::new(),
            live: 1,
        }
    }

    fn slot(&self, id: NodeId) -> StoreResult<&Slot> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(StorageError::NodeNotFound(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> StoreResult<&mut Slot> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(StorageError::NodeNotFound(id))
    }

    fn allocate(&mut self, ch: char) -> NodeId {
        self.live += 1;
        match self.free_list.pop() {
            Some(idx) => {
                let id = NodeId(idx);
                self.slots[idx] = Some(Slot::new(TrieNode::new(id, ch)));
                id
            }
            None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Some(Slot::new(TrieNode::new(id, ch))));
                id
            }
        }
    }
}

impl Default for ArenaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore for ArenaStore {
    fn get_or_create(&mut self, parent: NodeId, ch: char) -> StoreResult<NodeId> {
        if let Some(edge) = self.slot(parent)?.children.get(&ch) {
            return Ok(edge.target);
        }

        let id = self.allocate(ch);
        self.slot_mut(parent)?.children.insert(
            ch,
            Edge {
                target: id,
                weight: 0.0,
            },
        );
        Ok(id)
    }

    fn get(&self, id: NodeId) -> StoreResult<Option<TrieNode>> {
        Ok(self
            .slots
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|slot| slot.node.clone()))
    }

    fn set_edge_weight(
        &mut self,
        parent: NodeId,
        child: NodeId,
        weight: Weight,
    ) -> StoreResult<()> {
        let ch = self
            .slots
            .get(child.0)
            .and_then(Option::as_ref)
            .and_then(|slot| slot.node.ch);
        let children = &mut self.slot_mut(parent)?.children;
        let edge = match ch {
            Some(ch) => children.get_mut(&ch),
            None => None,
        }
        .filter(|edge| edge.target == child)
            .ok_or(StorageError::EdgeNotFound { parent, child })?;
        edge.weight = weight;
        Ok(())
    }

    fn mark_end(&mut self, id: NodeId, word: &str) -> StoreResult<()> {
        if id.is_root() {
            return Err(StorageError::Backend(
                "the root cannot terminate a word".to_string(),
            ));
        }
        self.slot_mut(id)?.node.mark_end(word);
        Ok(())
    }

    fn clear_end(&mut self, id: NodeId) -> StoreResult<()> {
        self.slot_mut(id)?.node.clear_end();
        Ok(())
    }

    fn children_of(&self, id: NodeId) -> StoreResult<Vec<(char, NodeId, Weight)>> {
        Ok(self
            .slot(id)?
            .children
            .iter()
            .map(|(&ch, edge)| (ch, edge.target, edge.weight))
            .collect())
    }

    fn child(&self, parent: NodeId, ch: char) -> StoreResult<Option<Edge>> {
        Ok(self.slot(parent)?.children.get(&ch).copied())
    }

    fn discard(&mut self, parent: NodeId, child: NodeId) -> StoreResult<()> {
        let slot = self.slot(child)?;
        if child.is_root() || slot.node.is_end || !slot.children.is_empty() {
            return Err(StorageError::NotDiscardable(child));
        }
        let ch = slot.node.ch.ok_or(StorageError::NotDiscardable(child))?;

        let siblings = &mut self.slot_mut(parent)?.children;
        if siblings.get(&ch).map(|edge| edge.target) != Some(child) {
            return Err(StorageError::EdgeNotFound { parent, child });
        }
        siblings.remove(&ch);

        self.slots[child.0] = None;
        self.free_list.push(child.0);
        self.live -= 1;
        Ok(())
    }

    fn node_count(&self) -> StoreResult<usize> {
        Ok(self.live)
    }

    fn reset(&mut self) -> StoreResult<()> {
        *self = Self::new();
        Ok(())
    }
}
