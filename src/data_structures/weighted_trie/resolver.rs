// Copyright (c) 2025 Weighted Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Path resolution: walking and building the node chain for a word.

use super::error::StoreResult;
use super::node::{Edge, NodeId, Weight};
use super::scope::WriteScope;
use super::store::NodeStore;

/// Builds the path for `word`, writing `weight` onto every edge along it, and
/// marks the last node as the end of `word`.
///
/// Existing nodes are reused and their edge weights overwritten, never summed.
/// Returns `true` if the terminal node did not already carry a word.
pub(crate) fn insert_path<S: NodeStore>(
    scope: &mut WriteScope<'_, S>,
    word: &str,
    weight: Weight,
) -> StoreResult<bool> {
    let mut current = NodeId::ROOT;
    for ch in word.chars() {
        let next = scope.get_or_create(current, ch)?;
        scope.set_edge_weight(current, next, weight)?;
        current = next;
    }

    let was_end = scope.get(current)?.is_some_and(|node| node.is_end);
    scope.mark_end(current, word)?;
    Ok(!was_end)
}

/// Follows `word` from the root without creating anything.
///
/// Returns the edges traversed in root-to-node order, or `None` if some
/// character has no matching child. An empty word yields an empty path that
/// ends at the root.
pub(crate) fn walk<S: NodeStore + ?Sized>(store: &S, word: &str) -> StoreResult<Option<Vec<Edge>>> {
    let mut current = NodeId::ROOT;
    let mut path = Vec::with_capacity(word.len());
    for ch in word.chars() {
        match store.child(current, ch)? {
            Some(edge) => {
                current = edge.target;
                path.push(edge);
            }
            None => return Ok(None),
        }
    }
    Ok(Some(path))
}

/// Node at the end of a walked path.
pub(crate) fn terminal(path: &[Edge]) -> NodeId {
    path.last().map_or(NodeId::ROOT, |edge| edge.target)
}

/// Cumulative weight of a walked path.
pub(crate) fn path_weight(path: &[Edge]) -> Weight {
    path.iter().map(|edge| edge.weight).sum()
}
