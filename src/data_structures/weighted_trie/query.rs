// Copyright (c) 2025 Weighted Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Read-only traversals: exact match, prefix enumeration and ranking.
//!
//! Weights reported here are always measured from the root, even when the
//! traversal itself starts below it.

use std::cmp::Ordering;

use super::error::{StorageError, StoreResult};
use super::node::{NodeId, SearchHit, TrieNode, Weight};
use super::resolver::{path_weight, terminal, walk};
use super::store::NodeStore;

fn fetch<S: NodeStore + ?Sized>(store: &S, id: NodeId) -> StoreResult<TrieNode> {
    store.get(id)?.ok_or(StorageError::NodeNotFound(id))
}

/// Looks up `word` exactly. Prefixes of stored words do not match.
pub(crate) fn exact<S: NodeStore + ?Sized>(store: &S, word: &str) -> StoreResult<Option<SearchHit>> {
    let Some(path) = walk(store, word)? else {
        return Ok(None);
    };

    let node = fetch(store, terminal(&path))?;
    if node.is_end && node.word.as_deref() == Some(word) {
        Ok(Some(SearchHit {
            node,
            total_weight: path_weight(&path),
        }))
    } else {
        Ok(None)
    }
}

/// Collects every end-of-word node at or below the node reached by `prefix`,
/// ranked by [`rank`].
pub(crate) fn with_prefix<S: NodeStore + ?Sized>(
    store: &S,
    prefix: &str,
) -> StoreResult<Vec<SearchHit>> {
    let Some(path) = walk(store, prefix)? else {
        return Ok(Vec::new());
    };

    let mut hits = Vec::new();
    let mut stack: Vec<(NodeId, Weight)> = vec![(terminal(&path), path_weight(&path))];
    while let Some((id, total_weight)) = stack.pop() {
        let node = fetch(store, id)?;
        if node.is_end {
            hits.push(SearchHit { node, total_weight });
        }
        for (_, child, weight) in store.children_of(id)? {
            stack.push((child, total_weight + weight));
        }
    }

    rank(&mut hits);
    Ok(hits)
}

/// Counts end-of-word nodes in the whole trie.
pub(crate) fn count_words<S: NodeStore + ?Sized>(store: &S) -> StoreResult<usize> {
    let mut count = 0;
    let mut stack = vec![NodeId::ROOT];
    while let Some(id) = stack.pop() {
        if fetch(store, id)?.is_end {
            count += 1;
        }
        stack.extend(store.children_of(id)?.into_iter().map(|(_, child, _)| child));
    }
    Ok(count)
}

/// Orders hits by cumulative weight, heaviest first. Equal weights are
/// ordered by word so listings are deterministic.
pub(crate) fn rank(hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| match b.total_weight.total_cmp(&a.total_weight) {
        Ordering::Equal => a.word().cmp(&b.word()),
        other => other,
    });
}
