// Copyright (c) 2025 Weighted Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node and edge types for the Weighted Trie.
//!
//! Nodes are addressed by a [`NodeId`] handle into the owning store. Every
//! non-root node is reached from its parent through exactly one [`Edge`],
//! which carries the weight supplied when the edge was last written.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric weight carried by an edge. Valid weights are finite and non-negative.
pub type Weight = f64;

/// Returns `true` if `weight` may be stored on every edge of a word of up to
/// `max_word_length` characters.
///
/// The weight times the length limit must be finite, so the cumulative weight
/// of any root-to-node path stays finite.
pub fn is_valid_weight(weight: Weight, max_word_length: usize) -> bool {
    weight >= 0.0 && (weight * max_word_length as Weight).is_finite()
}

/// Stable handle of a node inside a [`NodeStore`](super::NodeStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Handle of the sentinel root node.
    pub const ROOT: NodeId = NodeId(0);

    /// Returns `true` for the sentinel root.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "root")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// A character position reached from the root along one path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrieNode {
    /// Handle of this node
    pub id: NodeId,

    /// Character this node represents (`None` only for the root)
    #[serde(rename = "char")]
    pub ch: Option<char>,

    /// Whether an inserted word terminates exactly here
    pub is_end: bool,

    /// The lowercased word terminating here, present iff `is_end`
    pub word: Option<String>,
}

impl TrieNode {
    /// Creates the sentinel root node.
    pub fn root() -> Self {
        Self {
            id: NodeId::ROOT,
            ch: None,
            is_end: false,
            word: None,
        }
    }

    /// Creates a fresh, non-terminal node for `ch`.
    pub fn new(id: NodeId, ch: char) -> Self {
        Self {
            id,
            ch: Some(ch),
            is_end: false,
            word: None,
        }
    }

    /// Sets the end-of-word marker.
    pub fn mark_end<W: Into<String>>(&mut self, word: W) {
        self.is_end = true;
        self.word = Some(word.into());
    }

    /// Clears the end-of-word marker, leaving the node in place.
    pub fn clear_end(&mut self) {
        self.is_end = false;
        self.word = None;
    }
}

/// Directed transition from a parent node to its character successor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Child node this edge leads to
    pub target: NodeId,

    /// Weight of the transition
    pub weight: Weight,
}

/// A node matched by a query, with its cumulative weight from the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matched node
    pub node: TrieNode,

    /// Sum of edge weights on the root-to-node path
    pub total_weight: Weight,
}

impl SearchHit {
    /// The word stored on the matched node, if any.
    pub fn word(&self) -> Option<&str> {
        self.node.word.as_deref()
    }
}

/// A stored word with its cumulative path weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordWeight {
    /// The lowercased word
    pub word: String,

    /// Sum of edge weights on the word's path
    pub weight: Weight,
}

impl From<SearchHit> for WordWeight {
    fn from(hit: SearchHit) -> Self {
        Self {
            word: hit.node.word.unwrap_or_default(),
            weight: hit.total_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_validity() {
        assert!(is_valid_weight(0.0, 128));
        assert!(is_valid_weight(2.5, 128));
        assert!(!is_valid_weight(-1.0, 128));
        assert!(!is_valid_weight(f64::NAN, 128));
        assert!(!is_valid_weight(f64::INFINITY, 128));
        assert!(!is_valid_weight(f64::INFINITY, 0));

        // Path totals must stay finite
        assert!(is_valid_weight(f64::MAX, 1));
        assert!(!is_valid_weight(f64::MAX, 2));
        assert!(is_valid_weight(f64::MAX / 128.0, 128));
        assert!(!is_valid_weight(f64::MAX / 2.0, 3));
    }

    #[test]
    fn test_end_marker_roundtrip() {
        let mut node = TrieNode::new(NodeId(3), 'p');
        assert!(!node.is_end);

        node.mark_end("app");
        assert!(node.is_end);
        assert_eq!(node.word.as_deref(), Some("app"));

        node.clear_end();
        assert!(!node.is_end);
        assert_eq!(node.word, None);
        assert_eq!(node.ch, Some('p'));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::ROOT.to_string(), "root");
        assert_eq!(NodeId(7).to_string(), "#7");
    }

    #[test]
    fn test_hit_serializes_char_field() {
        let mut node = TrieNode::new(NodeId(1), 'a');
        node.mark_end("a");
        let hit = SearchHit {
            node,
            total_weight: 2.0,
        };

        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["node"]["char"], "a");
        assert_eq!(json["node"]["id"], 1);
        assert_eq!(json["total_weight"], 2.0);
    }
}
