//! Graph node storage.
//!
//! Nodes reference each other only by [`NodeId`] into the central node store
//! (arena + index, not a pointer graph). Ids are assigned from a
//! monotonically increasing counter and never reused, so the arena index is
//! the id.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node, assigned at insertion and stable for the
/// lifetime of the index.
pub type NodeId = usize;

/// One inserted vector and its per-layer adjacency lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// The stored copy of the inserted vector. The index owns this copy.
    vector: Vec<f32>,
    /// Highest layer this node participates in, drawn once at insertion.
    level: usize,
    /// `connections[layer]` holds neighbor ids for each layer in
    /// `0..=level`. Edges are bidirectional at every layer.
    connections: Vec<Vec<NodeId>>,
}

impl Node {
    pub(crate) fn new(vector: Vec<f32>, level: usize) -> Self {
        Self {
            vector,
            level,
            connections: vec![Vec::new(); level + 1],
        }
    }

    /// The stored vector.
    #[must_use]
    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    /// Highest layer this node participates in.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Neighbor ids at `layer`; empty above this node's level.
    #[must_use]
    pub fn neighbors(&self, layer: usize) -> &[NodeId] {
        self.connections.get(layer).map_or(&[], Vec::as_slice)
    }

    /// Degree at `layer`.
    #[must_use]
    pub fn degree(&self, layer: usize) -> usize {
        self.neighbors(layer).len()
    }

    /// Mutable adjacency list at `layer`.
    ///
    /// # Panics
    ///
    /// Panics if `layer` exceeds this node's level; insertion only ever
    /// links a node at layers it participates in.
    pub(crate) fn neighbors_mut(&mut self, layer: usize) -> &mut Vec<NodeId> {
        &mut self.connections[layer]
    }
}
