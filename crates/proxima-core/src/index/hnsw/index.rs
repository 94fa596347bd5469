//! Thread-safe HNSW index.
//!
//! [`HnswIndex`] is the public handle: one reader/writer lock around the
//! whole graph. Searches and stats take the lock in shared mode and run
//! concurrently; `add_vector` holds it exclusively from id allocation
//! through edge pruning, so a concurrent reader sees either the
//! pre-insertion or the post-insertion graph, never a half-linked node.
//!
//! All work under the lock is CPU-bound graph traversal; there is no I/O,
//! no cancellation, and no timeout. Callers wanting bounded latency bound
//! `ef` / `ef_construction` instead.

use super::graph::HnswGraph;
use super::node::NodeId;
use super::params::{HnswParams, DEFAULT_EF_SEARCH};
use super::rng::{LevelRng, Xorshift64};
use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of index shape, taken under the read lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of nodes in the index.
    pub node_count: usize,
    /// Total undirected edge count across all layers. Each bidirectional
    /// pair is counted once; the directed endpoint total is `2 * edge_count`.
    pub edge_count: usize,
    /// Average degree: edge endpoints per node across all layers.
    pub avg_degree: f64,
    /// Highest layer present in the graph.
    pub max_level: usize,
    /// Vector dimension, fixed at creation.
    pub dimension: usize,
    /// Distance metric, fixed at creation.
    pub metric: DistanceMetric,
}

/// A shared, long-lived, in-process ANN index over fixed-dimension `f32`
/// vectors.
pub struct HnswIndex {
    dimension: usize,
    metric: DistanceMetric,
    inner: RwLock<HnswGraph>,
}

// Manual impl: the graph holds a `Box<dyn LevelRng>`, which has no Debug.
impl fmt::Debug for HnswIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HnswIndex")
            .field("dimension", &self.dimension)
            .field("metric", &self.metric)
            .finish_non_exhaustive()
    }
}

impl HnswIndex {
    /// Creates an empty index with default construction parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `dimension` is zero.
    pub fn new(dimension: usize, metric: DistanceMetric) -> Result<Self> {
        Self::with_params(dimension, metric, HnswParams::default())
    }

    /// Creates an empty index with explicit construction parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `dimension` is zero.
    pub fn with_params(
        dimension: usize,
        metric: DistanceMetric,
        params: HnswParams,
    ) -> Result<Self> {
        Self::with_rng(dimension, metric, params, Box::new(Xorshift64::new()))
    }

    /// Creates an empty index with an injected level generator, so tests
    /// can seed determinism or script exact level assignments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `dimension` is zero.
    pub fn with_rng(
        dimension: usize,
        metric: DistanceMetric,
        params: HnswParams,
        rng: Box<dyn LevelRng>,
    ) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidArgument(
                "index dimension must be positive".to_string(),
            ));
        }
        Ok(Self {
            dimension,
            metric,
            inner: RwLock::new(HnswGraph::new(metric, params, rng)),
        })
    }

    /// Vector dimension, fixed at creation.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Distance metric, fixed at creation.
    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Number of vectors in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if no vector has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Adds a vector and returns its assigned node id.
    ///
    /// Takes the write lock for the full insertion; concurrent insertions
    /// are serialized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the vector length differs
    /// from the index dimension, or [`Error::DegenerateVector`] for a
    /// zero-norm vector under the cosine metric. A failed call leaves the
    /// index unchanged.
    pub fn add_vector(&self, vector: Vec<f32>) -> Result<NodeId> {
        self.check_vector(&vector)?;
        Ok(self.inner.write().insert(vector))
    }

    /// Searches for the `k` nearest neighbors with the default `ef` of
    /// [`DEFAULT_EF_SEARCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the query length differs
    /// from the index dimension, or [`Error::DegenerateVector`] for a
    /// zero-norm query under the cosine metric.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(NodeId, f32)>> {
        self.search_with_ef(query, k, DEFAULT_EF_SEARCH)
    }

    /// Searches for the `k` nearest neighbors with an explicit candidate
    /// pool width.
    ///
    /// Returns `(id, distance)` pairs ascending by distance, at most
    /// `min(k, len)` of them; an empty index yields an empty list. Passing
    /// `ef < k` degrades recall but is not an error.
    ///
    /// # Errors
    ///
    /// Same as [`HnswIndex::search`].
    pub fn search_with_ef(&self, query: &[f32], k: usize, ef: usize) -> Result<Vec<(NodeId, f32)>> {
        self.check_vector(query)?;
        Ok(self.inner.read().search(query, k, ef))
    }

    /// Reports the current shape of the graph.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let graph = self.inner.read();
        let node_count = graph.len();
        let edge_count = graph.edge_count();
        #[allow(clippy::cast_precision_loss)]
        let avg_degree = if node_count == 0 {
            0.0
        } else {
            (edge_count * 2) as f64 / node_count as f64
        };
        IndexStats {
            node_count,
            edge_count,
            avg_degree,
            max_level: graph.max_level(),
            dimension: self.dimension,
            metric: self.metric,
        }
    }

    /// Validates a caller-supplied vector before any lock is taken.
    fn check_vector(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        self.metric.check_vector(vector)
    }
}

#[cfg(test)]
impl HnswIndex {
    /// Test access to the graph under the read lock.
    pub(crate) fn read_graph(&self) -> parking_lot::RwLockReadGuard<'_, HnswGraph> {
        self.inner.read()
    }
}
