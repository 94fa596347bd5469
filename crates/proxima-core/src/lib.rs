//! # Proxima Core
//!
//! An embedded HNSW (Hierarchical Navigable Small World) vector index for
//! approximate nearest-neighbor search.
//!
//! ## Features
//!
//! - **HNSW graph index**: probabilistic multi-layer construction with
//!   logarithmic expected search depth
//! - **2 distance metrics**: Euclidean and cosine, with explicit SIMD kernels
//! - **Concurrent**: any number of parallel searches, serialized insertions,
//!   no reader ever observes a half-linked node
//! - **Deterministic testing**: injectable level-assignment randomness
//!
//! ## Quick Start
//!
//! ```rust
//! use proxima_core::{DistanceMetric, Registry};
//!
//! let registry = Registry::new();
//! registry.create_index("documents", 4, DistanceMetric::Euclidean)?;
//!
//! let id = registry.add_vector("documents", vec![0.1, 0.2, 0.3, 0.4])?;
//! let hits = registry.search("documents", &[0.1, 0.2, 0.3, 0.4], 1, None)?;
//! assert_eq!(hits[0].0, id);
//! # Ok::<(), proxima_core::Error>(())
//! ```
//!
//! The registry is the named-handle surface a binding layer exposes; for a
//! single embedded index, [`HnswIndex`] can be used directly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod distance;
#[cfg(test)]
mod distance_tests;
pub mod error;
pub mod index;
pub mod simd;

pub use config::{
    ConfigError, HnswConfig, LimitsConfig, LoggingConfig, ProximaConfig, SearchConfig,
};
pub use distance::DistanceMetric;
pub use error::{Error, Result};
pub use index::{
    HnswIndex, HnswParams, IndexStats, LevelRng, NodeId, Xorshift64, DEFAULT_EF_SEARCH, MAX_LEVEL,
};

use std::collections::HashMap;
use std::sync::Arc;

/// Registry of named indexes.
///
/// This is the embedding surface for a host service: every operation takes
/// an index name and fails with [`Error::IndexNotFound`] when the name is
/// not registered. Handles are `Arc`-shared, so a host can also grab an
/// index once via [`Registry::get_index`] and call it directly.
pub struct Registry {
    /// Indexes managed by this registry.
    indexes: parking_lot::RwLock<HashMap<String, Arc<HnswIndex>>>,
    /// Construction parameters for newly created indexes.
    default_params: HnswParams,
    /// `ef` used by [`Registry::search`] when the caller passes `None`.
    default_ef: usize,
    /// Upper bound on `k` per search.
    max_results: usize,
    /// Upper bound on accepted dimensions.
    max_dimensions: usize,
    /// Upper bound on the number of registered indexes.
    max_indexes: usize,
}

impl Registry {
    /// Creates a registry with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&ProximaConfig::default())
    }

    /// Creates a registry from a loaded configuration.
    #[must_use]
    pub fn with_config(config: &ProximaConfig) -> Self {
        Self {
            indexes: parking_lot::RwLock::new(HashMap::new()),
            default_params: config.hnsw_params(),
            default_ef: config.search.default_ef,
            max_results: config.search.max_results,
            max_dimensions: config.limits.max_dimensions,
            max_indexes: config.limits.max_indexes,
        }
    }

    /// Creates a new empty index with the registry's default parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] on a non-positive or oversized
    /// dimension, and [`Error::IndexExists`] if the name is taken.
    pub fn create_index(
        &self,
        name: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Result<Arc<HnswIndex>> {
        self.create_index_with_params(name, dimension, metric, self.default_params)
    }

    /// Creates a new empty index with explicit construction parameters.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::create_index`].
    pub fn create_index_with_params(
        &self,
        name: &str,
        dimension: usize,
        metric: DistanceMetric,
        params: HnswParams,
    ) -> Result<Arc<HnswIndex>> {
        if dimension > self.max_dimensions {
            return Err(Error::InvalidArgument(format!(
                "dimension {dimension} exceeds the configured maximum {}",
                self.max_dimensions
            )));
        }

        let mut indexes = self.indexes.write();
        if indexes.contains_key(name) {
            return Err(Error::IndexExists(name.to_string()));
        }
        if indexes.len() >= self.max_indexes {
            return Err(Error::InvalidArgument(format!(
                "registry is full ({} indexes)",
                self.max_indexes
            )));
        }

        let index = Arc::new(HnswIndex::with_params(dimension, metric, params)?);
        indexes.insert(name.to_string(), Arc::clone(&index));
        tracing::info!(name, dimension, %metric, "created index");
        Ok(index)
    }

    /// Gets a handle to an index by name, or `None` if it does not exist.
    #[must_use]
    pub fn get_index(&self, name: &str) -> Option<Arc<HnswIndex>> {
        self.indexes.read().get(name).cloned()
    }

    /// Lists all registered index names.
    #[must_use]
    pub fn list_indexes(&self) -> Vec<String> {
        self.indexes.read().keys().cloned().collect()
    }

    /// Removes an index from the registry. Existing `Arc` handles stay
    /// valid until dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexNotFound`] if the name is not registered.
    pub fn drop_index(&self, name: &str) -> Result<()> {
        if self.indexes.write().remove(name).is_none() {
            return Err(Error::IndexNotFound(name.to_string()));
        }
        tracing::info!(name, "dropped index");
        Ok(())
    }

    /// Adds a vector to a named index and returns its node id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexNotFound`], [`Error::DimensionMismatch`], or
    /// [`Error::DegenerateVector`].
    pub fn add_vector(&self, name: &str, vector: Vec<f32>) -> Result<NodeId> {
        self.index(name)?.add_vector(vector)
    }

    /// Searches a named index for the `k` nearest neighbors of `query`.
    ///
    /// `ef` defaults to the configured `search.default_ef` when `None`, and
    /// `k` is clamped to the configured `search.max_results`; any `k` is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexNotFound`], [`Error::DimensionMismatch`], or
    /// [`Error::DegenerateVector`].
    pub fn search(
        &self,
        name: &str,
        query: &[f32],
        k: usize,
        ef: Option<usize>,
    ) -> Result<Vec<(NodeId, f32)>> {
        self.index(name)?.search_with_ef(
            query,
            k.min(self.max_results),
            ef.unwrap_or(self.default_ef),
        )
    }

    /// Reports the shape of a named index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexNotFound`] if the name is not registered.
    pub fn stats(&self, name: &str) -> Result<IndexStats> {
        Ok(self.index(name)?.stats())
    }

    fn index(&self, name: &str) -> Result<Arc<HnswIndex>> {
        self.indexes
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::IndexNotFound(name.to_string()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
