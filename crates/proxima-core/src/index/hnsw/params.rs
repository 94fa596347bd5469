//! HNSW construction parameters.
//!
//! The parameters are fixed for the lifetime of an index: changing `m` after
//! construction would invalidate the degree caps already enforced on the
//! graph.

use serde::{Deserialize, Serialize};

/// Hard ceiling on the level drawn for any node, bounding per-node memory
/// regardless of how unlucky the geometric draw gets.
pub const MAX_LEVEL: usize = 16;

/// Default `ef` candidate-pool width used by `search` when the caller does
/// not pass one.
pub const DEFAULT_EF_SEARCH: usize = 50;

/// HNSW index parameters for tuning performance and recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnswParams {
    /// Target number of bidirectional links per node at layers >= 1
    /// (the M parameter). Higher = better recall, more memory, slower insert.
    pub m: usize,
    /// Candidate pool width during construction.
    /// Higher = better recall, slower indexing.
    pub ef_construction: usize,
}

impl Default for HnswParams {
    fn default() -> Self {
        Self {
            m: 16,
            ef_construction: 200,
        }
    }
}

impl HnswParams {
    /// Degree cap at layer 0, conventionally double `m`.
    #[must_use]
    pub const fn m0(&self) -> usize {
        self.m * 2
    }

    /// Level-assignment multiplier `1 / ln 2`, giving each successive layer
    /// half the expected population of the one below it. This constant
    /// determines the `O(log N)` expected search depth.
    #[must_use]
    pub fn level_multiplier() -> f64 {
        1.0 / std::f64::consts::LN_2
    }

    /// Creates parameters optimized for insertion speed.
    /// Lower recall but faster indexing. Best for small datasets (<10K).
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            m: 8,
            ef_construction: 100,
        }
    }

    /// Creates parameters optimized for high recall at the cost of slower
    /// insertion.
    #[must_use]
    pub const fn high_recall() -> Self {
        Self {
            m: 32,
            ef_construction: 400,
        }
    }

    /// Creates custom parameters.
    #[must_use]
    pub const fn custom(m: usize, ef_construction: usize) -> Self {
        Self { m, ef_construction }
    }
}
