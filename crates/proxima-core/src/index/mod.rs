//! Index implementations.
//!
//! HNSW is the only index type in this crate; the module level exists so a
//! future flat/brute-force index can sit beside it.

pub mod hnsw;

pub use hnsw::{
    HnswIndex, HnswParams, IndexStats, LevelRng, Node, NodeId, Xorshift64, DEFAULT_EF_SEARCH,
    MAX_LEVEL,
};
