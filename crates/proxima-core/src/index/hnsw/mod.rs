//! HNSW (Hierarchical Navigable Small World) index implementation.
//!
//! Approximate nearest-neighbor search over a multi-layer proximity graph:
//! upper layers are sparse long-range highways, layer 0 holds every node
//! with short-range edges.
//!
//! # Module Organization
//!
//! - `params`: construction parameters and presets
//! - `node`: per-node storage (vector, level, adjacency lists)
//! - `rng`: injectable level-assignment randomness
//! - `graph`: the core insert/search algorithms (unsynchronized)
//! - `index`: the public thread-safe [`HnswIndex`] handle

mod graph;
mod index;
mod node;
mod ordered_float;
mod params;
mod rng;

pub use index::{HnswIndex, IndexStats};
pub use node::{Node, NodeId};
pub use params::{HnswParams, DEFAULT_EF_SEARCH, MAX_LEVEL};
pub use rng::{LevelRng, Xorshift64};

#[cfg(test)]
mod params_tests;
#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod rng_tests;
