//! Property tests for graph invariants.
//!
//! For arbitrary insert sequences, the graph must keep its structural
//! invariants: bounded degrees, bidirectional edges, ordered search output,
//! and bounded result cardinality.

use super::index::HnswIndex;
use super::params::HnswParams;
use super::rng::Xorshift64;
use crate::distance::DistanceMetric;
use proptest::prelude::*;

const DIM: usize = 4;

fn arb_vectors() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(
        prop::collection::vec(-100.0f32..100.0, DIM),
        1..50,
    )
}

fn build_index(vectors: &[Vec<f32>], m: usize, seed: u64) -> HnswIndex {
    let index = HnswIndex::with_rng(
        DIM,
        DistanceMetric::Euclidean,
        HnswParams::custom(m, 32),
        Box::new(Xorshift64::seeded(seed)),
    )
    .unwrap();
    for v in vectors {
        index.add_vector(v.clone()).unwrap();
    }
    index
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_degree_caps_and_symmetry(vectors in arb_vectors(), seed in 1u64..1000) {
        // m = 2 keeps pruning constantly active.
        let index = build_index(&vectors, 2, seed);

        let graph = index.read_graph();
        prop_assert!(graph.degrees_within_caps());
        prop_assert!(graph.edges_are_symmetric());
    }

    #[test]
    fn prop_search_ordered_and_bounded(
        vectors in arb_vectors(),
        query in prop::collection::vec(-100.0f32..100.0, DIM),
        k in 0usize..20,
    ) {
        let index = build_index(&vectors, 8, 42);

        let hits = index.search(&query, k).unwrap();
        prop_assert!(hits.len() <= k.min(vectors.len()));
        for pair in hits.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
        }
        for &(_, dist) in &hits {
            prop_assert!(dist >= 0.0);
        }
    }

    #[test]
    fn prop_inserted_vector_is_found(vectors in arb_vectors(), seed in 1u64..1000) {
        let index = build_index(&vectors, 8, seed);

        // The most recent insert must be findable with distance ~0.
        let last = vectors.last().unwrap();
        let hits = index.search(last, 1).unwrap();
        prop_assert!(!hits.is_empty());
        prop_assert!(hits[0].1 < 1e-3);
    }

    #[test]
    fn prop_node_count_matches_inserts(vectors in arb_vectors()) {
        let index = build_index(&vectors, 8, 7);
        prop_assert_eq!(index.len(), vectors.len());
        prop_assert_eq!(index.stats().node_count, vectors.len());
    }
}
