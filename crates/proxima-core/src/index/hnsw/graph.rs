//! HNSW graph structure and algorithms.
//!
//! Implements the hierarchical navigable small world graph described in the
//! Malkov & Yashunin paper: a stack of proximity graphs where upper layers
//! are sparse long-range highways and layer 0 contains every node.
//!
//! This type is deliberately not thread-safe; [`super::HnswIndex`] wraps it
//! in a reader/writer lock so searches share the graph while insertions get
//! exclusive access.

use super::node::{Node, NodeId};
use super::ordered_float::OrderedFloat;
use super::params::{HnswParams, MAX_LEVEL};
use super::rng::LevelRng;
use crate::distance::DistanceMetric;
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The mutable graph state guarded by the index lock.
pub(crate) struct HnswGraph {
    /// Distance metric, fixed at construction.
    metric: DistanceMetric,
    /// Construction parameters, fixed at construction.
    params: HnswParams,
    /// Level-assignment multiplier (1 / ln 2).
    level_multiplier: f64,
    /// Node store: arena indexed by `NodeId`. Append-only.
    nodes: Vec<Node>,
    /// Node with the highest level seen so far. Ties go to the first node
    /// that reached that level.
    entry_point: Option<NodeId>,
    /// Level generator, injectable for deterministic tests.
    rng: Box<dyn LevelRng>,
}

impl HnswGraph {
    pub(crate) fn new(metric: DistanceMetric, params: HnswParams, rng: Box<dyn LevelRng>) -> Self {
        Self {
            metric,
            params,
            level_multiplier: HnswParams::level_multiplier(),
            nodes: Vec::new(),
            entry_point: None,
            rng,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a vector, wiring it into every layer up to its drawn level.
    ///
    /// The caller has already validated dimension and metric constraints;
    /// once this method starts, the insertion always commits.
    pub(crate) fn insert(&mut self, vector: Vec<f32>) -> NodeId {
        let id = self.nodes.len();
        let level = self.rng.next_level(self.level_multiplier, MAX_LEVEL);
        self.nodes.push(Node::new(vector, level));

        let Some(ep) = self.entry_point else {
            // First node: entry point regardless of level.
            self.entry_point = Some(id);
            return id;
        };

        // The query borrow would alias the arena during linking, so work on
        // an owned copy of the new vector.
        let query = self.nodes[id].vector().to_vec();
        let ep_level = self.nodes[ep].level();

        // Coarse descent through layers above the new node's level: a
        // single-result greedy walk localizes the insertion point.
        let mut current = ep;
        for layer in (level + 1..=ep_level).rev() {
            current = self.greedy_closest(&query, current, layer);
        }

        // Link the node into each layer it participates in, top down.
        for layer in (0..=level.min(ep_level)).rev() {
            let candidates =
                self.search_layer(&query, &[current], self.params.ef_construction, layer);

            let cap = self.degree_cap(layer);
            // Nearest-first selection: candidates are already ascending.
            let selected: Vec<NodeId> =
                candidates.iter().take(cap).map(|&(n, _)| n).collect();

            *self.nodes[id].neighbors_mut(layer) = selected.clone();
            for &neighbor in &selected {
                self.link(neighbor, id, layer);
            }

            // Best candidate found here seeds the beam on the layer below.
            if let Some(&(closest, _)) = candidates.first() {
                current = closest;
            }
        }

        // A strictly higher level takes over as entry point; on ties the
        // first node to reach that level keeps it.
        if level > ep_level {
            self.entry_point = Some(id);
        }

        id
    }

    /// Searches for the `k` nearest neighbors of `query`.
    ///
    /// Returns `(id, distance)` pairs ascending by distance, at most
    /// `min(k, len)` of them. An `ef` below `k` degrades recall but is
    /// accepted.
    pub(crate) fn search(&self, query: &[f32], k: usize, ef: usize) -> Vec<(NodeId, f32)> {
        let Some(ep) = self.entry_point else {
            return Vec::new();
        };

        let mut current = ep;
        for layer in (1..=self.nodes[ep].level()).rev() {
            current = self.greedy_closest(query, current, layer);
        }

        let candidates = self.search_layer(query, &[current], ef.max(k), 0);
        candidates.into_iter().take(k).collect()
    }

    /// Entry point id, if any node has been inserted.
    pub(crate) fn entry_point(&self) -> Option<NodeId> {
        self.entry_point
    }

    /// Total undirected edge count across all layers.
    ///
    /// Every edge is bidirectional, so each symmetric pair is counted once;
    /// the directed endpoint total is twice this number.
    pub(crate) fn edge_count(&self) -> usize {
        let endpoints: usize = self
            .nodes
            .iter()
            .map(|node| (0..=node.level()).map(|l| node.degree(l)).sum::<usize>())
            .sum();
        endpoints / 2
    }

    /// Highest level present in the graph (the entry point's level).
    pub(crate) fn max_level(&self) -> usize {
        self.entry_point.map_or(0, |ep| self.nodes[ep].level())
    }

    fn degree_cap(&self, layer: usize) -> usize {
        if layer == 0 {
            self.params.m0()
        } else {
            self.params.m
        }
    }

    fn distance(&self, query: &[f32], node: NodeId) -> f32 {
        self.metric.calculate(query, self.nodes[node].vector())
    }

    /// Single-result greedy walk at one layer: follow the locally best edge
    /// until no neighbor improves on the current node.
    fn greedy_closest(&self, query: &[f32], entry: NodeId, layer: usize) -> NodeId {
        let mut best = entry;
        let mut best_dist = self.distance(query, best);

        loop {
            let mut improved = false;
            for &neighbor in self.nodes[best].neighbors(layer) {
                let dist = self.distance(query, neighbor);
                if dist < best_dist {
                    best = neighbor;
                    best_dist = dist;
                    improved = true;
                }
            }
            if !improved {
                return best;
            }
        }
    }

    /// Bounded beam search at one layer.
    ///
    /// Dual-queue discipline: a min-heap frontier of nodes to explore and a
    /// bounded max-heap of current best results. The search stops when the
    /// closest unexplored node cannot beat the worst retained result, which
    /// is what makes the traversal sub-linear. A fragmented layer simply
    /// yields whatever was reachable; that is never an error.
    fn search_layer(
        &self,
        query: &[f32],
        entry_points: &[NodeId],
        num_closest: usize,
        layer: usize,
    ) -> Vec<(NodeId, f32)> {
        let capacity = num_closest.max(1);

        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut frontier: BinaryHeap<Reverse<(OrderedFloat, NodeId)>> = BinaryHeap::new();
        let mut results: BinaryHeap<(OrderedFloat, NodeId)> = BinaryHeap::new();

        for &ep in entry_points {
            if visited.insert(ep) {
                let dist = self.distance(query, ep);
                frontier.push(Reverse((OrderedFloat(dist), ep)));
                results.push((OrderedFloat(dist), ep));
            }
        }

        while let Some(Reverse((OrderedFloat(dist), node))) = frontier.pop() {
            let furthest = results.peek().map_or(f32::MAX, |r| (r.0).0);
            if dist > furthest && results.len() >= capacity {
                break;
            }

            for &neighbor in self.nodes[node].neighbors(layer) {
                if !visited.insert(neighbor) {
                    continue;
                }
                let dist = self.distance(query, neighbor);
                let furthest = results.peek().map_or(f32::MAX, |r| (r.0).0);

                if results.len() < capacity || dist < furthest {
                    frontier.push(Reverse((OrderedFloat(dist), neighbor)));
                    results.push((OrderedFloat(dist), neighbor));
                    if results.len() > capacity {
                        results.pop();
                    }
                }
            }
        }

        results
            .into_sorted_vec()
            .into_iter()
            .map(|(d, n)| (n, d.0))
            .collect()
    }

    /// Adds the reverse edge `node -> new_neighbor` at `layer`, pruning
    /// `node` back to its degree cap if the edge pushed it over.
    ///
    /// Pruning recomputes distances from `node` to all its connections,
    /// keeps the closest `cap`, and also removes the back-edges of dropped
    /// neighbors so every edge stays bidirectional.
    fn link(&mut self, node: NodeId, new_neighbor: NodeId, layer: usize) {
        self.nodes[node].neighbors_mut(layer).push(new_neighbor);

        let cap = self.degree_cap(layer);
        if self.nodes[node].degree(layer) <= cap {
            return;
        }

        let mut with_dist: Vec<(NodeId, f32)> = self.nodes[node]
            .neighbors(layer)
            .iter()
            .map(|&n| {
                (
                    n,
                    self.metric
                        .calculate(self.nodes[node].vector(), self.nodes[n].vector()),
                )
            })
            .collect();
        with_dist.sort_by(|a, b| a.1.total_cmp(&b.1));

        let kept: Vec<NodeId> = with_dist.iter().take(cap).map(|&(n, _)| n).collect();
        for &(dropped, _) in &with_dist[cap..] {
            let back = self.nodes[dropped].neighbors_mut(layer);
            if let Some(pos) = back.iter().position(|&n| n == node) {
                back.swap_remove(pos);
            }
        }
        *self.nodes[node].neighbors_mut(layer) = kept;
    }
}

#[cfg(test)]
impl HnswGraph {
    /// Test access to the node store for invariant checks.
    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// True if every edge is present in both directions at every layer.
    pub(crate) fn edges_are_symmetric(&self) -> bool {
        self.nodes.iter().enumerate().all(|(id, node)| {
            (0..=node.level()).all(|layer| {
                node.neighbors(layer)
                    .iter()
                    .all(|&n| self.nodes[n].neighbors(layer).contains(&id))
            })
        })
    }

    /// True if no adjacency list exceeds its layer's degree cap.
    pub(crate) fn degrees_within_caps(&self) -> bool {
        self.nodes.iter().all(|node| {
            (0..=node.level()).all(|layer| node.degree(layer) <= self.degree_cap(layer))
        })
    }
}
