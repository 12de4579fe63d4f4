//! Hierarchical Navigable Small World (HNSW) index.
//!
//! HNSW is a graph-based approximate nearest neighbor search algorithm
//! achieving O(log n) query complexity with high recall.
//!
//! # Algorithm
//!
//! - Multi-layer graph structure (like skip lists)
//! - Each node connects to M neighbors per layer
//! - Top layers: sparse (navigation), bottom layer: dense (all elements)
//! - Search: greedy descent from top to bottom
//!
//! Layer assignment draws from a seeded RNG, so building the same rows with
//! the same seed yields the same graph.
//!
//! # References
//!
//! Malkov & Yashunin (2018). "Efficient and robust approximate nearest
//! neighbor search using Hierarchical Navigable Small World graphs."
//! IEEE TPAMI. <https://arxiv.org/abs/1603.09320>
//!
//! # Examples
//!
//! ```
//! use bibliorec::index::{HnswIndex, Metric, NeighborIndex};
//!
//! let mut index = HnswIndex::new(16, 200, 7, Metric::Cosine);
//!
//! index.add(&[1.0, 0.0, 0.0]).expect("first row sets dimensionality");
//! index.add(&[0.0, 1.0, 0.0]).expect("same dimensionality");
//! index.add(&[0.8, 0.2, 0.0]).expect("same dimensionality");
//!
//! let results = index.query(&[0.9, 0.1, 0.0], 2).expect("k <= len");
//! assert_eq!(results[0].row, 0); // Closest
//! ```

use super::{check_query, Metric, Neighbor, NeighborIndex};
use crate::error::{BiblioError, Result};
use crate::store::VectorStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Highest layer a node may be assigned to.
const MAX_LAYER: usize = 16;

/// Construction parameters for [`HnswIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HnswParams {
    /// Max connections per node (12-48 typical)
    pub m: usize,
    /// Candidate list size during construction (100-200 typical)
    pub ef_construction: usize,
    /// Seed for layer assignment
    pub seed: u64,
}

impl Default for HnswParams {
    fn default() -> Self {
        Self {
            m: 16,
            ef_construction: 200,
            seed: 42,
        }
    }
}

/// HNSW index for approximate nearest neighbor search.
///
/// # Configuration
///
/// - `m`: Max connections per node (typical: 12-48)
/// - `ef_construction`: Size of dynamic candidate list during construction (typical: 100-200)
/// - `ml`: Level multiplier for probabilistic layer assignment (1/ln(2))
#[derive(Debug, Clone)]
pub struct HnswIndex {
    /// Maximum number of connections per node
    m: usize,
    /// Maximum number of connections for layer 0 (2*M)
    max_m0: usize,
    /// Size of dynamic candidate list during construction
    ef_construction: usize,
    /// Level multiplier (1/ln(2) ≈ 1.44)
    ml: f64,
    /// Distance function
    metric: Metric,
    /// Dimensionality fixed by the first added vector
    dimensions: usize,
    /// All nodes in the graph; node index == store row
    nodes: Vec<Node>,
    /// Entry point (top layer node)
    entry_point: Option<usize>,
    /// Layer assignment RNG
    rng: StdRng,
}

/// Node in the HNSW graph.
#[derive(Debug, Clone)]
struct Node {
    /// Feature vector
    vector: Vec<f64>,
    /// Connections per layer (layer -> neighbor indices)
    connections: Vec<Vec<usize>>,
}

impl HnswIndex {
    /// Create an empty HNSW index.
    ///
    /// # Arguments
    ///
    /// * `m` - Maximum connections per node (12-48 recommended, at least 1)
    /// * `ef_construction` - Construction parameter (100-200 recommended)
    /// * `seed` - Random seed for layer assignment
    /// * `metric` - Distance function
    #[must_use]
    pub fn new(m: usize, ef_construction: usize, seed: u64, metric: Metric) -> Self {
        let m = m.max(1);
        Self {
            m,
            max_m0: 2 * m,
            ef_construction: ef_construction.max(1),
            ml: 1.0 / (2.0_f64).ln(), // 1/ln(2)
            metric,
            dimensions: 0,
            nodes: Vec::new(),
            entry_point: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build an index over every row of a vector store, in row order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibliorec::index::hnsw::{HnswIndex, HnswParams};
    /// use bibliorec::index::{Metric, NeighborIndex};
    /// use bibliorec::store::VectorStore;
    ///
    /// let store = VectorStore::from_rows(
    ///     vec!["a".into(), "b".into()],
    ///     &[vec![1.0, 0.0], vec![0.0, 1.0]],
    /// )
    /// .expect("valid store");
    /// let index = HnswIndex::from_store(&store, HnswParams::default(), Metric::Euclidean);
    /// assert_eq!(index.len(), 2);
    /// ```
    #[must_use]
    pub fn from_store(store: &VectorStore, params: HnswParams, metric: Metric) -> Self {
        let mut index = Self::new(params.m, params.ef_construction, params.seed, metric);
        index.dimensions = store.dimensions();
        for vector in store.vectors().rows() {
            index.insert(vector.to_vec());
        }
        index
    }

    /// Add a vector as the next row.
    ///
    /// Returns the row assigned to it.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the vector's length differs from the
    /// rows already indexed.
    pub fn add(&mut self, vector: &[f64]) -> Result<usize> {
        if self.nodes.is_empty() {
            self.dimensions = vector.len();
        } else if vector.len() != self.dimensions {
            return Err(BiblioError::dimension_mismatch(self.dimensions, vector.len()));
        }
        Ok(self.insert(vector.to_vec()))
    }

    /// Get the M parameter (max connections per node).
    #[must_use]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Get the `ef_construction` parameter.
    #[must_use]
    pub fn ef_construction(&self) -> usize {
        self.ef_construction
    }

    /// Metric used for distances.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    fn insert(&mut self, vector: Vec<f64>) -> usize {
        // Determine layer for this node
        let layer = self.random_layer();

        let node_idx = self.nodes.len();
        self.nodes.push(Node {
            vector,
            connections: vec![Vec::new(); layer + 1],
        });

        // If first node, set as entry point
        match self.entry_point {
            None => self.entry_point = Some(node_idx),
            Some(ep) => self.insert_node(ep, node_idx, layer),
        }
        node_idx
    }

    /// Randomly select layer for new node.
    ///
    /// Uses exponential decay: P(layer = l) ~ exp(-l / ml)
    fn random_layer(&mut self) -> usize {
        // (0, 1]: keeps ln finite
        let r: f64 = 1.0 - self.rng.gen::<f64>();
        ((-r.ln() * self.ml).floor() as usize).min(MAX_LAYER)
    }

    /// Insert node into the graph at specified layer.
    fn insert_node(&mut self, ep: usize, node_idx: usize, layer: usize) {
        let top_layer = self.nodes[ep].connections.len().saturating_sub(1);

        // Search from top to target layer
        let mut curr = ep;
        for lc in (layer + 1..=top_layer).rev() {
            curr = self
                .search_layer(&self.nodes[node_idx].vector, curr, 1, lc)
                .first()
                .map_or(curr, |&(idx, _)| idx);
        }

        // Insert at each layer from top down to 0
        for lc in (0..=layer.min(top_layer)).rev() {
            let candidates =
                self.search_layer(&self.nodes[node_idx].vector, curr, self.ef_construction, lc);

            // Select M nearest neighbors
            let m = if lc == 0 { self.max_m0 } else { self.m };
            let neighbors: Vec<usize> = candidates
                .into_iter()
                .map(|(idx, _)| idx)
                .filter(|&idx| idx != node_idx)
                .take(m)
                .collect();

            // Add bidirectional connections
            for &neighbor in &neighbors {
                self.nodes[node_idx].connections[lc].push(neighbor);

                // Only if neighbor has this layer
                if lc < self.nodes[neighbor].connections.len() {
                    self.nodes[neighbor].connections[lc].push(node_idx);
                    self.prune_connections(neighbor, lc, m);
                }
            }

            if let Some(&first) = neighbors.first() {
                curr = first;
            }
        }

        // Update entry point if new node has higher layer
        if layer > top_layer {
            self.entry_point = Some(node_idx);
        }
    }

    /// Search a single layer for the `ef` nodes nearest to `query`.
    ///
    /// Returns (node, distance) pairs sorted by ascending distance.
    fn search_layer(
        &self,
        query: &[f64],
        entry: usize,
        ef: usize,
        layer: usize,
    ) -> Vec<(usize, f64)> {
        let mut visited = HashSet::new();
        let entry_dist = self.metric.distance(query, &self.nodes[entry].vector);
        // Kept sorted descending so `pop` yields the closest candidate
        let mut candidates = vec![(entry, entry_dist)];
        let mut best = vec![(entry, entry_dist)];
        visited.insert(entry);

        while let Some((curr, curr_dist)) = candidates.pop() {
            let worst_best_dist = best.last().map_or(f64::INFINITY, |&(_, d)| d);

            // Stop if current is farther than worst in best
            if curr_dist > worst_best_dist && best.len() >= ef {
                break;
            }

            let Some(links) = self.nodes[curr].connections.get(layer) else {
                continue;
            };

            for &neighbor in links {
                if !visited.insert(neighbor) {
                    continue;
                }
                let neighbor_dist = self.metric.distance(query, &self.nodes[neighbor].vector);
                let worst = best.last().map_or(f64::INFINITY, |&(_, d)| d);

                if neighbor_dist < worst || best.len() < ef {
                    candidates.push((neighbor, neighbor_dist));
                    best.push((neighbor, neighbor_dist));

                    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
                    best.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

                    // Keep only ef best
                    best.truncate(ef);
                }
            }
        }

        best
    }

    /// Prune connections to maintain max M neighbors.
    fn prune_connections(&mut self, node_idx: usize, layer: usize, max_m: usize) {
        if self.nodes[node_idx].connections[layer].len() <= max_m {
            return;
        }

        let node_vec = &self.nodes[node_idx].vector;
        let mut neighbors: Vec<(usize, f64)> = self.nodes[node_idx].connections[layer]
            .iter()
            .map(|&neighbor| {
                let dist = self.metric.distance(node_vec, &self.nodes[neighbor].vector);
                (neighbor, dist)
            })
            .collect();

        neighbors.sort_by(|a, b| a.1.total_cmp(&b.1));

        // Keep only max_m closest
        self.nodes[node_idx].connections[layer] = neighbors
            .into_iter()
            .take(max_m)
            .map(|(idx, _)| idx)
            .collect();
    }

    /// Exact scan over every node.
    fn scan(&self, query: &[f64], k: usize) -> Vec<(usize, f64)> {
        let mut all: Vec<(usize, f64)> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (idx, self.metric.distance(query, &node.vector)))
            .collect();
        all.sort_by(|a, b| a.1.total_cmp(&b.1));
        all.truncate(k);
        all
    }
}

impl NeighborIndex for HnswIndex {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn row_vector(&self, row: usize) -> Option<&[f64]> {
        self.nodes.get(row).map(|node| node.vector.as_slice())
    }

    fn query(&self, vector: &[f64], k: usize) -> Result<Vec<Neighbor>> {
        check_query(self.len(), self.dimensions, vector, k)?;
        let Some(ep) = self.entry_point.filter(|_| k > 0) else {
            return Ok(Vec::new());
        };

        let top_layer = self.nodes[ep].connections.len().saturating_sub(1);

        // Search from top layer to layer 1
        let mut curr = ep;
        for lc in (1..=top_layer).rev() {
            curr = self
                .search_layer(vector, curr, 1, lc)
                .first()
                .map_or(curr, |&(idx, _)| idx);
        }

        // Search layer 0 with ef
        let mut found = self.search_layer(vector, curr, k.max(self.ef_construction), 0);
        if found.len() < k {
            // Graph walk could not reach k nodes
            found = self.scan(vector, k);
        }
        found.truncate(k);

        Ok(found
            .into_iter()
            .map(|(row, distance)| Neighbor { row, distance })
            .collect())
    }
}

#[cfg(test)]
#[path = "hnsw_tests.rs"]
mod tests;
