//! Exact nearest neighbor search by exhaustive scan.

use super::{check_query, Metric, Neighbor, NeighborIndex};
use crate::error::Result;
use crate::primitives::Matrix;
use crate::store::VectorStore;

/// Exact k-NN index.
///
/// Equal distances keep ascending row order, so results are deterministic.
///
/// # Examples
///
/// ```
/// use bibliorec::index::{BruteForceIndex, Metric, NeighborIndex};
/// use bibliorec::primitives::Matrix;
///
/// let vectors = Matrix::from_rows(&[vec![0.0], vec![10.0], vec![1.0]]).expect("uniform rows");
/// let index = BruteForceIndex::new(vectors, Metric::Euclidean);
///
/// let rows: Vec<usize> = index
///     .query(&[0.0], 3)
///     .expect("k <= len")
///     .iter()
///     .map(|n| n.row)
///     .collect();
/// assert_eq!(rows, vec![0, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct BruteForceIndex {
    vectors: Matrix<f64>,
    metric: Metric,
}

impl BruteForceIndex {
    /// Index the given rows as-is.
    #[must_use]
    pub fn new(vectors: Matrix<f64>, metric: Metric) -> Self {
        Self { vectors, metric }
    }

    /// Index every row of a vector store, keeping its row numbering.
    #[must_use]
    pub fn from_store(store: &VectorStore, metric: Metric) -> Self {
        Self::new(store.vectors().clone(), metric)
    }

    /// Metric used for distances.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }
}

impl NeighborIndex for BruteForceIndex {
    fn len(&self) -> usize {
        self.vectors.n_rows()
    }

    fn dimensions(&self) -> usize {
        self.vectors.n_cols()
    }

    fn row_vector(&self, row: usize) -> Option<&[f64]> {
        self.vectors.try_row(row)
    }

    fn query(&self, vector: &[f64], k: usize) -> Result<Vec<Neighbor>> {
        check_query(self.len(), self.dimensions(), vector, k)?;

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .rows()
            .enumerate()
            .map(|(row, candidate)| Neighbor {
                row,
                distance: self.metric.distance(vector, candidate),
            })
            .collect();

        // Stable sort keeps row order among equal distances.
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(k);
        Ok(neighbors)
    }
}
