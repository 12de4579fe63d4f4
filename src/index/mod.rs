//! Indexing data structures for nearest neighbor search.
//!
//! Every index is built once from a [`VectorStore`](crate::store::VectorStore)
//! and keeps the store's row numbering, so a returned [`Neighbor::row`] can be
//! translated back to an identity with
//! [`VectorStore::identity_at`](crate::store::VectorStore::identity_at).
//!
//! # Algorithms
//!
//! - **Brute force**: exact O(n) scan, ties kept in row order
//! - **HNSW** (Hierarchical Navigable Small World): O(log n) approximate search
//!
//! # Quick Start
//!
//! ```
//! use bibliorec::index::{BruteForceIndex, Metric, NeighborIndex};
//! use bibliorec::store::VectorStore;
//!
//! let store = VectorStore::from_rows(
//!     vec!["a".into(), "b".into(), "c".into()],
//!     &[vec![1.0, 0.0], vec![0.0, 1.0], vec![0.9, 0.1]],
//! )
//! .expect("valid store");
//! let index = BruteForceIndex::from_store(&store, Metric::Euclidean);
//!
//! let neighbors = index.query(store.vector_at(0), 2).expect("index holds 3 rows");
//! assert_eq!(neighbors[0].row, 0); // self-match
//! assert_eq!(neighbors[1].row, 2);
//! assert!(neighbors[0].distance <= neighbors[1].distance);
//! ```

mod brute;
pub mod hnsw;
mod metric;

pub use brute::BruteForceIndex;
pub use hnsw::HnswIndex;
pub use metric::Metric;

use crate::error::{BiblioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One k-NN result: a store row and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row in the vector store the index was built from
    pub row: usize,
    /// Distance under the index's metric
    pub distance: f64,
}

/// Read-only k-nearest-neighbor index over a vector store.
///
/// Implementations are immutable after construction and shared across threads.
pub trait NeighborIndex: Send + Sync {
    /// Number of indexed rows.
    fn len(&self) -> usize;

    /// Whether the index holds no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of every indexed vector.
    fn dimensions(&self) -> usize;

    /// Vector the index holds for `row`, if it exposes its training data.
    ///
    /// Used to check row correspondence with a vector store at load time.
    fn row_vector(&self, row: usize) -> Option<&[f64]>;

    /// Return exactly `k` neighbors of `vector`, closest first.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` if `k` exceeds [`NeighborIndex::len`]
    /// - `DimensionMismatch` if `vector` has the wrong length
    fn query(&self, vector: &[f64], k: usize) -> Result<Vec<Neighbor>>;
}

/// Which index implementation to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Exact scan
    #[default]
    Brute,
    /// Hierarchical navigable small world graph
    Hnsw,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Brute => write!(f, "brute"),
            IndexKind::Hnsw => write!(f, "hnsw"),
        }
    }
}

impl FromStr for IndexKind {
    type Err = BiblioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "brute" | "exact" => Ok(IndexKind::Brute),
            "hnsw" => Ok(IndexKind::Hnsw),
            other => Err(BiblioError::invalid_config("index", other, "brute or hnsw")),
        }
    }
}

/// Shared argument checks for [`NeighborIndex::query`].
pub(crate) fn check_query(len: usize, dimensions: usize, vector: &[f64], k: usize) -> Result<()> {
    if k > len {
        return Err(BiblioError::InsufficientData {
            requested: k,
            available: len,
        });
    }
    if len > 0 && vector.len() != dimensions {
        return Err(BiblioError::dimension_mismatch(dimensions, vector.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_kind_parse() {
        assert_eq!("brute".parse::<IndexKind>().expect("valid"), IndexKind::Brute);
        assert_eq!("HNSW".parse::<IndexKind>().expect("valid"), IndexKind::Hnsw);
        assert!("kdtree".parse::<IndexKind>().is_err());
    }

    #[test]
    fn test_index_kind_display_round_trip() {
        for kind in [IndexKind::Brute, IndexKind::Hnsw] {
            assert_eq!(kind.to_string().parse::<IndexKind>().expect("valid"), kind);
        }
    }

    #[test]
    fn test_check_query_insufficient() {
        let err = check_query(3, 2, &[0.0, 0.0], 5).unwrap_err();
        assert!(matches!(
            err,
            BiblioError::InsufficientData {
                requested: 5,
                available: 3
            }
        ));
    }

    #[test]
    fn test_check_query_dimension() {
        let err = check_query(3, 2, &[0.0], 1).unwrap_err();
        assert!(matches!(err, BiblioError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_check_query_k_equals_len() {
        assert!(check_query(3, 2, &[0.0, 1.0], 3).is_ok());
    }
}
