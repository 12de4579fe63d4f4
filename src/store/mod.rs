//! Vector store: one interaction vector per item, keyed by title.
//!
//! Row order is fixed at construction and defines the row numbering every
//! similarity index built from the store must share.
//!
//! # Examples
//!
//! ```
//! use bibliorec::store::VectorStore;
//!
//! let store = VectorStore::from_rows(
//!     vec!["Dune".to_string(), "Emma".to_string()],
//!     &[vec![5.0, 0.0, 3.0], vec![0.0, 4.0, 0.0]],
//! )
//! .expect("titles are unique and rows are uniform");
//!
//! let row = store.resolve("Emma").expect("present");
//! assert_eq!(row, 1);
//! assert_eq!(store.vector_at(row), &[0.0, 4.0, 0.0]);
//! assert_eq!(store.identity_at(row), "Emma");
//! ```

use crate::error::{BiblioError, Result};
use crate::primitives::Matrix;
use std::collections::HashMap;

/// Dense interaction vectors indexed by item identity.
#[derive(Debug, Clone)]
pub struct VectorStore {
    /// Identity per row
    identities: Vec<String>,
    /// Exact identity -> row lookup
    rows_by_identity: HashMap<String, usize>,
    /// One row per identity
    vectors: Matrix<f64>,
}

impl VectorStore {
    /// Build a store from identities and a matrix with one row per identity.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the row count differs from the identity count
    /// - `DuplicateIdentity` if an identity repeats
    pub fn new(identities: Vec<String>, vectors: Matrix<f64>) -> Result<Self> {
        if identities.len() != vectors.n_rows() {
            return Err(BiblioError::dimension_mismatch(
                identities.len(),
                vectors.n_rows(),
            ));
        }

        let mut rows_by_identity = HashMap::with_capacity(identities.len());
        for (row, identity) in identities.iter().enumerate() {
            if rows_by_identity.insert(identity.clone(), row).is_some() {
                return Err(BiblioError::DuplicateIdentity {
                    identity: identity.clone(),
                });
            }
        }

        Ok(Self {
            identities,
            rows_by_identity,
            vectors,
        })
    }

    /// Build a store from identities and per-row vectors.
    ///
    /// # Errors
    ///
    /// Same as [`VectorStore::new`], plus `DimensionMismatch` for ragged rows.
    pub fn from_rows(identities: Vec<String>, rows: &[Vec<f64>]) -> Result<Self> {
        let vectors = Matrix::from_rows(rows)?;
        Self::new(identities, vectors)
    }

    /// Exact-match lookup of an identity's row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the identity is not stored.
    pub fn resolve(&self, identity: &str) -> Result<usize> {
        self.rows_by_identity
            .get(identity)
            .copied()
            .ok_or_else(|| BiblioError::NotFound {
                identity: identity.to_string(),
            })
    }

    /// Vector stored at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` was not produced by this store.
    #[must_use]
    pub fn vector_at(&self, row: usize) -> &[f64] {
        self.vectors.row(row)
    }

    /// Identity stored at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` was not produced by this store.
    #[must_use]
    pub fn identity_at(&self, row: usize) -> &str {
        &self.identities[row]
    }

    /// Whether the identity is stored.
    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.rows_by_identity.contains_key(identity)
    }

    /// All identities in row order.
    #[must_use]
    pub fn identities(&self) -> &[String] {
        &self.identities
    }

    /// Underlying interaction matrix.
    #[must_use]
    pub fn vectors(&self) -> &Matrix<f64> {
        &self.vectors
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether the store holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Length shared by every vector.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.vectors.n_cols()
    }
}
