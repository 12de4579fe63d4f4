//! Query-time recommendation engine.

use crate::catalog::MetadataCatalog;
use crate::config::{RecommendConfig, DEFAULT_MAX_RESULTS};
use crate::error::{BiblioError, Result};
use crate::index::{BruteForceIndex, HnswIndex, IndexKind, NeighborIndex};
use crate::store::VectorStore;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Author shown when the catalog has no record for a title.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One recommended item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Item identity
    pub title: String,
    /// Author, or [`UNKNOWN_AUTHOR`]
    pub author: String,
    /// Cover locator, if known
    pub cover: Option<String>,
    /// Distance to the query item under the index's metric
    pub distance: f64,
}

impl Recommendation {
    /// Cover locator, or `placeholder` when there is none.
    #[must_use]
    pub fn cover_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.cover.as_deref().unwrap_or(placeholder)
    }
}

/// Nearest-neighbor recommender over read-only, preloaded data.
///
/// Holds no mutable state; `recommend` only reads, so one instance can serve
/// queries from many threads.
pub struct Recommender {
    store: VectorStore,
    index: Box<dyn NeighborIndex>,
    catalog: MetadataCatalog,
    max_results: usize,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("items", &self.store.len())
            .field("dimensions", &self.store.dimensions())
            .field("catalog", &self.catalog.len())
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl Recommender {
    /// Assemble a recommender from a store, an index built over it, and a catalog.
    ///
    /// # Errors
    ///
    /// Returns `IndexMismatch` unless the index has the store's row count and
    /// dimensionality, and every row vector it exposes equals the store's row.
    pub fn new(
        store: VectorStore,
        index: Box<dyn NeighborIndex>,
        catalog: MetadataCatalog,
    ) -> Result<Self> {
        check_alignment(&store, index.as_ref())?;
        info!(
            items = store.len(),
            dimensions = store.dimensions(),
            catalog = catalog.len(),
            "recommender ready"
        );
        Ok(Self {
            store,
            index,
            catalog,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Build the configured index over `store` and assemble a recommender.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the config fails validation.
    pub fn from_config(
        store: VectorStore,
        catalog: MetadataCatalog,
        config: &RecommendConfig,
    ) -> Result<Self> {
        config.validate()?;
        let index: Box<dyn NeighborIndex> = match config.index {
            IndexKind::Brute => Box::new(BruteForceIndex::from_store(&store, config.metric)),
            IndexKind::Hnsw => Box::new(HnswIndex::from_store(&store, config.hnsw, config.metric)),
        };
        debug!(index = %config.index, metric = %config.metric, "similarity index built");
        Ok(Self::new(store, index, catalog)?.with_max_results(config.max_results))
    }

    /// Set the result cap used by [`Recommender::recommend_default`].
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Up to `max_results` items most similar to `identity`, closest first.
    ///
    /// An unknown identity yields an empty list. The query item itself is never
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if the index holds fewer than
    /// `max_results + 1` rows, or `IndexMismatch` if the index returns a row
    /// outside the store.
    pub fn recommend(&self, identity: &str, max_results: usize) -> Result<Vec<Recommendation>> {
        let row = match self.store.resolve(identity) {
            Ok(row) => row,
            Err(BiblioError::NotFound { .. }) => {
                debug!(identity, "no such item; nothing to recommend");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        // One extra slot for the query item's own row
        let k = max_results.saturating_add(1);
        let neighbors = self.index.query(self.store.vector_at(row), k)?;

        let mut self_matches = 0usize;
        let mut results = Vec::with_capacity(max_results);
        for neighbor in neighbors {
            let title = self
                .store
                .identities()
                .get(neighbor.row)
                .ok_or_else(|| BiblioError::IndexMismatch {
                    message: format!(
                        "index returned row {} but store holds {} rows",
                        neighbor.row,
                        self.store.len()
                    ),
                })?;
            if title == identity {
                self_matches += 1;
                continue;
            }
            results.push(self.enrich(title, neighbor.distance));
        }

        if self_matches != 1 {
            warn!(
                identity,
                self_matches, "query item did not appear exactly once among its neighbors"
            );
        }

        results.truncate(max_results);
        debug!(identity, k, returned = results.len(), "recommendations computed");
        Ok(results)
    }

    /// [`Recommender::recommend`] with the configured result cap.
    ///
    /// # Errors
    ///
    /// Same as [`Recommender::recommend`].
    pub fn recommend_default(&self, identity: &str) -> Result<Vec<Recommendation>> {
        self.recommend(identity, self.max_results)
    }

    /// All recommendable titles, in store order.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        self.store.identities()
    }

    /// Configured result cap.
    #[must_use]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// The vector store.
    #[must_use]
    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    /// The metadata catalog.
    #[must_use]
    pub fn catalog(&self) -> &MetadataCatalog {
        &self.catalog
    }

    fn enrich(&self, title: &str, distance: f64) -> Recommendation {
        let record = self.catalog.lookup(title);
        Recommendation {
            title: title.to_string(),
            author: record
                .and_then(|r| r.author.clone())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            cover: record.and_then(|r| r.cover.clone()),
            distance,
        }
    }
}

/// Row-for-row agreement between a store and the index built from it.
fn check_alignment(store: &VectorStore, index: &dyn NeighborIndex) -> Result<()> {
    if index.len() != store.len() {
        return Err(BiblioError::IndexMismatch {
            message: format!(
                "index holds {} rows, store holds {}",
                index.len(),
                store.len()
            ),
        });
    }
    if !store.is_empty() && index.dimensions() != store.dimensions() {
        return Err(BiblioError::IndexMismatch {
            message: format!(
                "index has {} dimensions, store has {}",
                index.dimensions(),
                store.dimensions()
            ),
        });
    }
    for row in 0..store.len() {
        let Some(indexed) = index.row_vector(row) else {
            continue;
        };
        let same = indexed.len() == store.dimensions()
            && indexed
                .iter()
                .zip(store.vector_at(row))
                .all(|(a, b)| a.to_bits() == b.to_bits());
        if !same {
            return Err(BiblioError::IndexMismatch {
                message: format!(
                    "row {row} ({:?}) differs between index and store",
                    store.identity_at(row)
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
