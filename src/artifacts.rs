//! Loading precomputed artifacts from JSON.
//!
//! An artifact directory holds two files:
//!
//! - `pivot.json`: the interaction table, one row per title
//!   (`{"titles": [...], "dimensions": [...], "rows": [[...], ...]}`;
//!   `dimensions` labels the columns and may be omitted)
//! - `books.json`: an array of [`RawBookRecord`]s
//!
//! The similarity index is built in memory from the interaction table when
//! the recommender is assembled.

use crate::catalog::{CoverTemplate, MetadataCatalog, RawBookRecord};
use crate::config::RecommendConfig;
use crate::error::{BiblioError, Result};
use crate::recommend::Recommender;
use crate::store::VectorStore;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// File name of the interaction table inside an artifact directory.
pub const PIVOT_FILE: &str = "pivot.json";

/// File name of the book table inside an artifact directory.
pub const BOOKS_FILE: &str = "books.json";

/// Serialized interaction table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionTable {
    /// Row identities
    pub titles: Vec<String>,
    /// Column labels (e.g. user ids)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<String>>,
    /// One vector per title
    pub rows: Vec<Vec<f64>>,
}

impl InteractionTable {
    /// Validate and convert into a vector store.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if rows are ragged, disagree with the title
    /// count, or disagree with the column labels; `DuplicateIdentity` if a
    /// title repeats.
    pub fn into_store(self) -> Result<VectorStore> {
        let store = VectorStore::from_rows(self.titles, &self.rows)?;
        if let Some(labels) = &self.dimensions {
            if !store.is_empty() && labels.len() != store.dimensions() {
                return Err(BiblioError::dimension_mismatch(labels.len(), store.dimensions()));
            }
        }
        Ok(store)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Load an interaction table into a vector store.
///
/// # Errors
///
/// I/O and parse failures, plus the checks of [`InteractionTable::into_store`].
pub fn load_store(path: impl AsRef<Path>) -> Result<VectorStore> {
    let path = path.as_ref();
    let store = read_json::<InteractionTable>(path)?.into_store()?;
    info!(
        path = %path.display(),
        items = store.len(),
        dimensions = store.dimensions(),
        "interaction table loaded"
    );
    Ok(store)
}

/// Load a book table into a metadata catalog.
///
/// # Errors
///
/// I/O and parse failures.
pub fn load_catalog(path: impl AsRef<Path>, covers: &CoverTemplate) -> Result<MetadataCatalog> {
    let path = path.as_ref();
    let raw: Vec<RawBookRecord> = read_json(path)?;
    let rows = raw.len();
    let catalog = MetadataCatalog::from_records(raw, covers);
    info!(
        path = %path.display(),
        rows,
        titles = catalog.len(),
        "book table loaded"
    );
    Ok(catalog)
}

/// Load `pivot.json` and `books.json` from `dir` and assemble a recommender.
///
/// # Errors
///
/// Any load failure, or an invalid `config`.
pub fn load_recommender(dir: impl AsRef<Path>, config: &RecommendConfig) -> Result<Recommender> {
    let dir = dir.as_ref();
    let store = load_store(dir.join(PIVOT_FILE))?;
    let catalog = load_catalog(dir.join(BOOKS_FILE), &config.cover.template)?;
    Recommender::from_config(store, catalog, config)
}
