//! Recommender configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```
//! use bibliorec::config::RecommendConfig;
//! use bibliorec::index::{IndexKind, Metric};
//!
//! let config: RecommendConfig =
//!     serde_json::from_str(r#"{"index": "hnsw", "hnsw": {"m": 8}}"#).expect("valid json");
//! assert_eq!(config.index, IndexKind::Hnsw);
//! assert_eq!(config.hnsw.m, 8);
//! assert_eq!(config.hnsw.ef_construction, 200);
//! assert_eq!(config.metric, Metric::Euclidean);
//! assert_eq!(config.max_results, 4);
//! ```

use crate::catalog::CoverTemplate;
use crate::error::{BiblioError, Result};
use crate::index::hnsw::HnswParams;
use crate::index::{IndexKind, Metric};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image shown when a recommendation has no cover.
pub const DEFAULT_PLACEHOLDER_COVER: &str = "https://via.placeholder.com/150x220?text=No+Image";

/// Default number of recommendations per query.
pub const DEFAULT_MAX_RESULTS: usize = 4;

/// Cover locator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    /// ISBN -> cover URL template
    pub template: CoverTemplate,
    /// Shown in place of a missing cover
    pub placeholder: String,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            template: CoverTemplate::default(),
            placeholder: DEFAULT_PLACEHOLDER_COVER.to_string(),
        }
    }
}

/// Settings for building and querying a recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Recommendations returned per query
    pub max_results: usize,
    /// Distance function of the similarity index
    pub metric: Metric,
    /// Similarity index implementation
    pub index: IndexKind,
    /// HNSW construction parameters (used when `index` is `hnsw`)
    pub hnsw: HnswParams,
    /// Cover locator settings
    pub cover: CoverConfig,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            metric: Metric::default(),
            index: IndexKind::default(),
            hnsw: HnswParams::default(),
            cover: CoverConfig::default(),
        }
    }
}

impl RecommendConfig {
    /// Load and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file can't be read, `Serialization` if it isn't
    /// valid JSON, or `InvalidConfig` if validation fails.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value constraints.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(BiblioError::invalid_config("max_results", 0, ">= 1"));
        }
        if self.hnsw.m == 0 {
            return Err(BiblioError::invalid_config("hnsw.m", 0, ">= 1"));
        }
        if self.hnsw.ef_construction == 0 {
            return Err(BiblioError::invalid_config("hnsw.ef_construction", 0, ">= 1"));
        }
        Ok(())
    }
}
