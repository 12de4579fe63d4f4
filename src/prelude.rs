//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use bibliorec::prelude::*;
//! ```

pub use crate::catalog::{BookRecord, CoverTemplate, MetadataCatalog, RawBookRecord};
pub use crate::config::RecommendConfig;
pub use crate::error::{BiblioError, Result};
pub use crate::index::{BruteForceIndex, HnswIndex, IndexKind, Metric, Neighbor, NeighborIndex};
pub use crate::primitives::Matrix;
pub use crate::recommend::{Recommendation, Recommender, SharedRecommender};
pub use crate::store::VectorStore;
