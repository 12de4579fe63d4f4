//! Recommendation systems.
//!
//! Item-to-item recommendations by nearest-neighbor search over an
//! interaction matrix: each item is a row of user ratings, and the items
//! whose rows lie closest to the selected item's row are recommended.
//!
//! # Quick Start
//!
//! ```
//! use bibliorec::catalog::{CoverTemplate, MetadataCatalog, RawBookRecord};
//! use bibliorec::index::{BruteForceIndex, Metric};
//! use bibliorec::recommend::Recommender;
//! use bibliorec::store::VectorStore;
//!
//! let store = VectorStore::from_rows(
//!     vec!["Dune".into(), "Hyperion".into(), "Emma".into()],
//!     &[vec![5.0, 4.0, 0.0], vec![4.0, 5.0, 0.0], vec![0.0, 0.0, 5.0]],
//! )
//! .expect("valid store");
//! let index = BruteForceIndex::from_store(&store, Metric::Euclidean);
//! let catalog = MetadataCatalog::from_records(
//!     vec![RawBookRecord::new("Hyperion", "Dan Simmons")],
//!     &CoverTemplate::default(),
//! );
//!
//! let recommender = Recommender::new(store, Box::new(index), catalog).expect("rows agree");
//! let recs = recommender.recommend("Dune", 1).expect("index holds 3 rows");
//!
//! assert_eq!(recs.len(), 1);
//! assert_eq!(recs[0].title, "Hyperion");
//! assert_eq!(recs[0].author, "Dan Simmons");
//! ```

mod engine;
mod shared;

pub use engine::{Recommendation, Recommender, UNKNOWN_AUTHOR};
pub use shared::SharedRecommender;
