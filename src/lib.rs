//! Bibliorec: item-to-item book recommendations by nearest-neighbor search.
//!
//! Each book is a row of an interaction matrix (one column per user, holding
//! that user's rating). Books whose rows lie closest to the selected book's
//! row are recommended, enriched with author and cover metadata.
//!
//! # Quick Start
//!
//! ```
//! use bibliorec::prelude::*;
//!
//! let store = VectorStore::from_rows(
//!     vec!["The Hobbit".into(), "The Silmarillion".into(), "Emma".into()],
//!     &[vec![9.0, 8.0, 0.0], vec![8.0, 9.0, 0.0], vec![0.0, 1.0, 9.0]],
//! )
//! .expect("valid store");
//! let catalog = MetadataCatalog::from_records(
//!     vec![RawBookRecord::new("The Silmarillion", "J. R. R. Tolkien")],
//!     &CoverTemplate::default(),
//! );
//!
//! let recommender = Recommender::from_config(store, catalog, &RecommendConfig::default())
//!     .expect("valid config");
//! let recs = recommender.recommend("The Hobbit", 2).expect("index holds 3 rows");
//!
//! assert_eq!(recs[0].title, "The Silmarillion");
//! assert_eq!(recs[1].author, "Unknown");
//! assert!(recommender.recommend("Nonexistent Title", 2).expect("not an error").is_empty());
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Dense row-major `Matrix`
//! - [`store`]: Vector store (identity <-> row <-> vector)
//! - [`index`]: Nearest neighbor indexes (brute force, HNSW)
//! - [`catalog`]: Deduplicated book metadata and cover locators
//! - [`recommend`]: Recommendation engine and reloadable shared handle
//! - [`config`]: Recommender configuration
//! - [`artifacts`]: JSON artifact loading

pub mod artifacts;
pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod prelude;
pub mod primitives;
pub mod recommend;
pub mod store;

pub use error::{BiblioError, Result};
pub use primitives::Matrix;
