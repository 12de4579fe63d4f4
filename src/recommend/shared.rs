//! Reloadable recommender shared across threads.

use super::{Recommendation, Recommender};
use crate::error::Result;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// A [`Recommender`] that can be swapped out while queries run.
///
/// Queries take a snapshot of the current recommender and release the lock
/// before searching, so a reload never blocks behind a query and no query
/// sees a half-replaced engine.
///
/// # Examples
///
/// ```
/// use bibliorec::catalog::MetadataCatalog;
/// use bibliorec::config::RecommendConfig;
/// use bibliorec::recommend::{Recommender, SharedRecommender};
/// use bibliorec::store::VectorStore;
///
/// let build = |titles: &[&str]| {
///     let rows: Vec<Vec<f64>> = (0..titles.len()).map(|i| vec![i as f64]).collect();
///     let store = VectorStore::from_rows(titles.iter().map(|t| t.to_string()).collect(), &rows)
///         .expect("valid store");
///     Recommender::from_config(store, MetadataCatalog::default(), &RecommendConfig::default())
///         .expect("valid config")
/// };
///
/// let shared = SharedRecommender::new(build(&["a", "b"]));
/// assert_eq!(shared.recommend("a", 1).expect("2 rows")[0].title, "b");
///
/// shared.reload(build(&["a", "c", "b"]));
/// assert_eq!(shared.recommend("a", 1).expect("3 rows")[0].title, "c");
/// ```
#[derive(Debug)]
pub struct SharedRecommender {
    current: RwLock<Arc<Recommender>>,
}

impl SharedRecommender {
    /// Wrap a recommender.
    #[must_use]
    pub fn new(recommender: Recommender) -> Self {
        Self {
            current: RwLock::new(Arc::new(recommender)),
        }
    }

    /// The recommender currently serving queries.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Recommender> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Query the current recommender.
    ///
    /// # Errors
    ///
    /// Same as [`Recommender::recommend`].
    pub fn recommend(&self, identity: &str, max_results: usize) -> Result<Vec<Recommendation>> {
        self.snapshot().recommend(identity, max_results)
    }

    /// Replace the recommender, returning the previous one.
    ///
    /// Queries already running finish against the previous recommender.
    pub fn reload(&self, recommender: Recommender) -> Arc<Recommender> {
        let next = Arc::new(recommender);
        let items = next.store().len();
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, next)
        };
        info!(items, "recommender reloaded");
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetadataCatalog;
    use crate::config::RecommendConfig;
    use crate::store::VectorStore;
    use std::thread;

    fn line(titles: &[&str]) -> Recommender {
        let rows: Vec<Vec<f64>> = (0..titles.len()).map(|i| vec![i as f64]).collect();
        let store =
            VectorStore::from_rows(titles.iter().map(|t| (*t).to_string()).collect(), &rows)
                .expect("valid store");
        Recommender::from_config(store, MetadataCatalog::default(), &RecommendConfig::default())
            .expect("valid config")
    }

    #[test]
    fn test_reload_swaps_engine() {
        let shared = SharedRecommender::new(line(&["a", "b", "c"]));
        assert_eq!(shared.snapshot().titles().len(), 3);

        let previous = shared.reload(line(&["x", "y"]));
        assert_eq!(previous.titles().len(), 3);
        assert_eq!(shared.snapshot().titles().len(), 2);
        assert!(shared.recommend("a", 1).expect("unknown is empty").is_empty());
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let shared = SharedRecommender::new(line(&["a", "b", "c"]));
        let held = shared.snapshot();
        shared.reload(line(&["x", "y"]));
        assert_eq!(held.recommend("a", 2).expect("3 rows").len(), 2);
    }

    #[test]
    fn test_concurrent_queries_and_reload() {
        let shared = Arc::new(SharedRecommender::new(line(&["a", "b", "c", "d"])));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let recs = shared.recommend("a", 2).expect("both versions hold 4 rows");
                        assert_eq!(recs.len(), 2);
                        assert!(recs.iter().all(|r| r.title != "a"));
                    }
                })
            })
            .collect();

        for _ in 0..20 {
            shared.reload(line(&["a", "b", "c", "d"]));
        }

        for reader in readers {
            reader.join().expect("reader thread panicked");
        }
    }
}
