//! Metadata catalog: display attributes per item identity.
//!
//! Raw book tables often repeat a title (one row per edition). The catalog
//! keeps exactly one canonical record per title: the first one seen.
//!
//! # Examples
//!
//! ```
//! use bibliorec::catalog::{CoverTemplate, MetadataCatalog, RawBookRecord};
//!
//! let raw = vec![
//!     RawBookRecord::new("Emma", "Jane Austen").with_isbn("0141439580"),
//!     RawBookRecord::new("Emma", "J. Austen"),
//! ];
//! let catalog = MetadataCatalog::from_records(raw, &CoverTemplate::default());
//!
//! let emma = catalog.lookup("Emma").expect("present");
//! assert_eq!(emma.author.as_deref(), Some("Jane Austen"));
//! assert!(emma.cover.as_deref().is_some_and(|url| url.contains("0141439580")));
//! assert_eq!(catalog.len(), 1);
//! ```

mod cover;

pub use cover::{CoverTemplate, DEFAULT_COVER_TEMPLATE, ISBN_TOKEN};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One row of a raw book table, as ingested.
///
/// Field aliases accept the Book-Crossing column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBookRecord {
    /// Display title (the item identity)
    #[serde(alias = "Book-Title")]
    pub title: String,
    /// Author name
    #[serde(default, alias = "Book-Author")]
    pub author: Option<String>,
    /// Standard book identifier
    #[serde(default, alias = "ISBN")]
    pub isbn: Option<String>,
    /// Direct cover locator
    #[serde(default, alias = "Image-URL-M")]
    pub image_url: Option<String>,
}

impl RawBookRecord {
    /// Record with a title and author only.
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: Some(author.into()),
            ..Self::default()
        }
    }

    /// Set the ISBN.
    #[must_use]
    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Set a direct cover locator.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Canonical metadata for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    /// Item identity
    pub title: String,
    /// Author; `None` when the source had none or it was blank
    pub author: Option<String>,
    /// Cover locator, direct or derived from the ISBN
    pub cover: Option<String>,
}

impl BookRecord {
    fn from_raw(raw: RawBookRecord, covers: &CoverTemplate) -> Self {
        let cover = non_blank(raw.image_url).or_else(|| covers.locate(raw.isbn.as_deref()));
        Self {
            title: raw.title,
            author: non_blank(raw.author),
            cover,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Identity-keyed, deduplicated metadata lookup.
#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    records: HashMap<String, BookRecord>,
}

impl MetadataCatalog {
    /// Build from raw rows; the first row seen for a title wins.
    pub fn from_records<I>(raw: I, covers: &CoverTemplate) -> Self
    where
        I: IntoIterator<Item = RawBookRecord>,
    {
        let mut records = HashMap::new();
        let mut duplicates = 0usize;
        for row in raw {
            if records.contains_key(&row.title) {
                duplicates += 1;
                continue;
            }
            let record = BookRecord::from_raw(row, covers);
            records.insert(record.title.clone(), record);
        }
        debug!(
            records = records.len(),
            duplicates, "metadata catalog built"
        );
        Self { records }
    }

    /// Canonical record for `identity`, if any.
    #[must_use]
    pub fn lookup(&self, identity: &str) -> Option<&BookRecord> {
        self.records.get(identity)
    }

    /// Whether a record exists for `identity`.
    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.records.contains_key(identity)
    }

    /// Number of distinct identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(raw: Vec<RawBookRecord>) -> MetadataCatalog {
        MetadataCatalog::from_records(raw, &CoverTemplate::default())
    }

    #[test]
    fn test_first_seen_wins() {
        let catalog = build(vec![
            RawBookRecord::new("Dune", "Frank Herbert").with_isbn("0441172717"),
            RawBookRecord::new("Dune", "F. Herbert").with_isbn("0000000000"),
        ]);
        let dune = catalog.lookup("Dune").expect("present");
        assert_eq!(dune.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(
            dune.cover.as_deref(),
            Some("https://covers.openlibrary.org/b/isbn/0441172717-M.jpg")
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_direct_image_url_wins_over_isbn() {
        let catalog = build(vec![RawBookRecord::new("Dune", "Frank Herbert")
            .with_isbn("0441172717")
            .with_image_url("http://images.example/dune.jpg")]);
        assert_eq!(
            catalog.lookup("Dune").and_then(|r| r.cover.as_deref()),
            Some("http://images.example/dune.jpg")
        );
    }

    #[test]
    fn test_blank_image_url_falls_back_to_isbn() {
        let catalog = build(vec![RawBookRecord::new("Dune", "Frank Herbert")
            .with_isbn("0441172717")
            .with_image_url("  ")]);
        assert!(catalog
            .lookup("Dune")
            .and_then(|r| r.cover.as_deref())
            .is_some_and(|url| url.contains("0441172717")));
    }

    #[test]
    fn test_no_isbn_no_cover() {
        let catalog = build(vec![RawBookRecord::new("Dune", "Frank Herbert").with_isbn("")]);
        assert!(catalog.lookup("Dune").expect("present").cover.is_none());
    }

    #[test]
    fn test_blank_author_is_absent() {
        let catalog = build(vec![RawBookRecord::new("Dune", "   ")]);
        assert!(catalog.lookup("Dune").expect("present").author.is_none());
    }

    #[test]
    fn test_lookup_miss() {
        let catalog = build(vec![RawBookRecord::new("Dune", "Frank Herbert")]);
        assert!(catalog.lookup("Emma").is_none());
        assert!(!catalog.contains("Emma"));
        assert!(catalog.contains("Dune"));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = MetadataCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.lookup("anything").is_none());
    }

    #[test]
    fn test_deserialize_book_crossing_columns() {
        let json = r#"[{"ISBN": "0195153448", "Book-Title": "Classical Mythology",
                        "Book-Author": "Mark P. O. Morford"}]"#;
        let raw: Vec<RawBookRecord> = serde_json::from_str(json).expect("valid json");
        let catalog = build(raw);
        let record = catalog.lookup("Classical Mythology").expect("present");
        assert_eq!(record.author.as_deref(), Some("Mark P. O. Morford"));
        assert!(record.cover.is_some());
    }

    #[test]
    fn test_deserialize_optional_fields() {
        let raw: RawBookRecord =
            serde_json::from_str(r#"{"title": "Emma", "isbn": null}"#).expect("valid json");
        assert_eq!(raw.title, "Emma");
        assert!(raw.author.is_none());
        assert!(raw.isbn.is_none());
    }
}
