//! Cover-art locators derived from standard book identifiers.

use crate::error::{BiblioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token replaced by the ISBN in a cover template.
pub const ISBN_TOKEN: &str = "{isbn}";

/// Open Library medium-size cover by ISBN.
pub const DEFAULT_COVER_TEMPLATE: &str = "https://covers.openlibrary.org/b/isbn/{isbn}-M.jpg";

/// URL template turning an ISBN into a cover locator.
///
/// # Examples
///
/// ```
/// use bibliorec::catalog::CoverTemplate;
///
/// let template = CoverTemplate::default();
/// assert_eq!(
///     template.locate(Some("0439136350")).as_deref(),
///     Some("https://covers.openlibrary.org/b/isbn/0439136350-M.jpg")
/// );
/// assert_eq!(template.locate(Some("  ")), None);
/// assert_eq!(template.locate(None), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoverTemplate(String);

impl CoverTemplate {
    /// Create a template.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the template lacks the `{isbn}` token.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(ISBN_TOKEN) {
            return Err(BiblioError::invalid_config(
                "cover.template",
                &template,
                "a string containing {isbn}",
            ));
        }
        Ok(Self(template))
    }

    /// Cover locator for `isbn`; `None` for a missing or blank ISBN.
    #[must_use]
    pub fn locate(&self, isbn: Option<&str>) -> Option<String> {
        let isbn = isbn.map(str::trim).filter(|s| !s.is_empty())?;
        Some(self.0.replace(ISBN_TOKEN, isbn))
    }

    /// The raw template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CoverTemplate {
    fn default() -> Self {
        Self(DEFAULT_COVER_TEMPLATE.to_string())
    }
}

impl TryFrom<String> for CoverTemplate {
    type Error = BiblioError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CoverTemplate> for String {
    fn from(template: CoverTemplate) -> Self {
        template.0
    }
}

impl fmt::Display for CoverTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
