//! Glossary term records as returned by the content store.

use serde::{Deserialize, Serialize};

/// A glossary entry.
///
/// Only the projected fields (`title,description,slug,category.name`) are
/// requested, so nothing else is modelled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Short display name.
    pub title: String,
    /// Body text explaining the term.
    pub description: String,
    /// URL-safe identifier used in the permalink.
    pub slug: String,
    /// Category the term belongs to.
    pub category: Category,
}

/// Category reference, flattened to its name by the field projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Term {
    /// Create a new term.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        slug: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            slug: slug.into(),
            category: Category {
                name: category.into(),
            },
        }
    }

    /// Build the term's page URL under `site_url`.
    #[must_use]
    pub fn permalink(&self, site_url: &str) -> String {
        format!("{}/terms/{}", site_url.trim_end_matches('/'), self.slug)
    }
}
