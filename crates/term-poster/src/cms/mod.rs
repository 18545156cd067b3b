//! Content store access.
//!
//! The [`ContentStore`] trait is the seam between the run and the headless
//! CMS; [`MicroCmsClient`] implements it over HTTP and [`TermFetcher`] turns
//! a count plus an offset into one random [`Term`].

mod client;

pub use client::{CmsConfig, MicroCmsClient, DEFAULT_ENDPOINT, TERM_FIELDS};

use std::num::NonZeroU64;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::selector::OffsetSelector;
use crate::term::Term;

/// Read access to a collection of terms.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Name of the collection, used in diagnostics.
    fn endpoint(&self) -> &str;

    /// Total number of entries in the collection.
    async fn total_count(&self) -> Result<u64>;

    /// Fetch exactly one entry at `offset`, or `None` if the page is empty.
    async fn fetch_at(&self, offset: u64) -> Result<Option<Term>>;
}

/// Fetches a uniformly random term from a [`ContentStore`].
pub struct TermFetcher<'a, S: ContentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ContentStore + ?Sized> TermFetcher<'a, S> {
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Count the collection, pick an offset, fetch the entry there.
    ///
    /// The selector is never consulted when the collection is empty.
    pub async fn fetch_random(&self, selector: &mut dyn OffsetSelector) -> Result<Term> {
        info!(endpoint = self.store.endpoint(), "Fetching total count of terms");
        let total = self.store.total_count().await?;

        let Some(total) = NonZeroU64::new(total) else {
            return Err(Error::NoContent {
                endpoint: self.store.endpoint().to_string(),
            });
        };
        info!(total = total.get(), "Counted terms");

        let offset = selector.select(total);
        debug!(offset, "Generated random offset");

        let term = self
            .store
            .fetch_at(offset)
            .await?
            .ok_or(Error::FetchFailed { offset })?;

        info!(title = %term.title, slug = %term.slug, offset, "Fetched random term");
        Ok(term)
    }
}
