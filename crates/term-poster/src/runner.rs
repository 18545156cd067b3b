//! Run orchestration: fetch a random term, compose, publish.

use tracing::info;

use crate::cms::{ContentStore, TermFetcher};
use crate::compose::{Message, MessageComposer};
use crate::error::{Error, Result};
use crate::selector::OffsetSelector;
use crate::term::Term;
use crate::twitter::{PostedTweet, Publisher};

/// Whether a run ends by publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Fetch, compose and publish.
    Publish,
    /// Fetch and compose only.
    DryRun,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The selected term.
    pub term: Term,
    /// The composed post.
    pub message: Message,
    /// The created post, `None` for a dry run.
    pub tweet: Option<PostedTweet>,
}

/// Sequences the three stages. Any error aborts the run.
pub struct Runner<'a> {
    store: &'a dyn ContentStore,
    publisher: Option<&'a dyn Publisher>,
    composer: MessageComposer,
    site_url: String,
}

impl<'a> Runner<'a> {
    #[must_use]
    pub fn new(
        store: &'a dyn ContentStore,
        publisher: Option<&'a dyn Publisher>,
        composer: MessageComposer,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            publisher,
            composer,
            site_url: site_url.into(),
        }
    }

    /// Execute one run.
    ///
    /// In [`RunMode::Publish`] a missing publisher is a configuration error,
    /// raised only after the message has been composed.
    pub async fn run(
        &self,
        selector: &mut dyn OffsetSelector,
        mode: RunMode,
    ) -> Result<RunReport> {
        let term = TermFetcher::new(self.store).fetch_random(selector).await?;

        let message = self.composer.compose(&term, &self.site_url)?;
        info!(
            chars = message.len(),
            max = self.composer.max_length(),
            truncated = message.truncated,
            "Composed message"
        );

        let tweet = match mode {
            RunMode::DryRun => {
                info!("Dry run, not publishing");
                None
            }
            RunMode::Publish => {
                let publisher = self
                    .publisher
                    .ok_or_else(|| Error::Config("no publisher configured".to_string()))?;
                info!("Posting tweet");
                Some(publisher.publish(&message.text).await?)
            }
        };

        Ok(RunReport {
            term,
            message,
            tweet,
        })
    }
}
