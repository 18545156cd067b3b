//! Posts a random glossary term to X/Twitter.
//!
//! One run is a strictly sequential chain:
//! - count the terms in the microCMS collection
//! - fetch one at a uniformly random offset
//! - compose a post that fits the 280-character limit
//! - publish it with OAuth 1.0a user credentials
//!
//! Every stage returns [`Result`]; the first error ends the run.

pub mod cms;
pub mod compose;
pub mod config;
pub mod error;
pub mod runner;
pub mod selector;
pub mod term;
pub mod twitter;

// Re-export main types
pub use cms::{ContentStore, MicroCmsClient, TermFetcher};
pub use compose::{Message, MessageComposer};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use runner::{RunMode, RunReport, Runner};
pub use selector::{FixedOffset, OffsetSelector, RandomOffset};
pub use term::{Category, Term};
pub use twitter::{OAuthCredentials, PostedTweet, Publisher, TwitterClient};
