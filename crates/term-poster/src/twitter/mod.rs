//! Publishing to X/Twitter.

mod client;
mod oauth;

pub use client::{TwitterClient, DEFAULT_API_BASE};
pub use oauth::{OAuthCredentials, OAuthSigner};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A post created by the publishing API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedTweet {
    /// Identifier assigned by the platform.
    pub id: String,
    /// Text as stored by the platform.
    pub text: String,
}

/// Trait for anything that can publish a composed post.
///
/// Publishing is not idempotent: each call creates a new public post.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, text: &str) -> Result<PostedTweet>;
}
