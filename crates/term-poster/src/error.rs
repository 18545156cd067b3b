//! Error types for the term poster.

use thiserror::Error;

/// Errors that can abort a posting run.
#[derive(Debug, Error)]
pub enum Error {
    /// The content collection reports zero entries.
    #[error("No terms found in content store (endpoint `{endpoint}`)")]
    NoContent { endpoint: String },

    /// The single-item fetch came back empty despite a non-zero total.
    #[error("Failed to fetch a random term at offset {offset}")]
    FetchFailed { offset: u64 },

    /// The content store answered with a non-success status.
    #[error("Content store returned {status}: {body}")]
    ContentStore { status: u16, body: String },

    /// The publishing API rejected the post.
    #[error("Publishing API returned {status}: {detail}")]
    Publish { status: u16, detail: String },

    /// The footer leaves no room for a body within the length limit.
    #[error("Footer is {footer} characters, no room for a body within {max}")]
    MessageTooLong { footer: usize, max: usize },

    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed (transport, TLS, decode)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
