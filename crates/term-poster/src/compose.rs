//! Length-bounded post composition.
//!
//! A post is a body (header, title, description) followed by a footer
//! (permalink and hashtags). The footer is always kept whole; when the
//! total would exceed the platform limit the body is cut and marked with
//! an ellipsis. Lengths are counted in Unicode scalar values.

use crate::error::{Error, Result};
use crate::term::Term;

/// Character limit of a post on X/Twitter.
pub const DEFAULT_MAX_LENGTH: usize = 280;

/// Marker appended to a cut body.
pub const ELLIPSIS: &str = "...";

/// Ellipsis plus the blank-line spacing that separates body and footer.
const TRUNCATION_SUFFIX: &str = "...\n\n";

const DEFAULT_HEADER: &str = "【今日のIT用語】";
const DEFAULT_FOOTER_LEAD: &str = "詳しくはこちら👇";
const DEFAULT_TAGS: [&str; 2] = ["#IT用語", "#情報処理安全確保支援士"];

/// A composed post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Final text to publish.
    pub text: String,
    /// Whether the description had to be cut.
    pub truncated: bool,
}

impl Message {
    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Builds posts for glossary terms.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    max_length: usize,
    header: String,
    footer_lead: String,
    tags: Vec<String>,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            header: DEFAULT_HEADER.to_string(),
            footer_lead: DEFAULT_FOOTER_LEAD.to_string(),
            tags: DEFAULT_TAGS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl MessageComposer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the character limit.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Override the fixed hashtags that precede the category tag.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Trailing block: permalink and hashtags.
    #[must_use]
    pub fn footer(&self, term: &Term, site_url: &str) -> String {
        let mut tags = self.tags.join(" ");
        if !tags.is_empty() {
            tags.push(' ');
        }
        format!(
            "\n{}\n{}\n\n{tags}#{}",
            self.footer_lead,
            term.permalink(site_url),
            term.category.name
        )
    }

    /// Leading block: header line, title, blank line, description.
    #[must_use]
    pub fn body(&self, term: &Term) -> String {
        format!(
            "{}\n『{}』\n\n{}\n\n",
            self.header, term.title, term.description
        )
    }

    /// Compose the post for `term`.
    ///
    /// Fails with [`Error::MessageTooLong`] when the footer leaves no room
    /// for a cut body and its ellipsis.
    pub fn compose(&self, term: &Term, site_url: &str) -> Result<Message> {
        let footer = self.footer(term, site_url);
        let body = self.body(term);

        let footer_len = footer.chars().count();
        let too_long = || Error::MessageTooLong {
            footer: footer_len,
            max: self.max_length,
        };
        let available = self.max_length.checked_sub(footer_len).ok_or_else(too_long)?;

        if body.chars().count() <= available {
            return Ok(Message {
                text: body + &footer,
                truncated: false,
            });
        }

        let keep = available
            .checked_sub(TRUNCATION_SUFFIX.chars().count())
            .ok_or_else(too_long)?;

        let mut text: String = body.chars().take(keep).collect();
        text.push_str(TRUNCATION_SUFFIX);
        text.push_str(&footer);

        Ok(Message {
            text,
            truncated: true,
        })
    }
}
