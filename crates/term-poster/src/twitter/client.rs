//! X API v2 tweet creation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::oauth::{OAuthCredentials, OAuthSigner};
use super::{PostedTweet, Publisher};
use crate::error::{Error, Result};

/// Production API host.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

#[derive(Debug, Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: PostedTweet,
}

/// Publishes posts through `POST /2/tweets` with user-context OAuth 1.0a.
pub struct TwitterClient {
    signer: OAuthSigner,
    api_base: String,
    client: Client,
}

impl TwitterClient {
    /// Create a client against the production API.
    pub fn new(credentials: OAuthCredentials, timeout: Duration) -> Result<Self> {
        Self::with_api_base(credentials, DEFAULT_API_BASE, timeout)
    }

    /// Create a client against a custom API host.
    pub fn with_api_base(
        credentials: OAuthCredentials,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            signer: OAuthSigner::new(credentials),
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn tweets_url(&self) -> String {
        format!("{}/2/tweets", self.api_base)
    }
}

#[async_trait]
impl Publisher for TwitterClient {
    async fn publish(&self, text: &str) -> Result<PostedTweet> {
        let url = self.tweets_url();
        let authorization = self.signer.authorization_header("POST", &url)?;

        debug!(url = %url, chars = text.chars().count(), "Posting tweet");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&CreateTweetRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = diagnostic_detail(&body);

            error!(status = %status, detail = %detail, "Error posting tweet");

            return Err(Error::Publish {
                status: status.as_u16(),
                detail,
            });
        }

        let created: CreateTweetResponse = response.json().await?;
        info!(id = %created.data.id, "Tweet posted successfully");

        Ok(created.data)
    }
}

/// Pretty-print a structured error payload in its original key order, or
/// pass the raw body through.
fn diagnostic_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_detail_pretty_prints_json() {
        let detail = diagnostic_detail(r#"{"title":"Forbidden","status":403}"#);
        assert!(detail.contains("\n"));
        assert!(detail.contains("\"title\": \"Forbidden\""));
    }

    #[test]
    fn test_diagnostic_detail_keeps_key_order() {
        let detail = diagnostic_detail(
            r#"{"title":"Forbidden","detail":"duplicate content","type":"about:blank"}"#,
        );
        let title = detail.find("\"title\"").unwrap();
        let reason = detail.find("\"detail\"").unwrap();
        let kind = detail.find("\"type\"").unwrap();
        assert!(title < reason && reason < kind, "{detail}");
    }

    #[test]
    fn test_diagnostic_detail_keeps_plain_text() {
        assert_eq!(diagnostic_detail("Too Many Requests"), "Too Many Requests");
    }

    #[test]
    fn test_tweets_url_strips_trailing_slash() {
        let credentials = OAuthCredentials {
            api_key: "k".to_string(),
            api_secret: "s".to_string(),
            access_token: "t".to_string(),
            access_secret: "ts".to_string(),
        };
        let client =
            TwitterClient::with_api_base(credentials, "http://localhost:8080/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.tweets_url(), "http://localhost:8080/2/tweets");
    }
}
