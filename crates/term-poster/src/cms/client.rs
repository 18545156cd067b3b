//! microCMS list API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::ContentStore;
use crate::error::{Error, Result};
use crate::term::Term;

/// Collection holding the glossary.
pub const DEFAULT_ENDPOINT: &str = "terms";

/// Field projection for the single-item fetch.
pub const TERM_FIELDS: &str = "title,description,slug,category.name";

const API_KEY_HEADER: &str = "X-MICROCMS-API-KEY";

/// Connection settings for a microCMS service.
#[derive(Clone)]
pub struct CmsConfig {
    /// Service subdomain (`{domain}.microcms.io`).
    pub service_domain: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Collection name.
    pub endpoint: String,
    /// Overrides `https://{domain}.microcms.io/api/v1`.
    pub api_base: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl CmsConfig {
    /// Base URL of the list API, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        match &self.api_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.microcms.io/api/v1", self.service_domain),
        }
    }
}

impl std::fmt::Debug for CmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("service_domain", &self.service_domain)
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Response shape of the microCMS list API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    contents: Vec<Term>,
    total_count: u64,
}

/// HTTP client for a microCMS collection.
pub struct MicroCmsClient {
    config: CmsConfig,
    base_url: String,
    client: Client,
}

impl MicroCmsClient {
    /// Create a new client.
    pub fn new(config: CmsConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let base_url = config.base_url();

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    async fn list(&self, query: &[(&str, String)]) -> Result<ListResponse> {
        let url = format!("{}/{}", self.base_url, self.config.endpoint);
        debug!(url = %url, ?query, "Querying content store");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Content store request failed");
            return Err(Error::ContentStore {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<ListResponse>().await?)
    }
}

#[async_trait]
impl ContentStore for MicroCmsClient {
    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn total_count(&self) -> Result<u64> {
        let page = self.list(&[("limit", "0".to_string())]).await?;
        Ok(page.total_count)
    }

    async fn fetch_at(&self, offset: u64) -> Result<Option<Term>> {
        let page = self
            .list(&[
                ("limit", "1".to_string()),
                ("offset", offset.to_string()),
                ("fields", TERM_FIELDS.to_string()),
            ])
            .await?;
        Ok(page.contents.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_base: Option<&str>) -> CmsConfig {
        CmsConfig {
            service_domain: "itkotoba".to_string(),
            api_key: "secret-key".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_base: api_base.map(str::to_string),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_base_url_from_domain() {
        assert_eq!(
            config(None).base_url(),
            "https://itkotoba.microcms.io/api/v1"
        );
        assert_eq!(
            config(Some("http://127.0.0.1:9000/api/v1/")).base_url(),
            "http://127.0.0.1:9000/api/v1"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", config(None));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_list_response_without_contents() {
        let page: ListResponse =
            serde_json::from_str(r#"{"totalCount": 42, "offset": 0, "limit": 0}"#).unwrap();
        assert_eq!(page.total_count, 42);
        assert!(page.contents.is_empty());
    }
}
