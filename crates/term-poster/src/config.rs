//! Process configuration, read once from the environment.

use std::time::Duration;

use crate::cms::{CmsConfig, DEFAULT_ENDPOINT};
use crate::error::{Error, Result};
use crate::twitter::{OAuthCredentials, DEFAULT_API_BASE};

/// Fallback when `SITE_URL` is unset.
pub const DEFAULT_SITE_URL: &str = "https://itkotoba.com";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_CMS_DOMAIN: &str = "MICROCMS_SERVICE_DOMAIN";
const ENV_CMS_API_KEY: &str = "MICROCMS_API_KEY";
const ENV_CMS_ENDPOINT: &str = "MICROCMS_ENDPOINT";
const ENV_CMS_API_BASE: &str = "MICROCMS_API_BASE";
const ENV_TWITTER_API_KEY: &str = "TWITTER_API_KEY";
const ENV_TWITTER_API_SECRET: &str = "TWITTER_API_KEY_SECRET";
const ENV_TWITTER_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
const ENV_TWITTER_ACCESS_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";
const ENV_TWITTER_API_BASE: &str = "TWITTER_API_BASE";
const ENV_SITE_URL: &str = "SITE_URL";
const ENV_HTTP_TIMEOUT: &str = "HTTP_TIMEOUT_SECS";

/// Everything a run needs, built at start-up and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Content store connection.
    pub cms: CmsConfig,
    /// Publishing credentials; absent when only previewing.
    pub twitter: Option<OAuthCredentials>,
    /// Publishing API host.
    pub twitter_api_base: String,
    /// Base URL for permalinks.
    pub site_url: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl AppConfig {
    /// Create configuration from environment variables.
    ///
    /// # Required Environment Variables
    /// - `MICROCMS_SERVICE_DOMAIN`, `MICROCMS_API_KEY`
    ///
    /// # Optional Environment Variables
    /// - `TWITTER_API_KEY`, `TWITTER_API_KEY_SECRET`, `TWITTER_ACCESS_TOKEN`,
    ///   `TWITTER_ACCESS_TOKEN_SECRET` (all four needed to publish)
    /// - `SITE_URL` (default: https://itkotoba.com)
    /// - `MICROCMS_ENDPOINT` (default: terms)
    /// - `MICROCMS_API_BASE`, `TWITTER_API_BASE`
    /// - `HTTP_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require =
            |name: &str| get(name).ok_or_else(|| Error::Config(format!("{name} not set")));

        let timeout_secs = match get(ENV_HTTP_TIMEOUT) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "{ENV_HTTP_TIMEOUT} must be a whole number of seconds, got `{raw}`"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let timeout = Duration::from_secs(timeout_secs);

        let cms = CmsConfig {
            service_domain: require(ENV_CMS_DOMAIN)?,
            api_key: require(ENV_CMS_API_KEY)?,
            endpoint: get(ENV_CMS_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_base: get(ENV_CMS_API_BASE),
            timeout,
        };

        let twitter = match (
            get(ENV_TWITTER_API_KEY),
            get(ENV_TWITTER_API_SECRET),
            get(ENV_TWITTER_ACCESS_TOKEN),
            get(ENV_TWITTER_ACCESS_SECRET),
        ) {
            (Some(api_key), Some(api_secret), Some(access_token), Some(access_secret)) => {
                Some(OAuthCredentials {
                    api_key,
                    api_secret,
                    access_token,
                    access_secret,
                })
            }
            _ => None,
        };

        Ok(Self {
            cms,
            twitter,
            twitter_api_base: get(ENV_TWITTER_API_BASE)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            site_url: get(ENV_SITE_URL).unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            timeout,
        })
    }

    /// Publishing credentials, or an error naming the missing variables.
    pub fn twitter_credentials(&self) -> Result<&OAuthCredentials> {
        self.twitter.as_ref().ok_or_else(|| {
            Error::Config(format!(
                "{ENV_TWITTER_API_KEY}, {ENV_TWITTER_API_SECRET}, {ENV_TWITTER_ACCESS_TOKEN} \
                 and {ENV_TWITTER_ACCESS_SECRET} must all be set to publish"
            ))
        })
    }
}
