//! OAuth 1.0a request signing (HMAC-SHA1) for the X API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::error::{Error, Result};

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// The four long-lived user-context credentials.
#[derive(Clone)]
pub struct OAuthCredentials {
    /// Consumer (app) key.
    pub api_key: String,
    /// Consumer (app) secret.
    pub api_secret: String,
    /// User access token.
    pub access_token: String,
    /// User access token secret.
    pub access_secret: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

/// Builds `Authorization: OAuth ...` header values.
#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credentials: OAuthCredentials,
}

impl OAuthSigner {
    #[must_use]
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self { credentials }
    }

    /// Header for a request whose body is not form-encoded (e.g. JSON).
    pub fn authorization_header(&self, method: &str, url: &str) -> Result<String> {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();

        self.header_with(method, url, &[], &nonce, &timestamp)
    }

    /// Deterministic variant of [`Self::authorization_header`].
    ///
    /// `extra` carries query or form parameters that take part in the
    /// signature but do not appear in the header.
    pub fn header_with(
        &self,
        method: &str,
        url: &str,
        extra: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String> {
        let mut oauth = self.oauth_params(nonce, timestamp);
        let signature = self.signature(method, url, &oauth, extra)?;
        oauth.push(("oauth_signature", signature));

        let fields = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {fields}"))
    }

    fn oauth_params(&self, nonce: &str, timestamp: &str) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.credentials.api_key.clone()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_token", self.credentials.access_token.clone()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ]
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        oauth: &[(&'static str, String)],
        extra: &[(&str, &str)],
    ) -> Result<String> {
        let base = signature_base(method, url, oauth, extra);
        let key = format!(
            "{}&{}",
            encode(&self.credentials.api_secret),
            encode(&self.credentials.access_secret)
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| Error::Config(format!("invalid OAuth signing key: {e}")))?;
        mac.update(base.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&url&params`, every component percent-encoded, params sorted.
fn signature_base(
    method: &str,
    url: &str,
    oauth: &[(&'static str, String)],
    extra: &[(&str, &str)],
) -> String {
    let mut pairs: Vec<(String, String)> = oauth
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .chain(extra.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    pairs.sort();

    let params = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&params)
    )
}

/// RFC 3986 percent-encoding (unreserved characters pass through).
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
    const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const TIMESTAMP: &str = "1318622958";
    const STATUS: &str = "Hello Ladies + Gentlemen, a signed OAuth request!";

    fn signer() -> OAuthSigner {
        OAuthSigner::new(OAuthCredentials {
            api_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            api_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
            access_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
        })
    }

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(encode("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode("!"), "%21");
    }

    #[test]
    fn test_signature_base_string() {
        let signer = signer();
        let oauth = signer.oauth_params(NONCE, TIMESTAMP);
        let extra = [("status", STATUS), ("include_entities", "true")];

        let base = signature_base("post", URL, &oauth, &extra);

        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             include_entities%3Dtrue%26\
             oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
             oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
             oauth_signature_method%3DHMAC-SHA1%26\
             oauth_timestamp%3D1318622958%26\
             oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
             oauth_version%3D1.0%26\
             status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn test_signature_matches_reference_vector() {
        let signer = signer();
        let oauth = signer.oauth_params(NONCE, TIMESTAMP);
        let extra = [("status", STATUS), ("include_entities", "true")];

        let signature = signer.signature("POST", URL, &oauth, &extra).unwrap();

        assert_eq!(signature, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_header_layout() {
        let header = signer()
            .header_with("POST", "https://api.twitter.com/2/tweets", &[], NONCE, TIMESTAMP)
            .unwrap();

        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_signature=\""));
        assert!(!header.contains("LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"));
    }

    #[test]
    fn test_random_nonce_changes_header() {
        let signer = signer();
        let a = signer.authorization_header("POST", URL).unwrap();
        let b = signer.authorization_header("POST", URL).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = signer().credentials;
        let rendered = format!("{credentials:?}");
        for secret in [
            &credentials.api_key,
            &credentials.api_secret,
            &credentials.access_token,
            &credentials.access_secret,
        ] {
            assert!(!rendered.contains(secret.as_str()), "leaked {secret}");
        }
        assert_eq!(rendered.matches("<redacted>").count(), 4);
    }
}
