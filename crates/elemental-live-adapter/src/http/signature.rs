/*
[INPUT]:  Request path, user credentials and expiration timestamp
[OUTPUT]: Signed request headers (X-Auth-User, X-Auth-Expires, X-Auth-Key)
[POS]:    HTTP layer - request signing for authenticated appliances
[UPDATE]: When changing signing algorithm or header format
*/

use std::fmt;

use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::http::{ElementalError, Result};

pub const X_AUTH_USER: HeaderName = HeaderName::from_static("x-auth-user");
pub const X_AUTH_EXPIRES: HeaderName = HeaderName::from_static("x-auth-expires");
pub const X_AUTH_KEY: HeaderName = HeaderName::from_static("x-auth-key");

/// Seconds a signature stays valid after it is generated
pub const SIGNATURE_TTL_SECS: i64 = 120;

const APPLICATION_XML: &str = "application/xml";

/// API user and key for appliances with authentication enabled
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            api_key: api_key.into(),
        }
    }
}

/// Signs requests with the appliance's time-limited MD5 scheme
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Expiration timestamp for a signature generated now
    pub fn expiration_now() -> i64 {
        Utc::now().timestamp() + SIGNATURE_TTL_SECS
    }

    /// Compute the X-Auth-Key value
    ///
    /// `md5_hex(api_key + md5_hex(path + user + api_key + expires))`
    pub fn auth_key(&self, path: &str, expires: i64) -> String {
        let Credentials { user, api_key } = &self.credentials;
        let prehash = format!("{path}{user}{api_key}{expires}");
        let digest = format!("{:x}", md5::compute(prehash.as_bytes()));
        let final_hash = format!("{api_key}{digest}");
        format!("{:x}", md5::compute(final_hash.as_bytes()))
    }

    /// Build the full signed header set for `path`, valid until `expires`
    pub fn signed_headers(&self, path: &str, expires: i64) -> Result<HeaderMap> {
        let mut headers = xml_headers();
        headers.insert(X_AUTH_USER, header_value(&self.credentials.user, "user")?);
        headers.insert(X_AUTH_EXPIRES, HeaderValue::from(expires));
        headers.insert(
            X_AUTH_KEY,
            header_value(&self.auth_key(path, expires), "auth key")?,
        );
        Ok(headers)
    }
}

/// Headers sent on every XML request, signed or not
pub fn xml_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_XML));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_XML));
    headers
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ElementalError::Config(format!("{what} is not a valid header value")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md5_hex(input: &str) -> String {
        format!("{:x}", md5::compute(input.as_bytes()))
    }

    fn signer() -> RequestSigner {
        RequestSigner::new(Credentials::new("FAKE", "FAKE"))
    }

    #[test]
    fn test_auth_key_matches_two_stage_md5() {
        let expires = 1_700_000_120;
        let inner = md5_hex("/live_eventsFAKEFAKE1700000120");
        let expected = md5_hex(&format!("FAKE{inner}"));

        assert_eq!(signer().auth_key("/live_events", expires), expected);
    }

    #[test]
    fn test_md5_known_vector() {
        // RFC 1321 test suite
        assert_eq!(md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_auth_key_is_lowercase_hex() {
        let key = signer().auth_key("/devices", 1_700_000_000);
        assert_eq!(key.len(), 32);
        assert!(
            key.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_auth_key_changes_with_expiration() {
        let signer = signer();
        assert_ne!(
            signer.auth_key("/live_events", 1_700_000_120),
            signer.auth_key("/live_events", 1_700_000_121)
        );
    }

    #[test]
    fn test_auth_key_changes_with_path_and_user() {
        let a = signer().auth_key("/live_events/1", 1_700_000_120);
        let b = signer().auth_key("/live_events/2", 1_700_000_120);
        let c = RequestSigner::new(Credentials::new("other", "FAKE"))
            .auth_key("/live_events/1", 1_700_000_120);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_signed_headers() {
        let signer = signer();
        let headers = signer
            .signed_headers("/live_events", 1_700_000_120)
            .expect("headers");

        assert_eq!(headers[X_AUTH_USER], "FAKE");
        assert_eq!(headers[X_AUTH_EXPIRES], "1700000120");
        assert_eq!(
            headers[X_AUTH_KEY],
            signer.auth_key("/live_events", 1_700_000_120).as_str()
        );
        assert_eq!(headers[ACCEPT], "application/xml");
        assert_eq!(headers[CONTENT_TYPE], "application/xml");
    }

    #[test]
    fn test_unsigned_headers_only_carry_content_negotiation() {
        let headers = xml_headers();
        assert_eq!(headers.len(), 2);
        assert!(headers.get(X_AUTH_KEY).is_none());
    }

    #[test]
    fn test_expiration_is_two_minutes_ahead() {
        let now = Utc::now().timestamp();
        let expires = RequestSigner::expiration_now();
        assert!(expires >= now + SIGNATURE_TTL_SECS);
        assert!(expires <= now + SIGNATURE_TTL_SECS + 2);
    }

    #[test]
    fn test_debug_output_hides_api_key() {
        let rendered = format!("{:?}", Credentials::new("admin", "s3cret"));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_invalid_user_header_is_config_error() {
        let signer = RequestSigner::new(Credentials::new("bad\nuser", "FAKE"));
        let err = signer.signed_headers("/devices", 1).unwrap_err();
        assert!(matches!(err, ElementalError::Config(_)));
    }
}
