/*
[INPUT]:  Server URL, optional credentials, timeouts
[OUTPUT]: Configured reqwest client and checked HTTP responses
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode, Url};
use tracing::{debug, trace, warn};

use crate::http::signature::{RequestSigner, xml_headers};
use crate::http::{Credentials, ElementalError, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default per-request timeout, overridable per call
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Body and status of a response the server accepted
#[derive(Debug)]
pub(crate) struct Accepted {
    pub status: StatusCode,
    pub body: String,
}

/// Main HTTP client for the Elemental Live control API
#[derive(Debug, Clone)]
pub struct ElementalClient {
    http_client: Client,
    server_url: String,
    signer: Option<RequestSigner>,
    timeout: Duration,
}

impl ElementalClient {
    /// Create an unauthenticated client with default configuration
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_config(server_url, None, ClientConfig::default())
    }

    /// Create a client that signs every request with `user` and `api_key`
    pub fn with_credentials(server_url: &str, user: &str, api_key: &str) -> Result<Self> {
        Self::with_config(
            server_url,
            Some(Credentials::new(user, api_key)),
            ClientConfig::default(),
        )
    }

    /// Create a client with explicit credentials and configuration
    pub fn with_config(
        server_url: &str,
        credentials: Option<Credentials>,
        config: ClientConfig,
    ) -> Result<Self> {
        let server_url = server_url.trim_end_matches('/');
        let parsed = Url::parse(server_url)?;
        if parsed.cannot_be_a_base() {
            return Err(ElementalError::Config(format!(
                "server url {server_url} cannot be used as a base"
            )));
        }

        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ElementalError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            server_url: server_url.to_string(),
            signer: credentials.map(RequestSigner::new),
            timeout: config.timeout,
        })
    }

    /// Base URL every endpoint path is appended to
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.signer.as_ref().map(RequestSigner::credentials)
    }

    pub fn default_timeout(&self) -> Duration {
        self.timeout
    }

    /// Build full URL for an endpoint such as `/live_events/3/start`
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.server_url, endpoint))?)
    }

    /// Headers for a request to `url`, signed when credentials are configured
    pub(crate) fn headers_for(&self, url: &Url) -> Result<HeaderMap> {
        match &self.signer {
            Some(signer) => signer.signed_headers(url.path(), RequestSigner::expiration_now()),
            None => Ok(xml_headers()),
        }
    }

    /// Send a request with XML headers
    pub(crate) async fn send_xml(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Accepted> {
        let url = self.endpoint_url(endpoint)?;
        let headers = self.headers_for(&url)?;
        self.send(method, url, headers, body, timeout).await
    }

    /// Send a request and require a 200 or 201 answer
    pub(crate) async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Accepted> {
        let timeout = timeout.unwrap_or(self.timeout);
        debug!(
            method = %method,
            url = %url,
            signed = self.signer.is_some(),
            timeout = ?timeout,
            "sending request"
        );

        let mut builder = self
            .http_client
            .request(method.clone(), url.clone())
            .headers(headers)
            .timeout(timeout);
        if let Some(body) = body {
            trace!(body = %body, "request body");
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| ElementalError::RequestFailed {
                method: method.clone(),
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ElementalError::RequestFailed {
                method: method.clone(),
                url: url.to_string(),
                source,
            })?;
        debug!(method = %method, url = %url, status = status.as_u16(), "received response");
        trace!(body = %body, "response body");

        if !is_accepted(status) {
            warn!(method = %method, url = %url, status = status.as_u16(), "request rejected");
            return Err(ElementalError::InvalidResponse {
                method,
                url: url.to_string(),
                status,
                body,
            });
        }

        Ok(Accepted { status, body })
    }
}

fn is_accepted(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}
