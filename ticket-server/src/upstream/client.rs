//! Upstream ticket query HTTP client.
//!
//! Transfers raw response bytes for a [`TicketRequest`]. Interpreting the
//! bytes is left to the caller.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use super::error::UpstreamError;
use super::request::TicketRequest;

/// Default ticket query endpoint.
pub const DEFAULT_QUERY_URL: &str = "https://kyfw.12306.cn/otn/leftTicket/queryG";

/// Default browser-identifying user-agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

/// Default fetch timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Something that can fetch raw response bytes for a ticket query.
///
/// [`UpstreamClient`] is the network implementation; tests substitute
/// in-memory sources.
pub trait TicketSource {
    /// Fetch the raw response body for `request`.
    fn fetch(
        &self,
        request: &TicketRequest,
    ) -> impl Future<Output = Result<Vec<u8>, UpstreamError>> + Send;
}

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Candidate query endpoints, tried in order
    pub endpoints: Vec<String>,
    /// User-agent sent with every request
    pub user_agent: String,
    /// Pre-provisioned session cookie blob, sent verbatim
    pub cookie: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Create a config with the default endpoint and user-agent.
    pub fn new() -> Self {
        Self {
            endpoints: vec![DEFAULT_QUERY_URL.to_string()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cookie: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Replace the candidate endpoints.
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the user-agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the session cookie blob.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Returns the timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Upper bound on one fetch across every endpoint.
    ///
    /// Each endpoint has its own timeout, so the bound grows with the
    /// endpoint count, plus one timeout of slack for connection setup.
    pub fn fetch_budget(&self) -> Duration {
        let attempts = u32::try_from(self.endpoints.len()).unwrap_or(u32::MAX);
        self.timeout().saturating_mul(attempts.saturating_add(1))
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the upstream ticket query.
///
/// Tries each configured endpoint in order and returns the first successful
/// body. A single endpoint is never retried.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoints: Vec<String>,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a new client with the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        if config.endpoints.is_empty() {
            return Err(UpstreamError::NotConfigured("no query endpoints".into()));
        }

        let mut headers = HeaderMap::new();

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| UpstreamError::NotConfigured("invalid user-agent".to_string()))?;
        headers.insert(USER_AGENT, user_agent);

        if let Some(cookie) = config.cookie.as_deref().filter(|c| !c.is_empty()) {
            let cookie = HeaderValue::from_str(cookie)
                .map_err(|_| UpstreamError::NotConfigured("invalid cookie".to_string()))?;
            headers.insert(COOKIE, cookie);
        }

        let timeout = config.timeout();
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoints: config.endpoints,
            timeout,
        })
    }

    /// The candidate endpoints, in the order they are tried.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Fetch from one endpoint.
    async fn fetch_from(
        &self,
        endpoint: &str,
        request: &TicketRequest,
    ) -> Result<Vec<u8>, UpstreamError> {
        let url = request.url(endpoint);
        debug!(%url, "sending ticket query");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "received ticket query response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        if body.is_empty() {
            return Err(UpstreamError::EmptyBody);
        }

        Ok(body.to_vec())
    }

    fn transport_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Http(err)
        }
    }
}

impl TicketSource for UpstreamClient {
    async fn fetch(&self, request: &TicketRequest) -> Result<Vec<u8>, UpstreamError> {
        let mut last = None;

        for endpoint in &self.endpoints {
            match self.fetch_from(endpoint, request).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "query endpoint failed");
                    last = Some(e);
                }
            }
        }

        let last =
            last.unwrap_or_else(|| UpstreamError::NotConfigured("no query endpoints".into()));
        Err(UpstreamError::Exhausted {
            attempts: self.endpoints.len(),
            last: Box::new(last),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::StationCode;
    use crate::upstream::fake::{serving_endpoint, silent_endpoint};

    fn request() -> TicketRequest {
        TicketRequest::new(
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            StationCode::new("VAP"),
            StationCode::new("WHN"),
        )
    }

    #[test]
    fn config_defaults() {
        let config = UpstreamConfig::new();

        assert_eq!(config.endpoints, vec![DEFAULT_QUERY_URL.to_string()]);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.cookie.is_none());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_builder() {
        let config = UpstreamConfig::new()
            .with_endpoints(["http://a.test/q", "http://b.test/q"])
            .with_user_agent("agent")
            .with_cookie("JSESSIONID=abc")
            .with_timeout(3);

        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.user_agent, "agent");
        assert_eq!(config.cookie.as_deref(), Some("JSESSIONID=abc"));
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn client_creation() {
        let client = UpstreamClient::new(UpstreamConfig::new().with_cookie("a=b; c=d")).unwrap();
        assert_eq!(client.endpoints(), &[DEFAULT_QUERY_URL.to_string()]);
    }

    #[test]
    fn rejects_empty_endpoints() {
        let config = UpstreamConfig::new().with_endpoints(Vec::<String>::new());
        assert!(matches!(
            UpstreamClient::new(config),
            Err(UpstreamError::NotConfigured(_))
        ));
    }

    #[test]
    fn rejects_invalid_cookie() {
        let config = UpstreamConfig::new().with_cookie("a=b\r\nX-Injected: 1");
        assert!(matches!(
            UpstreamClient::new(config),
            Err(UpstreamError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoints_are_exhausted() {
        // Port 9 on loopback refuses connections
        let config = UpstreamConfig::new()
            .with_endpoints(["http://127.0.0.1:9/a", "http://127.0.0.1:9/b"])
            .with_timeout(2);
        let client = UpstreamClient::new(config).unwrap();

        let err = client.fetch(&request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Exhausted { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn falls_back_after_endpoint_timeout() {
        let silent = silent_endpoint().await;
        let serving = serving_endpoint(br#"{"status": true}"#.to_vec()).await;
        let config = UpstreamConfig::new()
            .with_endpoints([silent, serving])
            .with_timeout(1);
        let client = UpstreamClient::new(config).unwrap();

        let body = client.fetch(&request()).await.unwrap();
        assert_eq!(body, br#"{"status": true}"#);
    }

    #[tokio::test]
    async fn single_silent_endpoint_times_out() {
        let config = UpstreamConfig::new()
            .with_endpoints([silent_endpoint().await])
            .with_timeout(1);
        let client = UpstreamClient::new(config).unwrap();

        let err = client.fetch(&request()).await.unwrap_err();
        match err {
            UpstreamError::Exhausted { attempts: 1, last } => {
                assert!(matches!(*last, UpstreamError::Timeout(_)));
            }
            other => panic!("expected exhausted endpoints, got {other:?}"),
        }
    }

    #[test]
    fn fetch_budget_covers_every_endpoint() {
        let config = UpstreamConfig::new().with_timeout(10);
        assert_eq!(config.fetch_budget(), Duration::from_secs(20));

        let config =
            config.with_endpoints(["http://a.test/q", "http://b.test/q", "http://c.test/q"]);
        assert_eq!(config.fetch_budget(), Duration::from_secs(40));
    }
}
