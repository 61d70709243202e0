//! Station registry HTTP client.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::info;

use super::error::StationError;
use super::registry::StationRegistry;

/// Default URL of the upstream station-name script.
///
/// The body is JavaScript of the form `var station_names ='@bjb|北京北|VAP|...';`,
/// which the registry decoder accepts as-is.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://kyfw.12306.cn/otn/resources/js/framework/station_name.js";

/// Configuration for the station registry client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// URL serving the registry blob
    pub url: String,
    /// User-agent sent with the request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a new config with the given user-agent.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            user_agent: user_agent.into(),
            timeout_secs: 30,
        }
    }

    /// Set a custom registry URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client that downloads the station registry blob.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    url: String,
}

impl StationClient {
    /// Create a new station registry client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let mut headers = HeaderMap::new();

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| StationError::NotConfigured("invalid user-agent".to_string()))?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Fetch the raw registry blob.
    pub async fn fetch_blob(&self) -> Result<Vec<u8>, StationError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch and decode the station registry.
    pub async fn fetch_registry(&self) -> Result<StationRegistry, StationError> {
        let blob = self.fetch_blob().await?;
        let registry = StationRegistry::from_bytes(&blob);
        info!(
            url = %self.url,
            stations = registry.len(),
            "fetched station registry"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StationClientConfig::new("test-agent");
        assert_eq!(config.url, DEFAULT_REGISTRY_URL);
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = StationClientConfig::new("test-agent")
            .with_url("http://localhost:8080/stations.js")
            .with_timeout(5);
        assert_eq!(config.url, "http://localhost:8080/stations.js");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        assert!(StationClient::new(StationClientConfig::new("test-agent")).is_ok());
    }

    #[test]
    fn rejects_invalid_user_agent() {
        let result = StationClient::new(StationClientConfig::new("bad\nagent"));
        assert!(matches!(result, Err(StationError::NotConfigured(_))));
    }
}
