//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::stations::{DEFAULT_REGISTRY_URL, StationClientConfig};
use crate::upstream::{DEFAULT_QUERY_URL, DEFAULT_USER_AGENT, UpstreamConfig};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_REGISTRY_PATH: &str = "./city.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the station registry blob comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// Read from disk
    File(PathBuf),
    /// Fetch over HTTP
    Url(String),
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen address
    pub bind_addr: SocketAddr,
    /// Station registry source
    pub registry: RegistrySource,
    /// Candidate query endpoints, tried in order
    pub query_urls: Vec<String>,
    /// Upstream fetch timeout in seconds
    pub timeout_secs: u64,
    /// Session cookie blob
    pub cookie: Option<String>,
    /// Browser-identifying user-agent
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            registry: RegistrySource::File(PathBuf::from(DEFAULT_REGISTRY_PATH)),
            query_urls: vec![DEFAULT_QUERY_URL.to_string()],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cookie: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TICKET_BIND_ADDR` | `127.0.0.1:8080` |
    /// | `TICKET_REGISTRY_PATH` | `./city.json` |
    /// | `TICKET_REGISTRY_URL` | unset; overrides the path when set |
    /// | `TICKET_QUERY_URLS` | the `queryG` endpoint; comma-separated |
    /// | `TICKET_TIMEOUT_SECS` | `10` |
    /// | `TICKET_COOKIE` | unset |
    /// | `TICKET_USER_AGENT` | desktop Chrome |
    ///
    /// Unparseable values are logged and replaced by their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(addr) = var("TICKET_BIND_ADDR") {
            match addr.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => warn!(
                    value = %addr,
                    error = %e,
                    "invalid TICKET_BIND_ADDR, using {DEFAULT_BIND_ADDR}"
                ),
            }
        }

        if let Some(url) = var("TICKET_REGISTRY_URL") {
            config.registry = RegistrySource::Url(url);
        } else if let Some(path) = var("TICKET_REGISTRY_PATH") {
            config.registry = RegistrySource::File(PathBuf::from(path));
        }

        if let Some(urls) = var("TICKET_QUERY_URLS") {
            let urls: Vec<String> = urls
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(String::from)
                .collect();
            if urls.is_empty() {
                warn!("TICKET_QUERY_URLS lists no endpoints, using the default");
            } else {
                config.query_urls = urls;
            }
        }

        if let Some(secs) = var("TICKET_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => warn!(
                    value = %secs,
                    "invalid TICKET_TIMEOUT_SECS, using {DEFAULT_TIMEOUT_SECS}"
                ),
            }
        }

        config.cookie = var("TICKET_COOKIE");

        if let Some(user_agent) = var("TICKET_USER_AGENT") {
            config.user_agent = user_agent;
        }

        config
    }

    /// Upstream client configuration.
    pub fn upstream(&self) -> UpstreamConfig {
        let config = UpstreamConfig::new()
            .with_endpoints(self.query_urls.iter().cloned())
            .with_user_agent(&self.user_agent)
            .with_timeout(self.timeout_secs);

        match &self.cookie {
            Some(cookie) => config.with_cookie(cookie),
            None => config,
        }
    }

    /// Station registry client configuration for a URL source.
    pub fn station_client(&self) -> StationClientConfig {
        let url = match &self.registry {
            RegistrySource::Url(url) => url.as_str(),
            RegistrySource::File(_) => DEFAULT_REGISTRY_URL,
        };
        StationClientConfig::new(&self.user_agent).with_url(url)
    }
}
