use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use ticket_server::config::{RegistrySource, ServerConfig};
use ticket_server::query::TicketService;
use ticket_server::stations::{StationClient, StationRegistry};
use ticket_server::upstream::UpstreamClient;
use ticket_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = ServerConfig::from_env();

    // Load station registry (fail fast if unavailable)
    let registry = match &config.registry {
        RegistrySource::File(path) => {
            info!(path = %path.display(), "loading station registry");
            StationRegistry::load(path)?
        }
        RegistrySource::Url(url) => {
            info!(%url, "fetching station registry");
            StationClient::new(config.station_client())?
                .fetch_registry()
                .await?
        }
    };
    if registry.is_empty() {
        return Err("station registry is empty".into());
    }
    info!(stations = registry.len(), "loaded station registry");

    // Create upstream client
    let upstream_config = config.upstream();
    let fetch_budget = upstream_config.fetch_budget();
    let upstream = UpstreamClient::new(upstream_config)?;
    info!(endpoints = ?upstream.endpoints(), "configured query endpoints");

    let service =
        TicketService::new(Arc::new(registry), upstream).with_fetch_timeout(fetch_budget);
    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "ticket server listening");
    info!("  GET /health");
    info!("  GET /api/tickets?from_station=&to_station=&date=");
    info!("  GET /api/stations/resolve?q=");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
