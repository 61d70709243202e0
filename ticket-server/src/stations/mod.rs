//! Station registry and identifier resolution.
//!
//! Provides the name ↔ code mapping decoded from the upstream
//! `station_name` blob, loaded from disk or fetched over HTTP at startup.

mod client;
mod error;
mod registry;

pub use client::{DEFAULT_REGISTRY_URL, StationClient, StationClientConfig};
pub use error::{StationError, StationNotFound};
pub use registry::StationRegistry;
