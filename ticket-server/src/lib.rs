//! Train ticket query server.
//!
//! Resolves station names against the upstream station registry, queries
//! the upstream ticket endpoint, and decodes its positional records into
//! typed tickets with per-class seat availability and fares.

pub mod config;
pub mod domain;
pub mod query;
pub mod stations;
pub mod upstream;
pub mod web;
