//! Web layer for the ticket query service.
//!
//! Provides JSON endpoints for ticket search and station resolution.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
