//! Application state for the web layer.

use std::sync::Arc;

use crate::query::TicketService;
use crate::upstream::TicketSource;

/// Shared application state.
pub struct AppState<S> {
    /// Ticket query service, including the station registry
    pub service: Arc<TicketService<S>>,
}

impl<S: TicketSource> AppState<S> {
    /// Create a new app state.
    pub fn new(service: TicketService<S>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// Manual impl: deriving would require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
