//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::query::{QueryError, QueryInput, QueryStage};
use crate::stations::StationNotFound;
use crate::upstream::TicketSource;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: TicketSource + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/tickets", get(search_tickets::<S>))
        .route("/api/stations/resolve", get(resolve_station::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search for tickets between two stations on a date.
async fn search_tickets<S>(
    State(state): State<AppState<S>>,
    Query(req): Query<TicketSearchRequest>,
) -> Result<Json<TicketSearchResponse>, AppError>
where
    S: TicketSource + Send + Sync + 'static,
{
    let input = QueryInput::from(req);
    let tickets = state.service.query(&input).await?;

    Ok(Json(TicketSearchResponse {
        tickets: tickets.iter().map(TicketResult::from).collect(),
    }))
}

/// Resolve a station name or code.
async fn resolve_station<S>(
    State(state): State<AppState<S>>,
    Query(req): Query<StationResolveRequest>,
) -> Result<Json<StationResolveResponse>, AppError>
where
    S: TicketSource + Send + Sync + 'static,
{
    let registry = state.service.registry();
    let code = registry.resolve(&req.q)?;
    let name = registry.name_of(code.as_str()).map(String::from);

    Ok(Json(StationResolveResponse {
        code: code.to_string(),
        name,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
        stage: Option<QueryStage>,
    },
    NotFound {
        message: String,
        stage: Option<QueryStage>,
    },
    BadGateway {
        message: String,
        stage: Option<QueryStage>,
    },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        let message = e.to_string();
        let stage = Some(e.stage());
        match e {
            QueryError::Validation { .. } => AppError::BadRequest { message, stage },
            QueryError::StationNotFound(_) | QueryError::NoTicketsFound { .. } => {
                AppError::NotFound { message, stage }
            }
            QueryError::Upstream(_) => AppError::BadGateway { message, stage },
        }
    }
}

impl From<StationNotFound> for AppError {
    fn from(e: StationNotFound) -> Self {
        AppError::NotFound {
            message: e.to_string(),
            stage: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, stage) = match self {
            AppError::BadRequest { message, stage } => (StatusCode::BAD_REQUEST, message, stage),
            AppError::NotFound { message, stage } => (StatusCode::NOT_FOUND, message, stage),
            AppError::BadGateway { message, stage } => (StatusCode::BAD_GATEWAY, message, stage),
        };

        warn!(%status, error = %message, "request failed");

        let body = Json(ErrorResponse {
            error: message,
            stage,
        });
        (status, body).into_response()
    }
}
