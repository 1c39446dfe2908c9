//! HTTP API
//!
//! | Module | Routes |
//! |--------|--------|
//! | health | `GET /health` |
//! | raffle | `GET /api/raffle/current`, `POST /api/raffle/draw`, `GET /api/raffle/winners` |
//! | register | `POST /api/register` |
//! | stats | `GET /api/stats` |
//! | raffles | `GET /api/raffles`, `GET /api/raffles/{id}` |
//! | participations | `POST /api/participations` |
//! | users | `GET /api/users/{id}` |
//! | prizes | `GET /api/prizes` |
//!
//! Admin actions carry `adminKey` in the JSON body; see [`require_admin`].

pub mod health;
pub mod participations;
pub mod prizes;
pub mod raffle;
pub mod raffles;
pub mod register;
pub mod stats;
pub mod users;

use axum::Router;
use http::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public landing page API
        .merge(raffle::router())
        .merge(register::router())
        .merge(stats::router())
        .merge(prizes::router())
        // History and detail views
        .merge(raffles::router())
        .merge(users::router())
        // Admin-key gated
        .merge(participations::router())
        // Health API - public route
        .merge(health::router())
}

/// Build the application with all middleware
///
/// Used by both the HTTP server and the integration tests
pub fn build_app() -> Router<ServerState> {
    build_router()
        // CORS - the marketing site is served from another origin
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - outermost, so the trace span sees it
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}

/// Reject unless `key` is the configured admin key (401)
pub fn require_admin(state: &ServerState, key: Option<&str>) -> AppResult<()> {
    if state.is_admin_key(key) {
        return Ok(());
    }
    tracing::warn!(target: "security", "Rejected admin request with invalid key");
    Err(AppError::new(ErrorCode::InvalidAdminKey))
}

/// Check `adminKey` on the raw body, then decode the rest of it.
///
/// A malformed field never reaches the caller ahead of the 401.
pub fn admin_payload<T: DeserializeOwned>(state: &ServerState, body: Value) -> AppResult<T> {
    let key = body.get("adminKey").and_then(Value::as_str);
    require_admin(state, key)?;
    serde_json::from_value(body).map_err(|e| {
        AppError::invalid_request("Solicitud inválida").with_detail("reason", e.to_string())
    })
}
