//! # ledger-server: HTTP API for the Fuel Ledger
//!
//! Exposes the Request Boundary ([`service::LedgerService`]) over JSON/HTTP
//! for the browser UI.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fuel Ledger Server                               │
//! │                                                                         │
//! │  Browser UI ───► axum (3000) ───► LedgerService ───► SQLite (WAL)       │
//! │                    │                   │                                │
//! │              TraceLayer           ledger-core                           │
//! │              CorsLayer       (validate, calculate,                      │
//! │                                filter, aggregate)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Environment configuration
//! - [`error`] - `ApiError` and its HTTP mapping
//! - [`service`] - The Request Boundary
//! - [`state`] - Shared handler state
//! - [`routes`] - Route table and handlers

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use service::{LedgerService, Mutation};
pub use state::AppState;

/// Builds the application router with tracing and, optionally, a CORS
/// layer that allows any origin.
pub fn router(state: AppState, cors_permissive: bool) -> Router {
    let app = routes::api_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)));

    if cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ledger=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
