//! myco-api library - HTTP surface for the mushroom catalog and sighting reports

use axum::Router;
use myco_common::Store;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Document store (injected; owns the connection pool)
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Build application router
///
/// Unmatched paths, and unsupported methods on matched ones, answer 404
/// `{"msg": "Route Does Not Exist"}`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::mushroom_routes())
        .merge(api::report_routes())
        .merge(api::health_routes())
        .fallback(api::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
