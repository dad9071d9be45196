//! HTTP API handlers for myco-api

pub mod health;
pub mod mushrooms;
pub mod reports;

pub use health::health_routes;
pub use mushrooms::mushroom_routes;
pub use reports::report_routes;

use axum::http::Uri;

use crate::ApiError;

/// Fallback for every path no route claims, and for known paths hit
/// with a method they do not serve
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
