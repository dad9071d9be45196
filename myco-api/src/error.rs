//! Error types for myco-api
//!
//! Every failure reaches the client as `{"msg": "..."}` with a fixed,
//! detail-free message; the detail goes to the log.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed id, missing fields, unknown species (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Well-formed id with no matching document (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// No route matched the request path (404)
    #[error("Route does not exist: {0}")]
    RouteNotFound(String),

    /// Concurrent updates exhausted the retry budget (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a store error for routes that report an absent document as 400
    /// (PATCH and DELETE on reports, mushroom lookup by name)
    pub fn absent_as_bad_request(err: myco_common::Error) -> Self {
        match err {
            myco_common::Error::NotFound(what) => ApiError::BadRequest(format!("{} does not exist", what)),
            other => other.into(),
        }
    }
}

impl From<myco_common::Error> for ApiError {
    fn from(err: myco_common::Error) -> Self {
        use myco_common::Error;

        match err {
            Error::InvalidId(_) | Error::Validation(_) | Error::UnknownSpecies(_) => {
                ApiError::BadRequest(err.to_string())
            }
            Error::NotFound(what) => ApiError::NotFound(what),
            Error::Conflict(msg) => ApiError::Conflict(msg),
            Error::Database(_) | Error::Serialization(_) | Error::Io(_) | Error::Config(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            ApiError::RouteNotFound(_) => (StatusCode::NOT_FOUND, "Route Does Not Exist"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }

        (status, Json(json!({ "msg": message }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
