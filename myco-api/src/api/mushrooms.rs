//! Mushroom catalog endpoints
//!
//! Read-only: the catalog is only ever written by seeding.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use myco_common::Mushroom;
use serde::Serialize;

use super::route_not_found;
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct MushroomsResponse {
    pub mushrooms: Vec<Mushroom>,
}

/// GET /api/mushrooms
pub async fn list_mushrooms(State(state): State<AppState>) -> ApiResult<Json<MushroomsResponse>> {
    let mushrooms = state.store.list_mushrooms().await?;
    Ok(Json(MushroomsResponse { mushrooms }))
}

/// GET /api/mushrooms/:name
///
/// Exact, case-sensitive match on `commonName`. No match is a 400.
pub async fn get_mushrooms_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<MushroomsResponse>> {
    let mushrooms = state
        .store
        .find_mushrooms_by_name(&name)
        .await
        .map_err(ApiError::absent_as_bad_request)?;

    Ok(Json(MushroomsResponse { mushrooms }))
}

pub fn mushroom_routes() -> Router<AppState> {
    Router::new()
        .route("/api/mushrooms", get(list_mushrooms).fallback(route_not_found))
        .route(
            "/api/mushrooms/:name",
            get(get_mushrooms_by_name).fallback(route_not_found),
        )
}
