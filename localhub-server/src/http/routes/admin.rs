//! Admin endpoints: dashboard statistics and duplicate management.
//!
//! Everything here requires the bearer token guard.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{DashboardRepo, DashboardStats, DirectoryRepo, DuplicateGroup};
use crate::http::error::ApiError;
use crate::http::extractors::{AdminToken, ValidKind};
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub counts: DashboardStats,
    pub directory_total: i64,
}

#[derive(Serialize)]
pub struct DuplicatesResponse {
    pub kind: String,
    pub groups: Vec<DuplicateGroup>,
}

#[derive(Serialize)]
pub struct PurgeResponse {
    pub kind: String,
    pub removed: u64,
}

/// GET /admin/stats - row counts per entity table
async fn dashboard_stats(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let counts = DashboardRepo::new(&state.pool).collect().await?;
    let directory_total = counts.directory_total();
    Ok(Json(StatsResponse {
        counts,
        directory_total,
    }))
}

/// GET /admin/duplicates/{kind} - duplicate (name, organization) groups
async fn list_duplicates(
    _admin: AdminToken,
    ValidKind(kind): ValidKind,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DuplicatesResponse>, ApiError> {
    let groups = DirectoryRepo::new(&state.pool, kind)
        .find_duplicates()
        .await?;
    Ok(Json(DuplicatesResponse {
        kind: kind.as_str().to_owned(),
        groups,
    }))
}

/// POST /admin/duplicates/{kind}/purge - remove duplicates, keep lowest id
async fn purge_duplicates(
    _admin: AdminToken,
    ValidKind(kind): ValidKind,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PurgeResponse>, ApiError> {
    let removed = DirectoryRepo::new(&state.pool, kind)
        .remove_duplicates()
        .await?;
    Ok(Json(PurgeResponse {
        kind: kind.as_str().to_owned(),
        removed,
    }))
}

/// Admin routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/stats", get(dashboard_stats))
        .route("/admin/duplicates/{kind}", get(list_duplicates))
        .route("/admin/duplicates/{kind}/purge", post(purge_duplicates))
}
