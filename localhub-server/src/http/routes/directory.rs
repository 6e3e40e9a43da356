//! Directory listing endpoints.
//!
//! `/directory/{kind}` where kind is members | partners | businesses.
//! The count endpoint exists so the reconcile tooling can diff API
//! numbers against raw table counts.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{DirectoryEntry, DirectoryEntryInput, DirectoryRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidKind;
use crate::http::server::AppState;
use crate::models::{Paginated, Pagination, PaginationParams};

#[derive(Deserialize)]
pub struct DirectoryEntryRequest {
    pub name: String,
    #[serde(default)]
    pub organization: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

#[derive(Serialize)]
pub struct DirectoryEntryResponse {
    pub id: i64,
    pub name: String,
    pub organization: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub created_at: String,
}

impl From<DirectoryEntry> for DirectoryEntryResponse {
    fn from(e: DirectoryEntry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            organization: e.organization,
            email: e.email,
            phone: e.phone,
            website: e.website,
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct CountResponse {
    pub kind: String,
    pub count: i64,
}

/// GET /directory/{kind}
async fn list_entries(
    ValidKind(kind): ValidKind,
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<DirectoryEntryResponse>>, ApiError> {
    let page = Pagination::from(params);
    let result = DirectoryRepo::new(&state.pool, kind).list(page).await?;
    Ok(Json(result.map(DirectoryEntryResponse::from)))
}

/// POST /directory/{kind} - 409 on (name, organization) conflict
async fn create_entry(
    ValidKind(kind): ValidKind,
    State(state): State<Arc<AppState>>,
    Json(req): Json<DirectoryEntryRequest>,
) -> Result<(StatusCode, Json<DirectoryEntryResponse>), ApiError> {
    let entry = DirectoryRepo::new(&state.pool, kind)
        .create(&DirectoryEntryInput {
            name: req.name,
            organization: req.organization,
            email: req.email,
            phone: req.phone,
            website: req.website,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(DirectoryEntryResponse::from(entry)),
    ))
}

/// GET /directory/{kind}/count - raw table count
async fn count_entries(
    ValidKind(kind): ValidKind,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = DirectoryRepo::new(&state.pool, kind).count().await?;
    Ok(Json(CountResponse {
        kind: kind.as_str().to_owned(),
        count,
    }))
}

/// Directory routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/directory/{kind}", get(list_entries).post(create_entry))
        .route("/directory/{kind}/count", get(count_entries))
}
