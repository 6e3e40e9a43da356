//! Business endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Business, BusinessInput, BusinessRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AdminToken, ValidId};
use crate::http::server::AppState;
use crate::models::{Paginated, Pagination};

#[derive(Deserialize)]
pub struct BusinessRequest {
    pub name: String,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

impl BusinessRequest {
    fn into_input(self) -> BusinessInput {
        BusinessInput {
            name: self.name,
            category: self.category,
            phone: self.phone,
            address: self.address,
            website: self.website,
            description: self.description,
        }
    }
}

#[derive(Serialize)]
pub struct BusinessResponse {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<Business> for BusinessResponse {
    fn from(b: Business) -> Self {
        Self {
            id: b.id,
            uuid: b.uuid,
            name: b.name,
            category: b.category,
            phone: b.phone,
            address: b.address,
            website: b.website,
            description: b.description,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct BusinessListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category: Option<String>,
}

/// GET /businesses - list with optional category filter
async fn list_businesses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BusinessListParams>,
) -> Result<Json<Paginated<BusinessResponse>>, ApiError> {
    let page = Pagination::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(Pagination::default().per_page),
    );
    let result = BusinessRepo::new(&state.pool)
        .list(page, params.category.as_deref())
        .await?;
    Ok(Json(result.map(BusinessResponse::from)))
}

/// POST /businesses - create, assigning a v4 UUID
async fn create_business(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BusinessRequest>,
) -> Result<(StatusCode, Json<BusinessResponse>), ApiError> {
    let business = BusinessRepo::new(&state.pool)
        .create(&req.into_input())
        .await?;
    Ok((StatusCode::CREATED, Json(BusinessResponse::from(business))))
}

/// GET /businesses/{id} - numeric id or UUID
async fn get_business(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<BusinessResponse>, ApiError> {
    let repo = BusinessRepo::new(&state.pool);
    let business = match key.parse::<i64>() {
        Ok(id) => repo.get(id).await?,
        Err(_) => repo.get_by_uuid(&key).await?,
    };
    Ok(Json(BusinessResponse::from(business)))
}

/// PUT /businesses/{id} - admin only
async fn update_business(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Json(req): Json<BusinessRequest>,
) -> Result<Json<BusinessResponse>, ApiError> {
    let business = BusinessRepo::new(&state.pool)
        .update(id, &req.into_input())
        .await?;
    Ok(Json(BusinessResponse::from(business)))
}

/// DELETE /businesses/{id} - admin only, cascades to events
async fn delete_business(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    BusinessRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Business routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/businesses", get(list_businesses).post(create_business))
        .route(
            "/businesses/{id}",
            get(get_business)
                .put(update_business)
                .delete(delete_business),
        )
}
