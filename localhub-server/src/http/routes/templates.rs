//! Template metadata endpoints.
//!
//! The HTML files themselves are served from the static root; these
//! routes only manage the metadata rows.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Template, TemplateRepo};
use crate::http::error::ApiError;
use crate::http::extractors::AdminToken;
use crate::http::server::AppState;
use crate::models::Slug;

#[derive(Deserialize)]
pub struct TemplateRequest {
    pub name: String,
    pub path: String,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct TemplateResponse {
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub updated_at: String,
}

impl From<Template> for TemplateResponse {
    fn from(t: Template) -> Self {
        Self {
            name: t.name,
            path: t.path,
            description: t.description,
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

/// GET /templates
async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemplateResponse>>, ApiError> {
    let templates = TemplateRepo::new(&state.pool).list().await?;
    Ok(Json(
        templates.into_iter().map(TemplateResponse::from).collect(),
    ))
}

/// POST /templates - admin only
async fn create_template(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Json(req): Json<TemplateRequest>,
) -> Result<(StatusCode, Json<TemplateResponse>), ApiError> {
    let name = Slug::new(&req.name)?;
    let template = TemplateRepo::new(&state.pool)
        .create(&name, &req.path, req.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(TemplateResponse::from(template))))
}

/// GET /templates/{name}
async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let template = TemplateRepo::new(&state.pool).get(&name).await?;
    Ok(Json(TemplateResponse::from(template)))
}

/// PUT /templates/{name} - admin only
async fn update_template(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let template = TemplateRepo::new(&state.pool)
        .update(&name, &req.path, req.description.as_deref())
        .await?;
    Ok(Json(TemplateResponse::from(template)))
}

/// DELETE /templates/{name} - admin only
async fn delete_template(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    TemplateRepo::new(&state.pool).delete(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Template routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route(
            "/templates/{name}",
            get(get_template)
                .put(update_template)
                .delete(delete_template),
        )
}
