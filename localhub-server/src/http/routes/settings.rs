//! Admin-maintained settings endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Setting, SettingsRepo};
use crate::http::error::ApiError;
use crate::http::extractors::AdminToken;
use crate::http::server::AppState;

#[derive(Deserialize)]
pub struct SettingRequest {
    pub value: String,
}

#[derive(Serialize)]
pub struct SettingResponse {
    pub name: String,
    pub value: Option<String>,
    pub updated_at: String,
}

impl From<Setting> for SettingResponse {
    fn from(s: Setting) -> Self {
        Self {
            name: s.name,
            value: s.value,
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

/// GET /settings
async fn list_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SettingResponse>>, ApiError> {
    let settings = SettingsRepo::new(&state.pool).list().await?;
    Ok(Json(
        settings.into_iter().map(SettingResponse::from).collect(),
    ))
}

/// GET /settings/{name}
async fn get_setting(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<SettingResponse>, ApiError> {
    let setting = SettingsRepo::new(&state.pool).get(&name).await?;
    Ok(Json(SettingResponse::from(setting)))
}

/// PUT /settings/{name} - admin only, upsert
async fn put_setting(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<SettingRequest>,
) -> Result<Json<SettingResponse>, ApiError> {
    let setting = SettingsRepo::new(&state.pool)
        .upsert(&name, &req.value)
        .await?;
    Ok(Json(SettingResponse::from(setting)))
}

/// Settings routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/settings", get(list_settings))
        .route("/settings/{name}", get(get_setting).put(put_setting))
}
