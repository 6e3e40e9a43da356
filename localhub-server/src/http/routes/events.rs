//! Event endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Event, EventInput, EventRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AdminToken, ValidId};
use crate::http::server::AppState;
use crate::models::{Paginated, Pagination};

#[derive(Deserialize)]
pub struct EventRequest {
    pub business_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
}

impl EventRequest {
    fn into_input(self) -> EventInput {
        EventInput {
            business_id: self.business_id,
            title: self.title,
            description: self.description,
            location: self.location,
            starts_at: self.starts_at,
        }
    }
}

#[derive(Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub uuid: String,
    pub business_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: String,
    pub created_at: String,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            uuid: e.uuid,
            business_id: e.business_id,
            title: e.title,
            description: e.description,
            location: e.location,
            starts_at: e.starts_at.to_rfc3339(),
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct EventListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Only events that haven't started yet
    pub upcoming: Option<bool>,
}

/// GET /events
async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventListParams>,
) -> Result<Json<Paginated<EventResponse>>, ApiError> {
    let page = Pagination::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(Pagination::default().per_page),
    );
    let result = EventRepo::new(&state.pool)
        .list(page, params.upcoming.unwrap_or(false))
        .await?;
    Ok(Json(result.map(EventResponse::from)))
}

/// POST /events
async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let event = EventRepo::new(&state.pool).create(&req.into_input()).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// GET /events/{id}
async fn get_event(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<EventResponse>, ApiError> {
    let event = EventRepo::new(&state.pool).get(id).await?;
    Ok(Json(EventResponse::from(event)))
}

/// PUT /events/{id} - admin only
async fn update_event(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Json(req): Json<EventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = EventRepo::new(&state.pool)
        .update(id, &req.into_input())
        .await?;
    Ok(Json(EventResponse::from(event)))
}

/// DELETE /events/{id} - admin only
async fn delete_event(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    EventRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Event routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}
