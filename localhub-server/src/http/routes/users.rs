//! User endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AdminToken, ValidId};
use crate::http::server::AppState;
use crate::models::{EmailAddress, Paginated, Pagination, PaginationParams};

#[derive(Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// GET /users - list users with pagination
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<UserResponse>>, ApiError> {
    let page = Pagination::from(params);
    let result = UserRepo::new(&state.pool).list(page).await?;
    Ok(Json(result.map(UserResponse::from)))
}

/// POST /users - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let email = EmailAddress::new(&req.email)?;
    let user = UserRepo::new(&state.pool).create(&req.name, &email).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /users/{id} - admin only
async fn update_user(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Json(req): Json<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let email = EmailAddress::new(&req.email)?;
    let user = UserRepo::new(&state.pool)
        .update(id, &req.name, &email)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{id} - admin only
async fn delete_user(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
