//! Blog endpoints, keyed by slug

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{BlogPost, BlogRepo};
use crate::http::error::ApiError;
use crate::http::extractors::AdminToken;
use crate::http::server::AppState;
use crate::models::{Paginated, Pagination, Slug};

#[derive(Deserialize)]
pub struct CreatePostRequest {
    /// Explicit slug; derived from the title when omitted
    pub slug: Option<String>,
    pub title: String,
    pub body: Option<String>,
    pub author_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub body: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Serialize)]
pub struct PostResponse {
    pub slug: String,
    pub title: String,
    pub body: Option<String>,
    pub author_id: Option<i64>,
    pub published: bool,
    pub published_at: Option<String>,
    pub created_at: String,
}

impl From<BlogPost> for PostResponse {
    fn from(p: BlogPost) -> Self {
        Self {
            slug: p.slug,
            title: p.title,
            body: p.body,
            author_id: p.author_id,
            published: p.published,
            published_at: p.published_at.map(|t| t.to_rfc3339()),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct BlogListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Hide drafts when true
    pub published: Option<bool>,
}

/// GET /blog
async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BlogListParams>,
) -> Result<Json<Paginated<PostResponse>>, ApiError> {
    let page = Pagination::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(Pagination::default().per_page),
    );
    let result = BlogRepo::new(&state.pool)
        .list(page, params.published.unwrap_or(false))
        .await?;
    Ok(Json(result.map(PostResponse::from)))
}

/// POST /blog - admin only
async fn create_post(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let slug = match &req.slug {
        Some(s) => Slug::new(s)?,
        None => Slug::from_title(&req.title)?,
    };
    let post = BlogRepo::new(&state.pool)
        .create(&slug, &req.title, req.body.as_deref(), req.author_id)
        .await?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// GET /blog/{slug}
async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = BlogRepo::new(&state.pool).get(&slug).await?;
    Ok(Json(PostResponse::from(post)))
}

/// PUT /blog/{slug} - admin only
async fn update_post(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = BlogRepo::new(&state.pool)
        .update(&slug, &req.title, req.body.as_deref(), req.published)
        .await?;
    Ok(Json(PostResponse::from(post)))
}

/// DELETE /blog/{slug} - admin only
async fn delete_post(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    BlogRepo::new(&state.pool).delete(&slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Blog routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/blog", get(list_posts).post(create_post))
        .route(
            "/blog/{slug}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
