//! Route modules, one per entity, merged under `/api`.

pub mod admin;
pub mod blog;
pub mod businesses;
pub mod directory;
pub mod events;
pub mod health;
pub mod newsletter;
pub mod settings;
pub mod templates;
pub mod users;

use std::sync::Arc;

use axum::Router;

use super::server::AppState;

/// Everything under `/api`.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(businesses::router())
        .merge(events::router())
        .merge(blog::router())
        .merge(directory::router())
        .merge(templates::router())
        .merge(settings::router())
        .merge(newsletter::router())
        .merge(admin::router())
}
