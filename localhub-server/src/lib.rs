//! localhub-server: HTTP API over the LocalHub schema
//!
//! Exposes CRUD routes for users, businesses, events, blog posts,
//! directory listings, templates, newsletter subscriptions, and
//! admin-maintained settings, plus the admin dashboard statistics and
//! directory duplicate-management endpoints.

pub mod db;
pub mod http;
pub mod models;

pub use http::server::{run_server, AppState, ServerConfig};
