//! Newsletter subscription endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::NewsletterRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::EmailAddress;

#[derive(Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Serialize)]
pub struct SubscribeResponse {
    pub email: String,
    /// True when the address was already on the list
    pub already_subscribed: bool,
}

/// POST /newsletter/subscribe
///
/// Subscribing twice is not an error; the response says which case hit.
async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, ApiError> {
    let email = EmailAddress::new(&req.email)?;
    let newly_subscribed = NewsletterRepo::new(&state.pool).subscribe(&email).await?;

    Ok(Json(SubscribeResponse {
        email: email.into_string(),
        already_subscribed: !newly_subscribed,
    }))
}

/// POST /newsletter/unsubscribe - 404 if the address isn't on the list
async fn unsubscribe(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubscribeRequest>,
) -> Result<axum::http::StatusCode, ApiError> {
    let email = EmailAddress::new(&req.email)?;
    NewsletterRepo::new(&state.pool).unsubscribe(&email).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Newsletter routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/newsletter/subscribe", post(subscribe))
        .route("/newsletter/unsubscribe", post(unsubscribe))
}
