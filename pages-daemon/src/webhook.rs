//! Webhook intake for push notifications
//!
//! One route matters: `POST /webhook` with a bearer token and the push
//! event JSON. A valid request runs single-repository reconciliation and
//! returns 204 whatever the internal outcome; the notifier cannot act on
//! granular failure anyway.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use pages_core::{RepoName, SyncEngine};

/// Shared state for the webhook handlers
#[derive(Clone)]
pub struct AppState {
    /// The reconciliation engine
    pub engine: Arc<SyncEngine>,
    /// Shared secret expected as `Bearer <token>`
    pub token: String,
}

/// Repository section of a push event
#[derive(Debug, Deserialize)]
pub struct EventRepository {
    /// Two-segment `owner/name` identifier
    pub full_name: String,
}

/// The push event payload sent by the forge
#[derive(Debug, Deserialize)]
pub struct PushEvent {
    /// The repository that was pushed to
    pub repository: EventRepository,
}

/// Build the webhook router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/webhook", post(webhook_handler))
        .with_state(state)
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}

/// Exact string comparison of the Authorization header against the secret
fn authorized(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {}", token))
}

/// Token first, body second: an unauthenticated request is answered 401
/// before its payload is even parsed.
async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    if !authorized(&headers, &state.token) {
        return StatusCode::UNAUTHORIZED;
    }

    let event: PushEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting webhook with malformed body");
            return StatusCode::BAD_REQUEST;
        }
    };

    let name = match RepoName::parse(&event.repository.full_name) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting webhook with malformed repository name");
            return StatusCode::BAD_REQUEST;
        }
    };

    tracing::info!(repo = %name, "received push webhook");
    state.engine.sync_repo(&name).await;

    StatusCode::NO_CONTENT
}
