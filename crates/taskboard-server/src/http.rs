//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use taskboard_core::Notification;

use crate::activity::TaskActivity;
use crate::session::SessionUser;
use crate::store::StoreError;
use crate::AppState;

/// Body of every error response: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// All notifications for the session user, newest first
pub async fn get_notifications(
    State(state): State<Arc<AppState>>,
    SessionUser(user): SessionUser,
) -> Json<Vec<Notification>> {
    let store = state.store.read().await;
    let notifications = store.notifications_for(user.id);
    tracing::debug!(
        "Serving {} notifications to {}",
        notifications.len(),
        user.username
    );
    Json(notifications)
}

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    pub name: Option<String>,
}

/// Usernames containing the `name` query parameter
pub async fn get_users(
    State(state): State<Arc<AppState>>,
    _session: SessionUser,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Vec<String>>, ErrorResponse> {
    let name = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Missing \"name\" parameter"))?;

    let store = state.store.read().await;
    Ok(Json(store.search_users(name)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub notified: usize,
}

/// Record task activity by the session user and notify the people involved
pub async fn record_activity(
    State(state): State<Arc<AppState>>,
    SessionUser(actor): SessionUser,
    Json(activity): Json<TaskActivity>,
) -> Result<Json<ActivityResponse>, ErrorResponse> {
    let deliveries = activity.deliveries(&actor.username);

    let mut store = state.store.write().await;

    // Resolve every recipient before writing so an unknown user leaves no partial fan-out
    let mut resolved = Vec::with_capacity(deliveries.len());
    for delivery in deliveries {
        let user = store
            .user_by_name(&delivery.recipient)
            .ok_or_else(|| StoreError::UnknownUser(delivery.recipient.clone()))
            .map_err(|e| error_response(StatusCode::NOT_FOUND, e.to_string()))?;
        resolved.push((user.id, delivery.text));
    }

    let notified = resolved.len();
    for (user_id, text) in resolved {
        store.notify(user_id, activity.task_id.clone(), text);
    }

    tracing::info!(
        "{} {:?} task {}: {} notified",
        actor.username,
        activity.kind,
        activity.task_id,
        notified
    );
    Ok(Json(ActivityResponse { notified }))
}
