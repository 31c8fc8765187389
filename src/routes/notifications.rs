use crate::{
    error::Result, models::notification::CreateNotificationRequest, state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_notification))
        .route("/unread", get(unread_notifications))
        .route("/reminders/pending", get(pending_reminders))
        .route("/:id/sent", post(mark_sent))
        .route("/:id/read", post(mark_read))
        .route("/:id/failed", post(mark_failed))
}

#[derive(Debug, Deserialize)]
struct UserParams {
    user_id: String,
}

async fn create_notification(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<Json<Value>> {
    let notification = state.notification_service.create(request).await?;

    Ok(Json(json!({
        "success": true,
        "data": notification
    })))
}

async fn unread_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserParams>,
) -> Result<Json<Value>> {
    let notifications = state
        .notification_service
        .unread_for_user(&params.user_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": notifications
    })))
}

async fn pending_reminders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserParams>,
) -> Result<Json<Value>> {
    let reminders = state
        .notification_service
        .pending_reminders_for_user(&params.user_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": reminders
    })))
}

async fn mark_sent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let notification = state.notification_service.mark_sent(&id).await?;

    Ok(Json(json!({
        "success": true,
        "data": notification
    })))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let notification = state.notification_service.mark_read(&id).await?;

    Ok(Json(json!({
        "success": true,
        "data": notification
    })))
}

async fn mark_failed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let notification = state.notification_service.mark_failed(&id).await?;

    Ok(Json(json!({
        "success": true,
        "data": notification
    })))
}
