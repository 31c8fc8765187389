use crate::{
    error::Result, models::adherence::RecordAdherencePeriodRequest, state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(record_period))
        .route("/patient/:patient_id", get(patient_history))
}

async fn record_period(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordAdherencePeriodRequest>,
) -> Result<Json<Value>> {
    let record = state.adherence_service.record_period(request).await?;

    Ok(Json(json!({
        "success": true,
        "data": record
    })))
}

async fn patient_history(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>> {
    let records = state
        .adherence_service
        .history_for_patient(&patient_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": records
    })))
}
