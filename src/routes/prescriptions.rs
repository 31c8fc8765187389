use crate::{
    error::Result, models::treatment::CreatePrescriptionRequest, state::AppState,
};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_prescription))
        .route("/", get(list_prescriptions))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    patient_id: Option<String>,
    doctor_id: Option<String>,
}

async fn create_prescription(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePrescriptionRequest>,
) -> Result<Json<Value>> {
    let receipt = state
        .prescription_service
        .create_prescription(request)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": receipt
    })))
}

async fn list_prescriptions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>> {
    let prescriptions = state
        .prescription_service
        .list_prescriptions(params.patient_id.as_deref(), params.doctor_id.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": prescriptions
    })))
}
