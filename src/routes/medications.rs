use crate::{error::Result, state::AppState};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lookup", get(lookup_medication))
        .route("/adverse-effects", get(adverse_effects))
        .route("/interactions", get(check_interactions))
}

#[derive(Debug, Deserialize)]
struct LookupParams {
    name: String,
    #[serde(default)]
    translate: bool,
}

#[derive(Debug, Deserialize)]
struct InteractionParams {
    med_a: String,
    med_b: String,
    #[serde(default)]
    translate: bool,
}

async fn lookup_medication(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>> {
    let info = state
        .drug_info_service
        .lookup(&params.name, params.translate)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": info
    })))
}

async fn adverse_effects(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>> {
    let report = state
        .drug_info_service
        .adverse_effects(&params.name, params.translate)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": report
    })))
}

async fn check_interactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InteractionParams>,
) -> Result<Json<Value>> {
    let report = state
        .interaction_service
        .find_interaction(&params.med_a, &params.med_b, params.translate)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": report
    })))
}
