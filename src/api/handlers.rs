use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{RecommendationReport, UserContext},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub age: u32,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Runs one recommendation pipeline for the posted child profile
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationReport>> {
    let context = UserContext::for_config(request.age, &request.interests, &request.platforms, &state.config)?;

    tracing::info!(request_id = %request_id, age = context.age(), "Recommendation requested");

    let report = state.recommender.recommend(&context).await;
    Ok(Json(report))
}
