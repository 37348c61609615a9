use crate::error::ApiError;
use application::RecommendationService;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use domain::profile::UserProfile;
use domain::recommendation::LabRecommendation;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecommendationService>,
}

impl AppState {
    pub fn new(service: RecommendationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/recommendations", post(recommend))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// The body is parsed by hand so malformed JSON gets the same JSON error
/// shape as a failed validation.
async fn recommend(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<LabRecommendation>>, ApiError> {
    let value: Value = serde_json::from_slice(&body)
        .map_err(|err| ApiError::InvalidBody(format!("request body is not valid JSON: {err}")))?;
    if !value.is_object() {
        return Err(ApiError::InvalidBody(
            "request body must be a JSON object".to_string(),
        ));
    }

    let profile = UserProfile::from_json(&value)?;
    let labs = state.service.recommend(&profile).await?;
    info!(count = labs.len(), "recommendations returned");
    Ok(Json(labs))
}
