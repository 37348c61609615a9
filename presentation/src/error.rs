use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain::profile::ValidationError;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

const INVALID_INPUT: &str = "Invalid input.";
const PIPELINE_FAILED: &str = "A problem occurred while fetching recommendations.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("recommendation pipeline failed: {0:#}")]
    Pipeline(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::InvalidBody(message) => json!({
                "error": INVALID_INPUT,
                "details": { "body": [message] },
            }),
            ApiError::Validation(errors) => json!({
                "error": INVALID_INPUT,
                "details": errors.field_errors,
            }),
            ApiError::Pipeline(err) => json!({
                "error": PIPELINE_FAILED,
                "details": format!("Details: {err:#}"),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, error = %self, "api_error");
        } else {
            warn!(status = %status, error = %self, "rejected request");
        }
        (status, Json(self.body())).into_response()
    }
}
