use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::error::PipelineError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Pipeline(e) => {
                let status = pipeline_status(e);
                if status.is_server_error() {
                    tracing::error!("Pipeline error: {e}");
                    (status, e.code(), generic_message(e).to_string())
                } else {
                    (status, e.code(), e.to_string())
                }
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn pipeline_status(e: &PipelineError) -> StatusCode {
    match e {
        PipelineError::MalformedEvent(_)
        | PipelineError::UnsupportedFormat(_)
        | PipelineError::EmptyDocument(_) => StatusCode::BAD_REQUEST,
        PipelineError::CandidateNotFound(_) => StatusCode::NOT_FOUND,
        PipelineError::ExtractionService(_)
        | PipelineError::NlpService(_)
        | PipelineError::StorageRead(_)
        | PipelineError::StorageWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Upstream details stay in the logs.
fn generic_message(e: &PipelineError) -> &'static str {
    match e {
        PipelineError::ExtractionService(_) => "Text extraction failed",
        PipelineError::NlpService(_) => "Language analysis failed",
        PipelineError::StorageRead(_) | PipelineError::StorageWrite(_) => {
            "A storage error occurred"
        }
        _ => "An internal server error occurred",
    }
}
