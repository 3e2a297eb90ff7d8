use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::pipeline::error::PipelineError;
use crate::pipeline::trigger::{DocumentRef, StorageEvent};
use crate::pipeline::ProcessOutcome;
use crate::state::AppState;

/// POST /api/v1/events/storage
/// Bucket notification webhook: one created object, one pipeline run.
pub async fn handle_storage_event(
    State(state): State<AppState>,
    payload: Result<Json<StorageEvent>, JsonRejection>,
) -> Result<Json<ProcessOutcome>, AppError> {
    let Json(event) = payload.map_err(|rejection| {
        PipelineError::MalformedEvent(format!(
            "error parsing storage event: {}",
            rejection.body_text()
        ))
    })?;
    let doc = DocumentRef::from_event(&event)?;
    let outcome = state.pipeline.process(&doc).await?;
    Ok(Json(outcome))
}
