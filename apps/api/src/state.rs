use std::sync::Arc;

use crate::pipeline::ResumePipeline;
use crate::store::{CandidateStore, JobStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ResumePipeline,
    pub candidates: Arc<dyn CandidateStore>,
    /// Read-only; job postings are owned by the job-posting service.
    pub jobs: Arc<dyn JobStore>,
}
