//! Storage seams for candidate and job records.
//!
//! The pipeline and read-side handlers only see these traits; `AppState`
//! carries `Arc<dyn CandidateStore>` / `Arc<dyn JobStore>` backed by Postgres.

pub mod candidates;
pub mod jobs;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::candidate::{CandidateRow, CandidateStatus, Enrichment};
use crate::models::job::JobPostingRow;

pub use candidates::PgCandidateStore;
pub use jobs::PgJobStore;

#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// All records whose `filename` equals `filename`, oldest first.
    async fn find_by_filename(&self, filename: &str) -> Result<Vec<CandidateRow>>;

    /// Writes the enrichment fields and the conditional status transition in
    /// one statement. Returns the status after the write, or `None` if the
    /// record no longer exists.
    async fn apply_enrichment(
        &self,
        id: Uuid,
        enrichment: &Enrichment,
    ) -> Result<Option<CandidateStatus>>;

    async fn list_all(&self) -> Result<Vec<CandidateRow>>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn get_job(&self, job_id: &str) -> Result<Option<JobPostingRow>>;
}
