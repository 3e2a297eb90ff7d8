use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::job::JobPostingRow;
use crate::store::JobStore;

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn get_job(&self, job_id: &str) -> Result<Option<JobPostingRow>> {
        Ok(sqlx::query_as::<_, JobPostingRow>(
            "SELECT job_id, title, department, skills, created_at FROM job_postings WHERE job_id = $1",
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}
