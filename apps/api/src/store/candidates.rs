use anyhow::Result;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::candidate::{CandidateRow, CandidateStatus, Enrichment};
use crate::store::CandidateStore;

#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn find_by_filename(&self, filename: &str) -> Result<Vec<CandidateRow>> {
        Ok(sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates WHERE filename = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(filename)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn apply_enrichment(
        &self,
        id: Uuid,
        enrichment: &Enrichment,
    ) -> Result<Option<CandidateStatus>> {
        // Single statement: text, entities, skills and status land together or not at all.
        let status: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE candidates
            SET extracted_text = $2,
                entities = $3,
                skills = $4,
                status = CASE WHEN status IN ($5, $6) THEN $6 ELSE status END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING status
            "#,
        )
        .bind(id)
        .bind(&enrichment.extracted_text)
        .bind(Json(&enrichment.entities))
        .bind(&enrichment.skills)
        .bind(CandidateStatus::Uploaded.as_str())
        .bind(CandidateStatus::UnderReview.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(status.map(CandidateStatus::from))
    }

    async fn list_all(&self) -> Result<Vec<CandidateRow>> {
        Ok(sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }
}
