use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An open role. Owned by the job-posting service; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub job_id: String,
    pub title: String,
    pub department: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}
