use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::matching::scorer::{score_skills, MatchResult};
use crate::models::candidate::{CandidateRow, CandidateStatus};
use crate::models::entities::GroupedEntities;
use crate::models::job::JobPostingRow;
use crate::store::{CandidateStore, JobStore};

/// One candidate as shown to reviewers: profile, grouped entities, the
/// department of the job applied for, and optionally the skill match.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateListing {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub work_pref: Option<String>,
    pub experience: Option<String>,
    pub marks12: Option<String>,
    pub pass12: Option<String>,
    pub grad_marks: Option<String>,
    pub grad_year: Option<String>,
    pub linkedin: Option<String>,
    pub resume_url: Option<String>,
    pub status: CandidateStatus,
    pub skills: Vec<String>,
    pub entities: GroupedEntities,
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_result: Option<MatchResult>,
    pub created_at: DateTime<Utc>,
}

impl CandidateListing {
    fn new(row: CandidateRow, job: Option<&JobPostingRow>, include_match: bool) -> Self {
        let status = row.status();
        let entities = row.grouped_entities();
        let skills = row.skills();
        let match_result = job
            .filter(|_| include_match)
            .map(|job| score_skills(&skills, &job.skills));

        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            gender: row.gender,
            address: row.address,
            work_pref: row.work_pref,
            experience: row.experience,
            marks12: row.marks12,
            pass12: row.pass12,
            grad_marks: row.grad_marks,
            grad_year: row.grad_year,
            linkedin: row.linkedin,
            resume_url: row.resume_url,
            status,
            skills,
            entities,
            job_id: row.job_id,
            job_title: row.job_title,
            department: job.and_then(|j| j.department.clone()),
            match_result,
            created_at: row.created_at,
        }
    }
}

/// Full scan of candidates, each decorated with its job's department.
/// Job lookup failures only blank the department; they never fail the listing.
pub async fn list_candidates(
    candidates: &dyn CandidateStore,
    jobs: &dyn JobStore,
    include_match: bool,
) -> Result<Vec<CandidateListing>> {
    let rows = candidates.list_all().await?;
    let mut job_cache: HashMap<String, Option<JobPostingRow>> = HashMap::new();
    let mut listings = Vec::with_capacity(rows.len());

    for row in rows {
        let job_id = row
            .job_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from);

        let job = match job_id {
            Some(job_id) => {
                if !job_cache.contains_key(&job_id) {
                    let fetched = fetch_job(jobs, &job_id).await;
                    job_cache.insert(job_id.clone(), fetched);
                }
                job_cache.get(&job_id).and_then(Option::as_ref)
            }
            None => None,
        };

        listings.push(CandidateListing::new(row, job, include_match));
    }

    debug!("Listed {} candidates", listings.len());
    Ok(listings)
}

async fn fetch_job(jobs: &dyn JobStore, job_id: &str) -> Option<JobPostingRow> {
    match jobs.get_job(job_id).await {
        Ok(Some(job)) => Some(job),
        Ok(None) => {
            debug!("No job posting found for jobId '{job_id}'");
            None
        }
        Err(e) => {
            warn!("Failed to get job posting for jobId '{job_id}': {e:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::fixtures::candidate;
    use crate::store::memory::{MemoryCandidateStore, MemoryJobStore};
    use sqlx::types::Json;

    fn job(id: &str, department: &str, skills: &[&str]) -> JobPostingRow {
        JobPostingRow {
            job_id: id.to_string(),
            title: "Backend Engineer".to_string(),
            department: Some(department.to_string()),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    fn applicant(filename: &str, job_id: Option<&str>, skills: &[&str]) -> CandidateRow {
        let mut row = candidate(filename);
        row.job_id = job_id.map(String::from);
        row.skills = Some(skills.iter().map(|s| Some(s.to_string())).collect());
        row
    }

    fn job_store(jobs: Vec<JobPostingRow>) -> MemoryJobStore {
        MemoryJobStore {
            jobs: jobs.into_iter().map(|j| (j.job_id.clone(), j)).collect(),
            failing_ids: vec![],
        }
    }

    #[tokio::test]
    async fn test_decorates_department_and_match() {
        let candidates = MemoryCandidateStore::with_rows(vec![applicant(
            "uploads/a.pdf",
            Some(" job-1 "),
            &["Python", "sql", "AWS"],
        )]);
        let jobs = job_store(vec![job("job-1", "Engineering", &["python", "Java", "aws"])]);

        let listing = list_candidates(&candidates, &jobs, true).await.unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].department.as_deref(), Some("Engineering"));
        let result = listing[0].match_result.as_ref().unwrap();
        assert_eq!(result.percentage, 66.67);
        assert_eq!(result.matched.len(), 2);
    }

    #[tokio::test]
    async fn test_null_skill_elements_are_skipped() {
        let mut row = applicant("uploads/a.pdf", Some("job-1"), &[]);
        row.skills = Some(vec![Some("Python".to_string()), None]);
        let candidates = MemoryCandidateStore::with_rows(vec![row]);
        let jobs = job_store(vec![job("job-1", "Engineering", &["python", "go"])]);

        let listing = list_candidates(&candidates, &jobs, true).await.unwrap();

        assert_eq!(listing[0].skills, vec!["Python"]);
        assert_eq!(listing[0].match_result.as_ref().unwrap().percentage, 50.0);
    }

    #[tokio::test]
    async fn test_match_omitted_unless_requested() {
        let candidates =
            MemoryCandidateStore::with_rows(vec![applicant("uploads/a.pdf", Some("job-1"), &["Rust"])]);
        let jobs = job_store(vec![job("job-1", "Engineering", &["rust"])]);

        let listing = list_candidates(&candidates, &jobs, false).await.unwrap();

        assert!(listing[0].match_result.is_none());
        let json = serde_json::to_value(&listing[0]).unwrap();
        assert!(json.get("match").is_none());
        assert_eq!(json["department"], "Engineering");
    }

    #[tokio::test]
    async fn test_job_lookup_failure_leaves_department_empty() {
        let candidates = MemoryCandidateStore::with_rows(vec![
            applicant("uploads/a.pdf", Some("job-broken"), &["Rust"]),
            applicant("uploads/b.pdf", Some("job-gone"), &["Rust"]),
            applicant("uploads/c.pdf", None, &["Rust"]),
        ]);
        let jobs = MemoryJobStore {
            failing_ids: vec!["job-broken".to_string()],
            ..Default::default()
        };

        let listing = list_candidates(&candidates, &jobs, true).await.unwrap();

        assert_eq!(listing.len(), 3);
        assert!(listing.iter().all(|l| l.department.is_none()));
        assert!(listing.iter().all(|l| l.match_result.is_none()));
    }

    #[tokio::test]
    async fn test_unenriched_candidate_has_empty_groups() {
        let mut row = candidate("uploads/a.pdf");
        row.skills = None;
        let mut enriched = candidate("uploads/b.pdf");
        let mut entities = GroupedEntities::default();
        entities.insert(crate::models::entities::EntityType::Location, "Pune");
        enriched.entities = Some(Json(entities.clone()));
        let candidates = MemoryCandidateStore::with_rows(vec![row, enriched]);

        let listing = list_candidates(&candidates, &MemoryJobStore::default(), true)
            .await
            .unwrap();

        assert_eq!(listing[0].entities, GroupedEntities::default());
        assert!(listing[0].skills.is_empty());
        assert_eq!(listing[1].entities, entities);
    }
}
