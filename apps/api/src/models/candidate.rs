use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::entities::GroupedEntities;

/// Application status of a candidate. Known workflow states are variants;
/// anything else set by reviewers is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CandidateStatus {
    Uploaded,
    UnderReview,
    AdvancedByHod,
    AdvancedForInterview,
    Rejected,
    Other(String),
}

impl CandidateStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CandidateStatus::Uploaded => "Uploaded",
            CandidateStatus::UnderReview => "Under Review",
            CandidateStatus::AdvancedByHod => "Advanced by HOD",
            CandidateStatus::AdvancedForInterview => "Advanced for Interview",
            CandidateStatus::Rejected => "Rejected",
            CandidateStatus::Other(s) => s,
        }
    }

    /// Whether enrichment may move this status to `Under Review`.
    /// Decisions already taken by a reviewer are never reverted.
    pub fn accepts_enrichment(&self) -> bool {
        matches!(self, CandidateStatus::Uploaded | CandidateStatus::UnderReview)
    }
}

impl From<&str> for CandidateStatus {
    fn from(s: &str) -> Self {
        match s {
            "Uploaded" => CandidateStatus::Uploaded,
            "Under Review" => CandidateStatus::UnderReview,
            "Advanced by HOD" => CandidateStatus::AdvancedByHod,
            "Advanced for Interview" => CandidateStatus::AdvancedForInterview,
            "Rejected" => CandidateStatus::Rejected,
            other => CandidateStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for CandidateStatus {
    fn from(s: String) -> Self {
        CandidateStatus::from(s.as_str())
    }
}

impl From<CandidateStatus> for String {
    fn from(status: CandidateStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
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
    pub status: String,
    pub filename: String,
    pub extracted_text: Option<String>,
    pub entities: Option<Json<GroupedEntities>>,
    /// NULL array elements decode as `None` and are dropped by `skills()`.
    pub skills: Option<Vec<Option<String>>>,
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateRow {
    pub fn status(&self) -> CandidateStatus {
        CandidateStatus::from(self.status.as_str())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn skills(&self) -> Vec<String> {
        self.skills
            .iter()
            .flatten()
            .flatten()
            .cloned()
            .collect()
    }

    pub fn grouped_entities(&self) -> GroupedEntities {
        self.entities
            .as_ref()
            .map(|json| json.0.clone())
            .unwrap_or_default()
    }
}

/// The fields written to a candidate by one enrichment run.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub extracted_text: String,
    pub entities: GroupedEntities,
    pub skills: Vec<String>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_known_labels() {
        for label in [
            "Uploaded",
            "Under Review",
            "Advanced by HOD",
            "Advanced for Interview",
            "Rejected",
        ] {
            assert_eq!(CandidateStatus::from(label).as_str(), label);
        }
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status = CandidateStatus::from("On Hold");
        assert_eq!(status, CandidateStatus::Other("On Hold".to_string()));
        assert_eq!(status.to_string(), "On Hold");
    }

    #[test]
    fn test_only_early_statuses_accept_enrichment() {
        assert!(CandidateStatus::Uploaded.accepts_enrichment());
        assert!(CandidateStatus::UnderReview.accepts_enrichment());
        assert!(!CandidateStatus::AdvancedByHod.accepts_enrichment());
        assert!(!CandidateStatus::Rejected.accepts_enrichment());
        assert!(!CandidateStatus::Other("On Hold".into()).accepts_enrichment());
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&CandidateStatus::UnderReview).unwrap();
        assert_eq!(json, r#""Under Review""#);
    }

    #[test]
    fn test_full_name_trims_missing_last_name() {
        let mut row = fixtures::candidate("uploads/a.pdf");
        row.last_name = String::new();
        assert_eq!(row.full_name(), "Asha");
    }

    #[test]
    fn test_skills_drop_null_array_elements() {
        let mut row = fixtures::candidate("uploads/a.pdf");
        assert!(row.skills().is_empty());

        row.skills = Some(vec![Some("Python".to_string()), None, Some("SQL".to_string())]);
        assert_eq!(row.skills(), ["Python", "SQL"]);
    }
}
