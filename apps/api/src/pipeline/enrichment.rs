//! Enrichment Writer: merges analysis output into the candidate record, then notifies.

use tracing::{info, warn};

use crate::models::candidate::{CandidateRow, CandidateStatus, Enrichment};
use crate::models::entities::GroupedEntities;
use crate::pipeline::analysis::Analysis;
use crate::pipeline::error::PipelineError;
use crate::pipeline::notify::{Notifier, ReviewNotification};
use crate::store::CandidateStore;

/// Entities grouped and deduplicated by type; skills passed through untouched.
pub fn build_enrichment(transcript: &str, analysis: &Analysis) -> Enrichment {
    Enrichment {
        extracted_text: transcript.to_string(),
        entities: GroupedEntities::from_entities(&analysis.entities),
        skills: analysis.skills.clone(),
    }
}

/// Applies the enrichment as one atomic write and returns the resulting status.
pub async fn write_enrichment(
    candidate: &CandidateRow,
    enrichment: &Enrichment,
    candidates: &dyn CandidateStore,
) -> Result<CandidateStatus, PipelineError> {
    let status = candidates
        .apply_enrichment(candidate.id, enrichment)
        .await
        .map_err(|e| PipelineError::StorageWrite(format!("{e:#}")))?
        .ok_or_else(|| PipelineError::CandidateNotFound(candidate.filename.clone()))?;

    if status == CandidateStatus::UnderReview {
        info!("Candidate {} enriched and moved to '{status}'", candidate.id);
    } else {
        info!(
            "Candidate {} enriched; status '{status}' kept (already past review)",
            candidate.id
        );
    }
    Ok(status)
}

/// Sends the reviewer notification. Failures are logged and swallowed;
/// the return value only reports whether a message went out.
pub async fn notify_reviewer(
    notifier: Option<&dyn Notifier>,
    notification: &ReviewNotification,
) -> bool {
    let Some(notifier) = notifier else {
        info!("No reviewer notifier configured; skipping notification");
        return false;
    };

    match notifier.notify(notification).await {
        Ok(()) => {
            info!("Reviewer notified about {}", notification.resume_key);
            true
        }
        Err(e) => {
            warn!(
                "Failed to notify reviewer about {}: {e}",
                notification.resume_key
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::fixtures::candidate;
    use crate::models::entities::{EntityType, ExtractedEntity};
    use crate::pipeline::notify::fakes::RecordingNotifier;
    use crate::store::memory::MemoryCandidateStore;

    fn analysis() -> Analysis {
        Analysis {
            language: "en".to_string(),
            entities: vec![
                ExtractedEntity::new("John Doe", EntityType::Person),
                ExtractedEntity::new("John Doe", EntityType::Person),
                ExtractedEntity::new("Acme Corp", EntityType::Organization),
            ],
            skills: vec!["Python".to_string(), "Python".to_string()],
        }
    }

    #[test]
    fn test_build_enrichment_groups_entities() {
        let enrichment = build_enrichment("John Doe Acme Corp", &analysis());

        assert_eq!(
            enrichment.entities,
            GroupedEntities {
                person: vec!["John Doe".to_string()],
                organization: vec!["Acme Corp".to_string()],
                date: vec![],
                location: vec![],
            }
        );
        // Skills are not deduplicated.
        assert_eq!(enrichment.skills, vec!["Python", "Python"]);
        assert_eq!(enrichment.extracted_text, "John Doe Acme Corp");
    }

    #[tokio::test]
    async fn test_write_moves_uploaded_to_under_review() {
        let row = candidate("uploads/a.pdf");
        let store = MemoryCandidateStore::with_rows(vec![row.clone()]);
        let enrichment = build_enrichment("text", &analysis());

        let status = write_enrichment(&row, &enrichment, &store).await.unwrap();

        assert_eq!(status, CandidateStatus::UnderReview);
        let stored = store.row(row.id).unwrap();
        assert_eq!(stored.skills(), ["Python", "Python"]);
        assert_eq!(stored.grouped_entities(), enrichment.entities);
        assert_eq!(stored.extracted_text.as_deref(), Some("text"));
    }

    #[tokio::test]
    async fn test_write_keeps_reviewer_decision() {
        let mut row = candidate("uploads/a.pdf");
        row.status = CandidateStatus::AdvancedForInterview.to_string();
        let store = MemoryCandidateStore::with_rows(vec![row.clone()]);
        let enrichment = build_enrichment("text", &analysis());

        let status = write_enrichment(&row, &enrichment, &store).await.unwrap();

        assert_eq!(status, CandidateStatus::AdvancedForInterview);
        assert_eq!(store.row(row.id).unwrap().skills().len(), 2);
    }

    #[tokio::test]
    async fn test_write_failure_is_storage_write_error() {
        let row = candidate("uploads/a.pdf");
        let store = MemoryCandidateStore {
            fail_writes: true,
            ..MemoryCandidateStore::with_rows(vec![row.clone()])
        };

        let err = write_enrichment(&row, &build_enrichment("t", &analysis()), &store)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::StorageWrite(_)));
        assert_eq!(store.row(row.id).unwrap().status, "Uploaded");
    }

    #[tokio::test]
    async fn test_vanished_record_is_not_found() {
        let row = candidate("uploads/gone.pdf");
        let store = MemoryCandidateStore::default();

        let err = write_enrichment(&row, &build_enrichment("t", &analysis()), &store)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::CandidateNotFound(_)));
    }

    #[tokio::test]
    async fn test_notifier_failure_is_swallowed() {
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        let note = ReviewNotification::new(
            &candidate("uploads/a.pdf"),
            "uploads/a.pdf",
            &[],
            &GroupedEntities::default(),
        );

        assert!(!notify_reviewer(Some(&notifier), &note).await);
        assert!(!notify_reviewer(None, &note).await);
    }
}
