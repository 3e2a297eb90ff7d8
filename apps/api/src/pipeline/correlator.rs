//! Candidate Record Correlator: maps a processed document back to its candidate by filename key.

use tracing::{debug, warn};

use crate::models::candidate::CandidateRow;
use crate::pipeline::error::PipelineError;
use crate::store::CandidateStore;

/// Returns the first record whose `filename` equals `key`.
/// Duplicates are tolerated with a warning; zero matches is terminal.
pub async fn correlate(
    key: &str,
    candidates: &dyn CandidateStore,
) -> Result<CandidateRow, PipelineError> {
    let matches = candidates
        .find_by_filename(key)
        .await
        .map_err(|e| PipelineError::StorageRead(format!("{e:#}")))?;

    if matches.len() > 1 {
        warn!(
            "{} candidate records share filename '{key}'; using {}",
            matches.len(),
            matches[0].id
        );
    }

    let candidate = matches
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::CandidateNotFound(key.to_string()))?;

    debug!("Correlated '{key}' to candidate {}", candidate.id);
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::fixtures::candidate;
    use crate::store::memory::MemoryCandidateStore;

    #[tokio::test]
    async fn test_finds_matching_candidate() {
        let target = candidate("uploads/20240101_jane.pdf");
        let store = MemoryCandidateStore::with_rows(vec![
            candidate("uploads/other.pdf"),
            target.clone(),
        ]);

        let found = correlate("uploads/20240101_jane.pdf", &store).await.unwrap();

        assert_eq!(found.id, target.id);
    }

    #[tokio::test]
    async fn test_missing_candidate_is_not_found() {
        let store = MemoryCandidateStore::with_rows(vec![candidate("uploads/other.pdf")]);

        let err = correlate("uploads/missing.pdf", &store).await.unwrap_err();

        assert!(matches!(err, PipelineError::CandidateNotFound(ref k) if k == "uploads/missing.pdf"));
    }

    #[tokio::test]
    async fn test_duplicate_filenames_take_first() {
        let first = candidate("uploads/dup.pdf");
        let second = candidate("uploads/dup.pdf");
        let store = MemoryCandidateStore::with_rows(vec![first.clone(), second]);

        let found = correlate("uploads/dup.pdf", &store).await.unwrap();

        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_storage_read_error() {
        let store = MemoryCandidateStore {
            fail_reads: true,
            ..Default::default()
        };

        let err = correlate("uploads/a.pdf", &store).await.unwrap_err();

        assert!(matches!(err, PipelineError::StorageRead(_)));
    }

    #[tokio::test]
    async fn test_match_is_exact() {
        let store = MemoryCandidateStore::with_rows(vec![candidate("uploads/Jane.pdf")]);

        let err = correlate("uploads/jane.pdf", &store).await.unwrap_err();

        assert!(matches!(err, PipelineError::CandidateNotFound(_)));
    }
}
