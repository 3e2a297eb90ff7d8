// Resume enrichment pipeline.
// One storage event runs extract -> analyze -> correlate -> write -> notify, in that order.
// Every stage error short-circuits; the notification never affects the outcome.

pub mod analysis;
pub mod correlator;
pub mod enrichment;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod notify;
pub mod prompts;
pub mod trigger;

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::candidate::CandidateStatus;
use crate::pipeline::analysis::LanguageAnalyzer;
use crate::pipeline::error::PipelineError;
use crate::pipeline::extractor::DocumentReader;
use crate::pipeline::notify::{Notifier, ReviewNotification};
use crate::pipeline::trigger::DocumentRef;
use crate::store::CandidateStore;

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub candidate_id: Uuid,
    pub resume_key: String,
    pub status: CandidateStatus,
    pub language: String,
    pub skills: Vec<String>,
    pub entity_count: usize,
    pub notified: bool,
}

#[derive(Clone)]
pub struct ResumePipeline {
    reader: Arc<dyn DocumentReader>,
    analyzer: Arc<dyn LanguageAnalyzer>,
    candidates: Arc<dyn CandidateStore>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ResumePipeline {
    pub fn new(
        reader: Arc<dyn DocumentReader>,
        analyzer: Arc<dyn LanguageAnalyzer>,
        candidates: Arc<dyn CandidateStore>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            reader,
            analyzer,
            candidates,
            notifier,
        }
    }

    pub async fn process(&self, doc: &DocumentRef) -> Result<ProcessOutcome, PipelineError> {
        info!("Processing s3://{}/{}", doc.bucket, doc.key);
        let result = self.run(doc).await;
        if let Err(e) = &result {
            error!(code = e.code(), "Resume processing failed for {}: {e}", doc.key);
        }
        result
    }

    async fn run(&self, doc: &DocumentRef) -> Result<ProcessOutcome, PipelineError> {
        let transcript = extractor::extract_transcript(doc, self.reader.as_ref()).await?;
        let analysis = analysis::analyze(&transcript, self.analyzer.as_ref()).await?;
        let candidate = correlator::correlate(&doc.key, self.candidates.as_ref()).await?;

        let enrichment = enrichment::build_enrichment(&transcript, &analysis);
        let status =
            enrichment::write_enrichment(&candidate, &enrichment, self.candidates.as_ref()).await?;

        // The write above is the commit point.
        let notification = ReviewNotification::new(
            &candidate,
            &doc.key,
            &enrichment.skills,
            &enrichment.entities,
        );
        let notified = enrichment::notify_reviewer(self.notifier.as_deref(), &notification).await;

        Ok(ProcessOutcome {
            candidate_id: candidate.id,
            resume_key: doc.key.clone(),
            status,
            language: analysis.language,
            skills: enrichment.skills,
            entity_count: enrichment.entities.len(),
            notified,
        })
    }
}
