use thiserror::Error;

/// Terminal failures of one enrichment run. Any of these stops the run before
/// the candidate record is touched (or, for `StorageWrite`, leaves it as it was).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Malformed storage event: {0}")]
    MalformedEvent(String),

    #[error("Unsupported file format for '{0}' (only PDF supported)")]
    UnsupportedFormat(String),

    #[error("Text extraction failed: {0}")]
    ExtractionService(String),

    #[error("No readable text found in '{0}'")]
    EmptyDocument(String),

    #[error("Language analysis failed: {0}")]
    NlpService(String),

    #[error("Candidate record not found for '{0}'")]
    CandidateNotFound(String),

    #[error("Candidate lookup failed: {0}")]
    StorageRead(String),

    #[error("Candidate update failed: {0}")]
    StorageWrite(String),
}

impl PipelineError {
    /// Stable machine-readable code used in HTTP error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::MalformedEvent(_) => "MALFORMED_EVENT",
            PipelineError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            PipelineError::ExtractionService(_) => "EXTRACTION_SERVICE_ERROR",
            PipelineError::EmptyDocument(_) => "EMPTY_DOCUMENT",
            PipelineError::NlpService(_) => "NLP_SERVICE_ERROR",
            PipelineError::CandidateNotFound(_) => "CANDIDATE_NOT_FOUND",
            PipelineError::StorageRead(_) => "STORAGE_READ_ERROR",
            PipelineError::StorageWrite(_) => "STORAGE_WRITE_ERROR",
        }
    }
}
