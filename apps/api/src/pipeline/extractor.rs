//! Document Text Extractor: stored PDF to a flat transcript.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::{debug, info};

use crate::pipeline::error::PipelineError;
use crate::pipeline::trigger::DocumentRef;

/// Reads a stored document and returns its line-level text blocks in reading order.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn read_lines(&self, doc: &DocumentRef) -> Result<Vec<String>>;
}

/// Fetches the object from S3-compatible storage and decodes it as PDF.
#[derive(Clone)]
pub struct S3PdfReader {
    s3: S3Client,
}

impl S3PdfReader {
    pub fn new(s3: S3Client) -> Self {
        Self { s3 }
    }
}

#[async_trait]
impl DocumentReader for S3PdfReader {
    async fn read_lines(&self, doc: &DocumentRef) -> Result<Vec<String>> {
        let object = self
            .s3
            .get_object()
            .bucket(&doc.bucket)
            .key(&doc.key)
            .send()
            .await
            .map_err(|e| anyhow!("S3 get_object failed for s3://{}/{}: {e}", doc.bucket, doc.key))?;

        let bytes: Bytes = object
            .body
            .collect()
            .await
            .context("failed to read S3 object body")?
            .into_bytes();
        debug!("Fetched {} bytes from s3://{}/{}", bytes.len(), doc.bucket, doc.key);

        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .context("PDF decoding task failed")?
        .map_err(|e| anyhow!("PDF decoding failed: {e}"))?;

        Ok(split_lines(&text))
    }
}

/// Non-blank lines of decoded text, trimmed.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Blocks joined by a single space, then trimmed.
pub fn build_transcript(lines: &[String]) -> String {
    lines.join(" ").trim().to_string()
}

/// Validates the format, reads the document, and flattens it.
/// The reader is never called for non-PDF keys.
pub async fn extract_transcript(
    doc: &DocumentRef,
    reader: &dyn DocumentReader,
) -> Result<String, PipelineError> {
    if !doc.is_pdf() {
        return Err(PipelineError::UnsupportedFormat(doc.key.clone()));
    }

    let lines = reader
        .read_lines(doc)
        .await
        .map_err(|e| PipelineError::ExtractionService(format!("{e:#}")))?;

    let transcript = build_transcript(&lines);
    if transcript.is_empty() {
        return Err(PipelineError::EmptyDocument(doc.key.clone()));
    }

    info!(
        "Extracted {} chars from {} lines of {}",
        transcript.len(),
        lines.len(),
        doc.key
    );
    Ok(transcript)
}
