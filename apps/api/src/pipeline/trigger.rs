//! Storage-object-created events (S3 / MinIO bucket notifications).

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::pipeline::error::PipelineError;

#[derive(Debug, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

/// Location of one stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRef {
    pub bucket: String,
    pub key: String,
}

impl DocumentRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Builds the reference from the first record of the event.
    /// Object keys arrive form-encoded and are decoded here.
    pub fn from_event(event: &StorageEvent) -> Result<Self, PipelineError> {
        let record = event
            .records
            .first()
            .ok_or_else(|| PipelineError::MalformedEvent("event has no records".to_string()))?;

        let key = decode_object_key(&record.s3.object.key)?;
        if record.s3.bucket.name.is_empty() || key.is_empty() {
            return Err(PipelineError::MalformedEvent(
                "bucket name and object key are required".to_string(),
            ));
        }

        Ok(DocumentRef::new(record.s3.bucket.name.clone(), key))
    }

    pub fn is_pdf(&self) -> bool {
        self.key.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// `+` becomes a space, then percent escapes are decoded as UTF-8.
pub fn decode_object_key(raw: &str) -> Result<String, PipelineError> {
    let plus_decoded = raw.replace('+', " ");
    percent_decode_str(&plus_decoded)
        .decode_utf8()
        .map(|key| key.into_owned())
        .map_err(|e| PipelineError::MalformedEvent(format!("object key is not valid UTF-8: {e}")))
}
