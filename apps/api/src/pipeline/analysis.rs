//! Entity & Skill Extractor: classifies a transcript into entities and short skill phrases.
//!
//! The backend is pluggable behind `LanguageAnalyzer`; `LlmAnalyzer` is the
//! production implementation. Filtering to the fixed entity set and the
//! three-word phrase limit happens here, independent of the backend.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::entities::{EntityType, ExtractedEntity};
use crate::pipeline::error::PipelineError;
use crate::pipeline::prompts::{ENTITY_PROMPT, KEY_PHRASE_PROMPT, LANGUAGE_PROMPT};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const MAX_SKILL_WORDS: usize = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct DetectedLanguage {
    pub language_code: String,
    #[serde(default)]
    pub score: f32,
}

/// An entity as reported by the backend, before classification filtering.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[async_trait]
pub trait LanguageAnalyzer: Send + Sync {
    async fn detect_dominant_language(&self, text: &str) -> Result<Vec<DetectedLanguage>>;
    async fn detect_entities(&self, text: &str, language_code: &str) -> Result<Vec<RawEntity>>;
    async fn detect_key_phrases(&self, text: &str, language_code: &str) -> Result<Vec<String>>;
}

/// Output of the analysis stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub language: String,
    pub entities: Vec<ExtractedEntity>,
    pub skills: Vec<String>,
}

pub async fn analyze(
    transcript: &str,
    analyzer: &dyn LanguageAnalyzer,
) -> Result<Analysis, PipelineError> {
    let languages = analyzer
        .detect_dominant_language(transcript)
        .await
        .map_err(nlp_error("language detection"))?;
    let language = pick_language(&languages);

    let raw_entities = analyzer
        .detect_entities(transcript, &language)
        .await
        .map_err(nlp_error("entity detection"))?;
    let phrases = analyzer
        .detect_key_phrases(transcript, &language)
        .await
        .map_err(nlp_error("key phrase detection"))?;

    let raw_count = raw_entities.len();
    let entities = filter_entities(raw_entities);
    let skills = filter_skill_phrases(phrases);

    info!(
        language = %language,
        entities = entities.len(),
        discarded_entities = raw_count - entities.len(),
        skills = skills.len(),
        "Transcript analyzed"
    );

    Ok(Analysis {
        language,
        entities,
        skills,
    })
}

fn nlp_error(stage: &'static str) -> impl Fn(anyhow::Error) -> PipelineError {
    move |e| PipelineError::NlpService(format!("{stage}: {e:#}"))
}

/// Highest-scoring language with a usable code, else `DEFAULT_LANGUAGE`.
/// Ties (including replies without scores) go to the earliest entry.
pub fn pick_language(candidates: &[DetectedLanguage]) -> String {
    candidates
        .iter()
        .filter(|l| !l.language_code.trim().is_empty())
        .rev()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|l| l.language_code.trim().to_string())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// Keeps only the four known classifications.
pub fn filter_entities(raw: Vec<RawEntity>) -> Vec<ExtractedEntity> {
    raw.into_iter()
        .filter_map(|entity| match entity.kind.parse::<EntityType>() {
            Ok(kind) => Some(ExtractedEntity::new(entity.text, kind)),
            Err(unknown) => {
                debug!("Discarding entity '{}': {unknown}", entity.text);
                None
            }
        })
        .collect()
}

/// Keeps phrases of one to `MAX_SKILL_WORDS` words, as-is and in order.
pub fn filter_skill_phrases(phrases: Vec<String>) -> Vec<String> {
    phrases
        .into_iter()
        .filter(|phrase| {
            let words = phrase.split_whitespace().count();
            words > 0 && words <= MAX_SKILL_WORDS
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAnalyzer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LanguageReply {
    #[serde(default)]
    languages: Vec<DetectedLanguage>,
}

#[derive(Debug, Deserialize)]
struct EntityReply {
    #[serde(default)]
    entities: Vec<RawEntity>,
}

#[derive(Debug, Deserialize)]
struct KeyPhraseReply {
    #[serde(default)]
    key_phrases: Vec<KeyPhrase>,
}

#[derive(Debug, Deserialize)]
struct KeyPhrase {
    text: String,
}

/// Runs each analysis step as a JSON prompt against the hosted model.
#[derive(Clone)]
pub struct LlmAnalyzer(pub LlmClient);

#[async_trait]
impl LanguageAnalyzer for LlmAnalyzer {
    async fn detect_dominant_language(&self, text: &str) -> Result<Vec<DetectedLanguage>> {
        let prompt = LANGUAGE_PROMPT.replace("{text}", text);
        let reply: LanguageReply = self.0.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        Ok(reply.languages)
    }

    async fn detect_entities(&self, text: &str, language_code: &str) -> Result<Vec<RawEntity>> {
        let prompt = ENTITY_PROMPT
            .replace("{language}", language_code)
            .replace("{text}", text);
        let reply: EntityReply = self.0.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        Ok(reply.entities)
    }

    async fn detect_key_phrases(&self, text: &str, language_code: &str) -> Result<Vec<String>> {
        let prompt = KEY_PHRASE_PROMPT
            .replace("{language}", language_code)
            .replace("{text}", text);
        let reply: KeyPhraseReply = self.0.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        Ok(reply.key_phrases.into_iter().map(|p| p.text).collect())
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use anyhow::anyhow;

    use super::*;

    /// Canned analyzer. `fail_on` names the step that errors, if any.
    #[derive(Default)]
    pub struct CannedAnalyzer {
        pub languages: Vec<DetectedLanguage>,
        pub entities: Vec<(&'static str, &'static str)>,
        pub phrases: Vec<&'static str>,
        pub fail_on: Option<&'static str>,
    }

    impl CannedAnalyzer {
        fn check(&self, step: &str) -> Result<()> {
            match self.fail_on {
                Some(s) if s == step => Err(anyhow!("{step} throttled")),
                _ => Ok(()),
            }
        }
    }

    #[async_trait]
    impl LanguageAnalyzer for CannedAnalyzer {
        async fn detect_dominant_language(&self, _text: &str) -> Result<Vec<DetectedLanguage>> {
            self.check("language")?;
            Ok(self.languages.clone())
        }

        async fn detect_entities(&self, _text: &str, _lang: &str) -> Result<Vec<RawEntity>> {
            self.check("entities")?;
            Ok(self
                .entities
                .iter()
                .map(|(text, kind)| RawEntity {
                    text: text.to_string(),
                    kind: kind.to_string(),
                })
                .collect())
        }

        async fn detect_key_phrases(&self, _text: &str, _lang: &str) -> Result<Vec<String>> {
            self.check("phrases")?;
            Ok(self.phrases.iter().map(|p| p.to_string()).collect())
        }
    }
}
