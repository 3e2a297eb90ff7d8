//! Skill-Match Scorer: case-insensitive overlap between candidate and job skills.
//!
//! Pure and deterministic: computed on every read, never stored.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Lower-cased skills present in both lists.
    pub matched: BTreeSet<String>,
    /// Share of the job's skills the candidate covers, 0–100, two decimals.
    pub percentage: f64,
}

/// Lower-cases and deduplicates.
pub fn normalize<I, S>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect()
}

/// String entries of a JSON array; anything else is discarded.
pub fn string_entries(values: &[Value]) -> Vec<&str> {
    values.iter().filter_map(Value::as_str).collect()
}

pub fn score_skills<C, J, S, T>(candidate_skills: C, job_skills: J) -> MatchResult
where
    C: IntoIterator<Item = S>,
    J: IntoIterator<Item = T>,
    S: AsRef<str>,
    T: AsRef<str>,
{
    let candidate = normalize(candidate_skills);
    let job = normalize(job_skills);

    let matched: BTreeSet<String> = candidate.intersection(&job).cloned().collect();
    let percentage = if job.is_empty() {
        0.0
    } else {
        round2(100.0 * matched.len() as f64 / job.len() as f64)
    };

    MatchResult {
        matched,
        percentage,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
