use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::matching::listing::{list_candidates, CandidateListing};
use crate::matching::scorer::{score_skills, string_entries, MatchResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub candidate_skills: Vec<Value>,
    #[serde(default)]
    pub job_skills: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub include_match: bool,
}

/// POST /api/v1/match
pub async fn handle_match(Json(req): Json<MatchRequest>) -> Json<MatchResult> {
    Json(score_skills(
        string_entries(&req.candidate_skills),
        string_entries(&req.job_skills),
    ))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<ListingQuery>,
) -> Result<Json<Vec<CandidateListing>>, AppError> {
    let listing = list_candidates(
        state.candidates.as_ref(),
        state.jobs.as_ref(),
        params.include_match,
    )
    .await?;
    Ok(Json(listing))
}
