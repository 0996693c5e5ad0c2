use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::metrics::{outcome, SCORE_SUBMISSIONS_TOTAL};
use crate::models::ScoreSubmitted;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreParams {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// POST /score?username=..&score=..
///
/// Overwrites any previous score for the member. The username does not have
/// to be registered.
pub async fn submit_score(
    query: web::Query<ScoreParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let result = submit_score_inner(query.into_inner(), &state).await;
    SCORE_SUBMISSIONS_TOTAL
        .with_label_values(&[outcome(&result)])
        .inc();
    result
}

async fn submit_score_inner(params: ScoreParams, state: &AppState) -> Result<HttpResponse> {
    let username = params
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Username required".to_string()))?;
    let score = params
        .score
        .ok_or_else(|| AppError::InvalidInput("Score required".to_string()))?;

    debug!("Score submission: username={} score={}", username, score);
    state.store.upsert(&username, score).await?;

    Ok(HttpResponse::Ok().json(ScoreSubmitted {
        message: "Score updated".to_string(),
        username,
        score,
    }))
}
