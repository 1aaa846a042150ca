//! Score, ranking and badge handlers.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use crate::achievements::Badge;
use crate::api::{ApiError, ApiResult, AppState, run_blocking};
use crate::db::Score;
use crate::error::GameError;
use crate::games::{GameKind, Identity};
use crate::score_service::Rankings;

/// Filters of `GET /api/scores`.
#[derive(Debug, Deserialize)]
pub(super) struct ScoresQuery {
    language: Option<String>,
    game: Option<GameKind>,
}

/// Body of `POST /api/scores`. The score itself is never taken from the client.
#[derive(Debug, Deserialize)]
pub(super) struct NewScoreRequest {
    language: String,
    game: GameKind,
}

/// Filter of `GET /api/rankings`.
#[derive(Debug, Deserialize)]
pub(super) struct RankingsQuery {
    language: Option<String>,
}

#[instrument(skip(state, query))]
pub(super) async fn list_scores(
    State(state): State<AppState>,
    identity: Identity,
    query: Result<Query<ScoresQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Score>>> {
    let Query(filter) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let scores = state.scores;
    let listed = run_blocking(move || {
        scores.scores_for(identity, filter.language.as_deref(), filter.game)
    })
    .await?;
    Ok(Json(listed))
}

#[instrument(skip(state, body))]
pub(super) async fn create_score(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<NewScoreRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Score>)> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let scores = state.scores;
    let created = run_blocking(move || {
        scores.create_score(identity, &request.language, request.game)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, query))]
pub(super) async fn rankings(
    State(state): State<AppState>,
    identity: Identity,
    query: Result<Query<RankingsQuery>, QueryRejection>,
) -> ApiResult<Json<Rankings>> {
    let Query(filter) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let scores = state.scores;
    let board = run_blocking(move || scores.rankings(identity, filter.language.as_deref())).await?;
    Ok(Json(board))
}

#[instrument(skip(state))]
pub(super) async fn badges(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<Vec<Badge>>> {
    let user_id = identity
        .user_id()
        .ok_or_else(|| ApiError::from(GameError::unauthenticated("sign in to see badges")))?;
    let scores = state.scores;
    let held = run_blocking(move || scores.badges_for(user_id)).await?;
    Ok(Json(held))
}
