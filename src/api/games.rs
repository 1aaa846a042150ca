//! Game round handlers: `GET` draws a challenge, `POST` verifies an answer.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use tracing::instrument;

use crate::api::{ApiError, ApiResult, AppState, run_blocking};
use crate::games::{
    ArticleAnswer, ArticleSetup, Challenge, ConjugationAnswer, ConjugationSetup, GameInfo,
    Identity, RoundOutcome, VocabularyAnswer, VocabularySetup, catalog,
};

fn bad_query(rejection: QueryRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

fn bad_json(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

#[instrument(skip(state, query))]
pub(super) async fn vocabulary_setup(
    State(state): State<AppState>,
    identity: Identity,
    query: Result<Query<VocabularySetup>, QueryRejection>,
) -> ApiResult<Json<Challenge>> {
    let Query(setup) = query.map_err(bad_query)?;
    let games = state.games;
    let challenge = run_blocking(move || games.setup(games.vocabulary(), identity, &setup)).await?;
    Ok(Json(challenge))
}

#[instrument(skip(state, body))]
pub(super) async fn vocabulary_verify(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<VocabularyAnswer>, JsonRejection>,
) -> ApiResult<Json<RoundOutcome>> {
    let Json(answer) = body.map_err(bad_json)?;
    let games = state.games;
    let outcome = run_blocking(move || games.verify(games.vocabulary(), identity, &answer)).await?;
    Ok(Json(outcome))
}

#[instrument(skip(state, query))]
pub(super) async fn article_setup(
    State(state): State<AppState>,
    identity: Identity,
    query: Result<Query<ArticleSetup>, QueryRejection>,
) -> ApiResult<Json<Challenge>> {
    let Query(setup) = query.map_err(bad_query)?;
    let games = state.games;
    let challenge = run_blocking(move || games.setup(games.article(), identity, &setup)).await?;
    Ok(Json(challenge))
}

#[instrument(skip(state, body))]
pub(super) async fn article_verify(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<ArticleAnswer>, JsonRejection>,
) -> ApiResult<Json<RoundOutcome>> {
    let Json(answer) = body.map_err(bad_json)?;
    let games = state.games;
    let outcome = run_blocking(move || games.verify(games.article(), identity, &answer)).await?;
    Ok(Json(outcome))
}

#[instrument(skip(state, query))]
pub(super) async fn conjugation_setup(
    State(state): State<AppState>,
    identity: Identity,
    query: Result<Query<ConjugationSetup>, QueryRejection>,
) -> ApiResult<Json<Challenge>> {
    let Query(setup) = query.map_err(bad_query)?;
    let games = state.games;
    let challenge =
        run_blocking(move || games.setup(games.conjugation(), identity, &setup)).await?;
    Ok(Json(challenge))
}

#[instrument(skip(state, body))]
pub(super) async fn conjugation_verify(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<ConjugationAnswer>, JsonRejection>,
) -> ApiResult<Json<RoundOutcome>> {
    let Json(answer) = body.map_err(bad_json)?;
    let games = state.games;
    let outcome =
        run_blocking(move || games.verify(games.conjugation(), identity, &answer)).await?;
    Ok(Json(outcome))
}

pub(super) async fn list_games() -> Json<Vec<GameInfo>> {
    Json(catalog())
}
