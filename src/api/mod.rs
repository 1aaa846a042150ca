//! HTTP surface: thin axum handlers over the game and score services.

mod error;
mod games;
mod identity;
mod scores;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::GameError;
use crate::game_service::GameService;
use crate::score_service::ScoreService;

pub use error::{ApiError, ApiResult};
pub use identity::USER_ID_HEADER;

/// Application state shared across HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Round lifecycle.
    pub games: GameService,
    /// Scores, rankings and badges.
    pub scores: ScoreService,
}

impl AppState {
    /// Creates new application state.
    pub fn new(games: GameService, scores: ScoreService) -> Self {
        Self { games, scores }
    }
}

/// Builds the application router.
#[instrument(skip(state))]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/vocabulary-game",
            get(games::vocabulary_setup).post(games::vocabulary_verify),
        )
        .route(
            "/api/article-game",
            get(games::article_setup).post(games::article_verify),
        )
        .route(
            "/api/conjugation-game",
            get(games::conjugation_setup).post(games::conjugation_verify),
        )
        .route(
            "/api/scores",
            get(scores::list_scores).post(scores::create_score),
        )
        .route("/api/rankings", get(scores::rankings))
        .route("/api/badges", get(scores::badges))
        .route("/api/games", get(games::list_games))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "module": "pajelingo",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Runs blocking service work off the async runtime.
async fn run_blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, GameError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("worker task failed: {}", e)))?
        .map_err(ApiError::from)
}
