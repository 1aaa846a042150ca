//! Score listings, direct score creation, rankings and earned badges.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::achievements::{BADGES, Badge};
use crate::content::ContentStore;
use crate::db::{GameRepository, Score, ScoreRow};
use crate::error::GameError;
use crate::games::{GameKind, Identity};

/// One line of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    /// 1-based position.
    pub position: usize,
    /// Player name.
    pub user: String,
    /// Summed score.
    pub score: i64,
}

/// Leaderboard with the caller's own placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rankings {
    /// Top entries, best first.
    pub entries: Vec<RankingEntry>,
    /// The caller's entry, if authenticated and ranked.
    pub user_entry: Option<RankingEntry>,
}

/// Sums rows per user and orders by score descending, then name.
pub fn rank(rows: &[ScoreRow]) -> Vec<(i32, RankingEntry)> {
    let mut totals: HashMap<i32, (String, i64)> = HashMap::new();
    for row in rows {
        let entry = totals
            .entry(row.user_id)
            .or_insert_with(|| (row.display_name.clone(), 0));
        entry.1 += row.score;
    }

    let mut ranked: Vec<(i32, String, i64)> = totals
        .into_iter()
        .map(|(user_id, (name, score))| (user_id, name, score))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (user_id, user, score))| {
            (
                user_id,
                RankingEntry {
                    position: index + 1,
                    user,
                    score,
                },
            )
        })
        .collect()
}

/// Service layer for the score ledger's read side and manual entries.
#[derive(Debug, Clone)]
pub struct ScoreService {
    repository: GameRepository,
    ranking_limit: usize,
}

impl ScoreService {
    /// Creates a score service that truncates leaderboards to `ranking_limit` entries.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository, ranking_limit: usize) -> Self {
        info!("Creating ScoreService");
        Self {
            repository,
            ranking_limit,
        }
    }

    /// Lists the caller's scores, optionally filtered by language and game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the caller is anonymous, the language is
    /// unknown, or storage fails.
    #[instrument(skip(self))]
    pub fn scores_for(
        &self,
        identity: Identity,
        language: Option<&str>,
        game: Option<GameKind>,
    ) -> Result<Vec<Score>, GameError> {
        let user_id = require_user(identity)?;
        let language_id = match language {
            Some(name) => Some(self.language_id(name)?),
            None => None,
        };

        let scores: Vec<Score> = self
            .repository
            .scores_for_user(user_id)?
            .into_iter()
            .filter(|s| language_id.is_none_or(|id| *s.language_id() == id))
            .filter(|s| game.is_none_or(|g| s.game().is_ok_and(|kind| kind == g)))
            .collect();
        debug!(count = scores.len(), "Scores listed");
        Ok(scores)
    }

    /// Creates the caller's score row for a language and game, starting at one point.
    ///
    /// Points beyond the first only come from verified answers.
    ///
    /// # Errors
    ///
    /// Returns a conflict if the caller already has a score for this language
    /// and game, and [`GameError`] if the caller is anonymous, the language is
    /// unknown, or storage fails.
    #[instrument(skip(self))]
    pub fn create_score(
        &self,
        identity: Identity,
        language: &str,
        game: GameKind,
    ) -> Result<Score, GameError> {
        let user_id = require_user(identity)?;
        let language_id = self.language_id(language)?;

        self.repository
            .create_score(user_id, language_id, game)?
            .ok_or_else(|| {
                GameError::conflict(format!(
                    "score for {} in {} already exists",
                    game, language
                ))
            })
    }

    /// Builds the leaderboard, across all languages or within one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the language is unknown or storage fails.
    #[instrument(skip(self))]
    pub fn rankings(
        &self,
        identity: Identity,
        language: Option<&str>,
    ) -> Result<Rankings, GameError> {
        let language_id = match language {
            Some(name) => Some(self.language_id(name)?),
            None => None,
        };

        let ranked = rank(&self.repository.score_rows(language_id)?);
        let user_entry = identity.user_id().and_then(|user_id| {
            ranked
                .iter()
                .find(|(id, _)| *id == user_id)
                .map(|(_, entry)| entry.clone())
        });
        let entries = ranked
            .into_iter()
            .take(self.ranking_limit)
            .map(|(_, entry)| entry)
            .collect();

        Ok(Rankings {
            entries,
            user_entry,
        })
    }

    /// Lists the badges a user holds, in ladder order.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if storage fails.
    #[instrument(skip(self))]
    pub fn badges_for(&self, user_id: i32) -> Result<Vec<Badge>, GameError> {
        let held: Vec<i32> = self
            .repository
            .user_badges(user_id)?
            .iter()
            .map(|b| *b.badge_id())
            .collect();
        Ok(BADGES
            .iter()
            .copied()
            .filter(|badge| held.contains(&badge.id))
            .collect())
    }

    fn language_id(&self, name: &str) -> Result<i32, GameError> {
        self.repository
            .find_language(name)?
            .map(|l| *l.id())
            .ok_or_else(|| GameError::not_found(format!("language {}", name)))
    }
}

#[track_caller]
fn require_user(identity: Identity) -> Result<i32, GameError> {
    identity
        .user_id()
        .ok_or_else(|| GameError::unauthenticated("sign in to keep scores"))
}
