//! Game session orchestration: setup, verify, scoring and badge awards.

use tracing::{debug, info, instrument, warn};

use crate::achievements::{Badge, BadgeLadder};
use crate::db::GameRepository;
use crate::error::GameError;
use crate::games::{
    ArticleGame, Challenge, ConjugationGame, GameMode, Identity, RoundOutcome, TicketCheck,
    VocabularyGame,
};

/// Tunable game rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    /// Languages the article game refuses.
    pub article_free_languages: Vec<String>,
    /// Single-language total that unlocks Linguistic Mastery.
    pub mastery_threshold: i64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            article_free_languages: vec!["English".to_string()],
            mastery_threshold: 100,
        }
    }
}

/// Service layer for game rounds.
///
/// Wraps [`GameRepository`] with the round lifecycle: a setup draws a
/// challenge and, for authenticated players, issues a ticket; a verify
/// consumes the ticket, grades the answer and on success adds a point and
/// re-evaluates badges. Anonymous players are graded without touching storage.
#[derive(Debug, Clone)]
pub struct GameService {
    repository: GameRepository,
    ladder: BadgeLadder,
    vocabulary: VocabularyGame,
    article: ArticleGame,
    conjugation: ConjugationGame,
}

impl GameService {
    /// Creates a game service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository, rules: GameRules) -> Self {
        info!("Creating GameService");
        Self {
            repository,
            ladder: BadgeLadder::new(rules.mastery_threshold),
            vocabulary: VocabularyGame,
            article: ArticleGame::new(rules.article_free_languages),
            conjugation: ConjugationGame,
        }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Vocabulary game strategy.
    pub fn vocabulary(&self) -> &VocabularyGame {
        &self.vocabulary
    }

    /// Article game strategy.
    pub fn article(&self) -> &ArticleGame {
        &self.article
    }

    /// Conjugation game strategy.
    pub fn conjugation(&self) -> &ConjugationGame {
        &self.conjugation
    }

    /// Draws a challenge and, for an authenticated player, records the pending round.
    ///
    /// A second setup before verify silently replaces the pending round.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the parameters are invalid, nothing can be
    /// drawn, or the ticket cannot be stored.
    #[instrument(skip(self, mode))]
    pub fn setup<M: GameMode>(
        &self,
        mode: &M,
        identity: Identity,
        setup: &M::Setup,
    ) -> Result<Challenge, GameError> {
        let draw = mode.draw(&self.repository, setup)?;

        match identity.user_id() {
            Some(user_id) => self.repository.issue_round(mode.kind(), user_id, &draw.round)?,
            None => debug!(game = %mode.kind(), "Anonymous setup, no ticket issued"),
        }
        Ok(draw.challenge)
    }

    /// Grades an answer and applies its consequences.
    ///
    /// The answered entity is resolved before the ticket is touched, so a
    /// "not found" or "invalid" answer leaves the pending round in place. A
    /// mismatched answer still consumes the ticket.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the entity does not resolve, the answer is
    /// invalid, there is no matching pending round, or storage fails.
    #[instrument(skip(self, mode))]
    pub fn verify<M: GameMode>(
        &self,
        mode: &M,
        identity: Identity,
        answer: &M::Answer,
    ) -> Result<RoundOutcome, GameError> {
        let graded = mode.grade(&self.repository, answer)?;
        let game = mode.kind();

        let Some(user_id) = identity.user_id() else {
            debug!(%game, correct = graded.is_correct, "Anonymous answer graded");
            return Ok(RoundOutcome {
                result: graded.is_correct,
                correct_answer: graded.correct_answer,
                score: None,
                new_badges: Vec::new(),
            });
        };

        match self.repository.consume_round(game, user_id, &graded.round)? {
            TicketCheck::Matched => {}
            TicketCheck::Missing => {
                warn!(%game, user_id, "Answer without a pending round");
                return Err(GameError::session("no pending round"));
            }
            TicketCheck::Mismatched => {
                warn!(
                    %game,
                    user_id,
                    word_id = graded.round.word_id(),
                    "Answer does not match the pending round"
                );
                return Err(GameError::session(
                    "answer does not match the pending round",
                ));
            }
        }

        if !graded.is_correct {
            debug!(%game, user_id, "Wrong answer");
            return Ok(RoundOutcome {
                result: false,
                correct_answer: graded.correct_answer,
                score: None,
                new_badges: Vec::new(),
            });
        }

        let score = self
            .repository
            .increment_score(user_id, graded.language_id, game)?;
        let new_badges = self.update_badges(user_id)?;
        info!(
            %game,
            user_id,
            word_id = graded.round.word_id(),
            score = score.score(),
            "Correct answer scored"
        );

        Ok(RoundOutcome {
            result: true,
            correct_answer: graded.correct_answer,
            score: Some(*score.score()),
            new_badges,
        })
    }

    /// Awards every badge the user now qualifies for and returns only the new ones.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if storage fails.
    #[instrument(skip(self))]
    pub fn update_badges(&self, user_id: i32) -> Result<Vec<Badge>, GameError> {
        Ok(self.repository.award_badges(user_id, &self.ladder)?)
    }
}
