//! The three quiz games and the strategy interface they share.
//!
//! Every game follows the same cycle: `setup` draws a challenge from the
//! content store, `verify` re-resolves it and grades the answer. The
//! strategies here are pure with respect to game state; tickets, scores and
//! badges are handled by [`crate::GameService`].

mod article;
mod conjugation;
mod round;
mod vocabulary;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::achievements::Badge;
use crate::content::ContentStore;
use crate::error::GameError;

pub use article::{ArticleAnswer, ArticleGame, ArticleSetup};
pub use conjugation::{ConjugationAnswer, ConjugationGame, ConjugationSetup};
pub use round::{RoundData, TicketCheck};
pub use vocabulary::{VocabularyAnswer, VocabularyGame, VocabularySetup};

/// Static game catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameKind {
    /// Translate a word into another language.
    Vocabulary,
    /// Guess the grammatical article of a word.
    Article,
    /// Conjugate a verb in all six persons.
    Conjugation,
}

impl GameKind {
    /// Stable catalog id.
    pub fn id(self) -> i32 {
        match self {
            Self::Vocabulary => 1,
            Self::Article => 2,
            Self::Conjugation => 3,
        }
    }

    /// Resolves a catalog id.
    pub fn from_id(id: i32) -> Option<Self> {
        Self::iter().find(|kind| kind.id() == id)
    }

    /// Human-readable game name.
    pub fn title(self) -> &'static str {
        match self {
            Self::Vocabulary => "Vocabulary Game",
            Self::Article => "Guess the Article",
            Self::Conjugation => "Conjugation Game",
        }
    }
}

/// Catalog entry as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    /// Stable id.
    pub id: i32,
    /// Machine tag.
    pub tag: GameKind,
    /// Display name.
    pub name: &'static str,
}

/// Lists the game catalog in id order.
pub fn catalog() -> Vec<GameInfo> {
    GameKind::iter()
        .map(|kind| GameInfo {
            id: kind.id(),
            tag: kind,
            name: kind.title(),
        })
        .collect()
}

/// Who is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// Unauthenticated caller: graded directly, nothing persisted.
    Anonymous,
    /// Authenticated user id.
    User(i32),
}

impl Identity {
    /// Returns the user id, if authenticated.
    pub fn user_id(self) -> Option<i32> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }
}

/// Public fields of an issued challenge. Never contains the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Challenge {
    /// Word id the answer refers to.
    pub id: i32,
    /// Word shown to the player.
    pub word: String,
    /// Tense to conjugate in (conjugation game only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tense: Option<String>,
    /// Language to answer in (vocabulary game only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_language: Option<String>,
}

/// A drawn challenge together with the round it binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    /// What the player sees.
    pub challenge: Challenge,
    /// What the ticket stores.
    pub round: RoundData,
}

/// A graded answer together with the round it answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graded {
    /// Round reconstructed from the answer, as setup would have produced it.
    pub round: RoundData,
    /// Language the points go to.
    pub language_id: i32,
    /// Whether the answer was right.
    pub is_correct: bool,
    /// Authoritative answer text.
    pub correct_answer: String,
}

/// Result of a verified answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    /// Whether the answer was right.
    pub result: bool,
    /// Authoritative answer text.
    pub correct_answer: String,
    /// Score after the increment; `None` for wrong answers and anonymous players.
    pub score: Option<i64>,
    /// Badges unlocked by this answer.
    pub new_badges: Vec<Badge>,
}

/// Rejects an empty or whitespace-only setup parameter.
#[track_caller]
pub(crate) fn require_param(field: &str, value: &str) -> Result<(), GameError> {
    if value.trim().is_empty() {
        return Err(GameError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Game-specific drawing and grading.
pub trait GameMode {
    /// Parameters of a setup request.
    type Setup: Debug;
    /// Submitted answer.
    type Answer: Debug;

    /// Which game this is.
    fn kind(&self) -> GameKind;

    /// Validates the setup parameters and draws a random challenge.
    fn draw<C: ContentStore>(&self, content: &C, setup: &Self::Setup) -> Result<Draw, GameError>;

    /// Re-resolves the answered challenge and grades the answer.
    fn grade<C: ContentStore>(&self, content: &C, answer: &Self::Answer)
    -> Result<Graded, GameError>;
}
