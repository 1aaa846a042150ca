//! Round data: the facts a pending challenge is bound to.

use serde::{Deserialize, Serialize};

use crate::games::GameKind;

/// Minimal facts needed to re-derive and verify the answer of one challenge.
///
/// Tickets are compared variant-and-field-wise, never as loose maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum RoundData {
    /// Translate a word into the base language.
    Vocabulary {
        /// Word shown to the player.
        word_id: i32,
        /// Language the answer must be given in.
        base_language: String,
    },
    /// Guess the article of a word.
    Article {
        /// Word shown to the player.
        word_id: i32,
    },
    /// Conjugate a verb in a tense.
    Conjugation {
        /// Verb shown to the player.
        word_id: i32,
        /// Tense shown to the player.
        tense: String,
    },
}

impl RoundData {
    /// Returns the game this round belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Vocabulary { .. } => GameKind::Vocabulary,
            Self::Article { .. } => GameKind::Article,
            Self::Conjugation { .. } => GameKind::Conjugation,
        }
    }

    /// Returns the id of the word the round is about.
    pub fn word_id(&self) -> i32 {
        match self {
            Self::Vocabulary { word_id, .. }
            | Self::Article { word_id }
            | Self::Conjugation { word_id, .. } => *word_id,
        }
    }
}

/// Result of consuming a round ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketCheck {
    /// No ticket was pending for the (game, user) pair.
    Missing,
    /// A ticket was consumed and matched the expected round.
    Matched,
    /// A ticket was consumed but bound to a different round.
    Mismatched,
}
