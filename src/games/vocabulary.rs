//! Vocabulary game: translate a word into a base language.

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::content::{ContentStore, WordFilter};
use crate::db::Word;
use crate::error::GameError;
use crate::games::{Challenge, Draw, GameKind, GameMode, Graded, RoundData, require_param};

/// Separator between synonyms in the expected answer.
pub const SYNONYM_SEPARATOR: &str = ", ";

/// Setup parameters of the vocabulary game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabularySetup {
    /// Language the player answers in.
    pub base_language: String,
    /// Language the shown word is drawn from.
    pub target_language: String,
}

/// Answer to a vocabulary challenge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabularyAnswer {
    /// Word that was shown.
    pub word_id: i32,
    /// Language the answer is given in.
    pub base_language: String,
    /// Comma separated translations.
    pub answer: String,
}

/// Vocabulary game strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct VocabularyGame;

impl GameMode for VocabularyGame {
    type Setup = VocabularySetup;
    type Answer = VocabularyAnswer;

    fn kind(&self) -> GameKind {
        GameKind::Vocabulary
    }

    #[instrument(skip(self, content))]
    fn draw<C: ContentStore>(&self, content: &C, setup: &Self::Setup) -> Result<Draw, GameError> {
        require_param("base_language", &setup.base_language)?;
        require_param("target_language", &setup.target_language)?;
        if setup.base_language == setup.target_language {
            return Err(GameError::validation(
                "base_language and target_language must be different",
            ));
        }

        let base = content
            .find_language(&setup.base_language)?
            .ok_or_else(|| GameError::not_found(format!("language {}", setup.base_language)))?;
        let target = content
            .find_language(&setup.target_language)?
            .ok_or_else(|| GameError::not_found(format!("language {}", setup.target_language)))?;

        let word = content
            .random_word(&WordFilter::in_language(*target.id()))?
            .ok_or_else(|| {
                GameError::not_found(format!("no words in {}", target.language_name()))
            })?;
        debug!(word_id = word.id(), "Vocabulary word drawn");

        Ok(Draw {
            challenge: Challenge {
                id: *word.id(),
                word: word.word_name().clone(),
                tense: None,
                base_language: Some(base.language_name().clone()),
            },
            round: RoundData::Vocabulary {
                word_id: *word.id(),
                base_language: base.language_name().clone(),
            },
        })
    }

    #[instrument(skip(self, content))]
    fn grade<C: ContentStore>(
        &self,
        content: &C,
        answer: &Self::Answer,
    ) -> Result<Graded, GameError> {
        let word = content
            .find_word(answer.word_id)?
            .ok_or_else(|| GameError::not_found(format!("word {}", answer.word_id)))?;
        let base = content
            .find_language(&answer.base_language)?
            .ok_or_else(|| GameError::not_found(format!("language {}", answer.base_language)))?;

        if base.id() == word.language_id() {
            return Err(GameError::validation(
                "base_language must differ from the language of the word",
            ));
        }

        let synonyms = content.synonyms_in(*word.id(), *base.id())?;
        let expected = expected_answer(&synonyms);

        Ok(Graded {
            round: RoundData::Vocabulary {
                word_id: *word.id(),
                base_language: base.language_name().clone(),
            },
            language_id: *word.language_id(),
            is_correct: is_correct(&answer.answer, &expected),
            correct_answer: expected,
        })
    }
}

/// Joins synonym names in relation order.
pub fn expected_answer(synonyms: &[Word]) -> String {
    synonyms
        .iter()
        .map(|w| w.word_name().as_str())
        .collect::<Vec<_>>()
        .join(SYNONYM_SEPARATOR)
}

/// Exact match against the joined list. A word without synonyms cannot be answered.
pub fn is_correct(answer: &str, expected: &str) -> bool {
    !expected.is_empty() && answer.trim() == expected
}
