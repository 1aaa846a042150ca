//! Conjugation game: conjugate a verb in one tense for all six persons.

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::content::{ConjugationFilter, ContentStore, VERB_CATEGORY};
use crate::error::GameError;
use crate::games::{Challenge, Draw, GameKind, GameMode, Graded, RoundData, require_param};

/// Setup parameters of the conjugation game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConjugationSetup {
    /// Language to draw a verb from.
    pub language: String,
}

/// Answer to a conjugation challenge, one slot per pronoun.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConjugationAnswer {
    /// Verb that was shown.
    pub word_id: i32,
    /// Tense that was shown.
    pub tense: String,
    /// First person singular.
    pub conjugation_1: String,
    /// Second person singular.
    pub conjugation_2: String,
    /// Third person singular.
    pub conjugation_3: String,
    /// First person plural.
    pub conjugation_4: String,
    /// Second person plural.
    pub conjugation_5: String,
    /// Third person plural.
    pub conjugation_6: String,
}

impl ConjugationAnswer {
    /// Slots in pronoun order.
    pub fn slots(&self) -> [&str; 6] {
        [
            &self.conjugation_1,
            &self.conjugation_2,
            &self.conjugation_3,
            &self.conjugation_4,
            &self.conjugation_5,
            &self.conjugation_6,
        ]
    }
}

/// Conjugation game strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConjugationGame;

impl GameMode for ConjugationGame {
    type Setup = ConjugationSetup;
    type Answer = ConjugationAnswer;

    fn kind(&self) -> GameKind {
        GameKind::Conjugation
    }

    #[instrument(skip(self, content))]
    fn draw<C: ContentStore>(&self, content: &C, setup: &Self::Setup) -> Result<Draw, GameError> {
        require_param("language", &setup.language)?;
        let language = content
            .find_language(&setup.language)?
            .ok_or_else(|| GameError::not_found(format!("language {}", setup.language)))?;

        let (verb, conjugation) = content
            .random_conjugation(&ConjugationFilter::verbs_in(*language.id()))?
            .ok_or_else(|| GameError::not_found(format!("no verbs in {}", setup.language)))?;
        debug!(word_id = verb.id(), tense = %conjugation.tense(), "Verb drawn");

        Ok(Draw {
            challenge: Challenge {
                id: *verb.id(),
                word: verb.word_name().clone(),
                tense: Some(conjugation.tense().clone()),
                base_language: None,
            },
            round: RoundData::Conjugation {
                word_id: *verb.id(),
                tense: conjugation.tense().clone(),
            },
        })
    }

    #[instrument(skip(self, content))]
    fn grade<C: ContentStore>(
        &self,
        content: &C,
        answer: &Self::Answer,
    ) -> Result<Graded, GameError> {
        let verb = content
            .find_word(answer.word_id)?
            .ok_or_else(|| GameError::not_found(format!("word {}", answer.word_id)))?;

        let is_verb = match *verb.category_id() {
            Some(category_id) => content
                .find_category(category_id)?
                .is_some_and(|c| c.category_name() == VERB_CATEGORY),
            None => false,
        };
        if !is_verb {
            return Err(GameError::not_found(format!("verb {}", answer.word_id)));
        }

        let conjugation = content
            .find_conjugation(*verb.id(), &answer.tense)?
            .ok_or_else(|| {
                GameError::not_found(format!(
                    "conjugation of {} in {}",
                    verb.word_name(),
                    answer.tense
                ))
            })?;
        let language = content
            .find_language_by_id(*verb.language_id())?
            .ok_or_else(|| GameError::not_found(format!("language {}", verb.language_id())))?;

        Ok(Graded {
            round: RoundData::Conjugation {
                word_id: *verb.id(),
                tense: conjugation.tense().clone(),
            },
            language_id: *language.id(),
            is_correct: slots_match(answer.slots(), conjugation.forms()),
            correct_answer: conjugation_table(language.pronouns(), conjugation.forms()),
        })
    }
}

/// All six trimmed slots must equal the stored forms.
pub fn slots_match(answer: [&str; 6], forms: [&str; 6]) -> bool {
    answer.iter().zip(forms.iter()).all(|(a, f)| a.trim() == *f)
}

/// One `"<pronoun> <form>\n"` line per person.
pub fn conjugation_table(pronouns: [&str; 6], forms: [&str; 6]) -> String {
    pronouns
        .iter()
        .zip(forms.iter())
        .map(|(pronoun, form)| format!("{pronoun} {form}\n"))
        .collect()
}
