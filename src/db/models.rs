//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::GameKind;

/// User profile database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::users)]
pub struct User {
    id: i32,
    display_name: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Insertable user model for creating new users.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    display_name: String,
}

/// A language with its six ordered personal pronouns.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::languages)]
pub struct Language {
    id: i32,
    language_name: String,
    personal_pronoun_1: Option<String>,
    personal_pronoun_2: Option<String>,
    personal_pronoun_3: Option<String>,
    personal_pronoun_4: Option<String>,
    personal_pronoun_5: Option<String>,
    personal_pronoun_6: Option<String>,
}

impl Language {
    /// Returns the pronoun slots in conjugation order (1..6).
    pub fn pronouns(&self) -> [&str; 6] {
        [
            self.personal_pronoun_1.as_deref().unwrap_or_default(),
            self.personal_pronoun_2.as_deref().unwrap_or_default(),
            self.personal_pronoun_3.as_deref().unwrap_or_default(),
            self.personal_pronoun_4.as_deref().unwrap_or_default(),
            self.personal_pronoun_5.as_deref().unwrap_or_default(),
            self.personal_pronoun_6.as_deref().unwrap_or_default(),
        ]
    }
}

/// Insertable language model.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::languages)]
pub struct NewLanguage {
    language_name: String,
    personal_pronoun_1: Option<String>,
    personal_pronoun_2: Option<String>,
    personal_pronoun_3: Option<String>,
    personal_pronoun_4: Option<String>,
    personal_pronoun_5: Option<String>,
    personal_pronoun_6: Option<String>,
}

impl NewLanguage {
    /// Creates a language without pronouns.
    pub fn new(language_name: String) -> Self {
        Self {
            language_name,
            personal_pronoun_1: None,
            personal_pronoun_2: None,
            personal_pronoun_3: None,
            personal_pronoun_4: None,
            personal_pronoun_5: None,
            personal_pronoun_6: None,
        }
    }

    /// Sets the six pronoun slots in conjugation order.
    pub fn with_pronouns(mut self, pronouns: [String; 6]) -> Self {
        let [p1, p2, p3, p4, p5, p6] = pronouns;
        self.personal_pronoun_1 = Some(p1);
        self.personal_pronoun_2 = Some(p2);
        self.personal_pronoun_3 = Some(p3);
        self.personal_pronoun_4 = Some(p4);
        self.personal_pronoun_5 = Some(p5);
        self.personal_pronoun_6 = Some(p6);
        self
    }
}

/// Word category (e.g. "verbs").
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::categories)]
pub struct Category {
    id: i32,
    category_name: String,
}

/// Grammatical article of a language.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::articles)]
pub struct Article {
    id: i32,
    article_name: String,
    language_id: i32,
}

/// Insertable article model.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::articles)]
pub struct NewArticle {
    article_name: String,
    language_id: i32,
}

/// Vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::words)]
pub struct Word {
    id: i32,
    word_name: String,
    language_id: i32,
    article_id: Option<i32>,
    category_id: Option<i32>,
}

/// Insertable word model.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::words)]
pub struct NewWord {
    word_name: String,
    language_id: i32,
    article_id: Option<i32>,
    category_id: Option<i32>,
}

/// Six ordered conjugation forms of a verb in one tense.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::conjugations)]
pub struct Conjugation {
    id: i32,
    word_id: i32,
    tense: String,
    conjugation_1: String,
    conjugation_2: String,
    conjugation_3: String,
    conjugation_4: String,
    conjugation_5: String,
    conjugation_6: String,
}

impl Conjugation {
    /// Returns the forms in pronoun order (1..6).
    pub fn forms(&self) -> [&str; 6] {
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

/// Insertable conjugation model.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::conjugations)]
pub struct NewConjugation {
    word_id: i32,
    tense: String,
    conjugation_1: String,
    conjugation_2: String,
    conjugation_3: String,
    conjugation_4: String,
    conjugation_5: String,
    conjugation_6: String,
}

impl NewConjugation {
    /// Creates a conjugation row from the six forms in pronoun order.
    pub fn new(word_id: i32, tense: String, forms: [String; 6]) -> Self {
        let [c1, c2, c3, c4, c5, c6] = forms;
        Self {
            word_id,
            tense,
            conjugation_1: c1,
            conjugation_2: c2,
            conjugation_3: c3,
            conjugation_4: c4,
            conjugation_5: c5,
            conjugation_6: c6,
        }
    }
}

/// Symmetric synonym link, stored once per direction.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::word_synonyms)]
pub struct NewSynonym {
    word_id: i32,
    synonym_id: i32,
}

/// Pending challenge for one (game, user) pair.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::game_rounds)]
pub struct GameRound {
    id: i32,
    game_id: i32,
    user_id: i32,
    round_data: String,
}

/// Insertable round ticket.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::game_rounds)]
pub struct NewGameRound {
    game_id: i32,
    user_id: i32,
    round_data: String,
}

/// Score counter for one (user, language, game) triple.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::scores)]
pub struct Score {
    id: i32,
    user_id: i32,
    language_id: i32,
    game_id: i32,
    score: i64,
}

impl Score {
    /// Parses the stored game id into a [`GameKind`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored id is outside the game catalog.
    #[instrument(skip(self), fields(game_id = self.game_id))]
    pub fn game(&self) -> Result<GameKind, DbError> {
        GameKind::from_id(self.game_id)
            .ok_or_else(|| DbError::new(format!("Invalid game id: {}", self.game_id)))
    }
}

/// Insertable score row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::scores)]
pub struct NewScore {
    user_id: i32,
    language_id: i32,
    game_id: i32,
    score: i64,
}

/// Badge attached to a user.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::user_badges)]
pub struct UserBadge {
    user_id: i32,
    badge_id: i32,
    awarded_at: NaiveDateTime,
}

/// Insertable user badge link.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::user_badges)]
pub struct NewUserBadge {
    user_id: i32,
    badge_id: i32,
}
