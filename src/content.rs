//! Read-only contract for the linguistic content the games draw from.

use derive_getters::Getters;

use crate::db::{Article, Category, Conjugation, DbError, Language, Word};

/// Category name that marks a word as a verb.
pub const VERB_CATEGORY: &str = "verbs";

/// Eligibility filter for drawing a random word.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct WordFilter {
    language_id: i32,
    require_article: bool,
}

impl WordFilter {
    /// Matches every word of a language.
    pub fn in_language(language_id: i32) -> Self {
        Self {
            language_id,
            require_article: false,
        }
    }

    /// Only matches words that carry an article.
    pub fn with_article(mut self) -> Self {
        self.require_article = true;
        self
    }
}

/// Eligibility filter for drawing a random (verb, conjugation) pair.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ConjugationFilter {
    language_id: i32,
    category: String,
}

impl ConjugationFilter {
    /// Matches conjugations of verbs in the given language.
    pub fn verbs_in(language_id: i32) -> Self {
        Self {
            language_id,
            category: VERB_CATEGORY.to_string(),
        }
    }
}

/// Lookup interface over languages, words, articles and conjugations.
///
/// Implementations never mutate content. Lookups return `Ok(None)` when the
/// key does not resolve; callers decide whether that is a "not found".
pub trait ContentStore {
    /// Finds a language by its natural key.
    fn find_language(&self, name: &str) -> Result<Option<Language>, DbError>;

    /// Finds a language by id.
    fn find_language_by_id(&self, id: i32) -> Result<Option<Language>, DbError>;

    /// Finds a word by id.
    fn find_word(&self, id: i32) -> Result<Option<Word>, DbError>;

    /// Finds an article by id.
    fn find_article(&self, id: i32) -> Result<Option<Article>, DbError>;

    /// Finds a category by id.
    fn find_category(&self, id: i32) -> Result<Option<Category>, DbError>;

    /// Finds the conjugation of a word in a tense.
    fn find_conjugation(&self, word_id: i32, tense: &str) -> Result<Option<Conjugation>, DbError>;

    /// Returns the synonyms of a word that belong to a language, in relation order.
    fn synonyms_in(&self, word_id: i32, language_id: i32) -> Result<Vec<Word>, DbError>;

    /// Draws one uniformly random word matching the filter.
    fn random_word(&self, filter: &WordFilter) -> Result<Option<Word>, DbError>;

    /// Draws one uniformly random (verb, conjugation) pair matching the filter.
    fn random_conjugation(
        &self,
        filter: &ConjugationFilter,
    ) -> Result<Option<(Word, Conjugation)>, DbError>;
}
