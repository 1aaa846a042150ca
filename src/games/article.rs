//! Article game: guess the grammatical article of a noun.

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::content::{ContentStore, WordFilter};
use crate::error::GameError;
use crate::games::{Challenge, Draw, GameKind, GameMode, Graded, RoundData, require_param};

/// Setup parameters of the article game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleSetup {
    /// Language to draw a noun from.
    pub language: String,
}

/// Answer to an article challenge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleAnswer {
    /// Word that was shown.
    pub word_id: i32,
    /// Guessed article.
    pub answer: String,
}

/// Article game strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleGame {
    article_free_languages: Vec<String>,
}

impl ArticleGame {
    /// Creates the game, refusing setup for the listed languages.
    pub fn new(article_free_languages: Vec<String>) -> Self {
        Self {
            article_free_languages,
        }
    }

    fn is_article_free(&self, language: &str) -> bool {
        self.article_free_languages.iter().any(|l| l == language)
    }
}

impl Default for ArticleGame {
    fn default() -> Self {
        Self::new(vec!["English".to_string()])
    }
}

impl GameMode for ArticleGame {
    type Setup = ArticleSetup;
    type Answer = ArticleAnswer;

    fn kind(&self) -> GameKind {
        GameKind::Article
    }

    #[instrument(skip(self, content))]
    fn draw<C: ContentStore>(&self, content: &C, setup: &Self::Setup) -> Result<Draw, GameError> {
        require_param("language", &setup.language)?;
        if self.is_article_free(&setup.language) {
            return Err(GameError::validation(format!(
                "{} does not use articles",
                setup.language
            )));
        }

        let language = content
            .find_language(&setup.language)?
            .ok_or_else(|| GameError::not_found(format!("language {}", setup.language)))?;

        let filter = WordFilter::in_language(*language.id()).with_article();
        let word = content.random_word(&filter)?.ok_or_else(|| {
            GameError::not_found(format!("no nouns with articles in {}", setup.language))
        })?;
        debug!(word_id = word.id(), "Article word drawn");

        Ok(Draw {
            challenge: Challenge {
                id: *word.id(),
                word: word.word_name().clone(),
                tense: None,
                base_language: None,
            },
            round: RoundData::Article {
                word_id: *word.id(),
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
        let article_id = (*word.article_id())
            .ok_or_else(|| GameError::validation(format!("word {} has no article", word.id())))?;
        let article = content
            .find_article(article_id)?
            .ok_or_else(|| GameError::not_found(format!("article {}", article_id)))?;

        Ok(Graded {
            round: RoundData::Article {
                word_id: *word.id(),
            },
            language_id: *word.language_id(),
            is_correct: answer.answer.trim() == article.article_name().as_str(),
            correct_answer: with_article(article.article_name(), word.word_name()),
        })
    }
}

/// Renders a noun with its article. Elided articles (`l'`) attach without a space.
pub fn with_article(article: &str, word: &str) -> String {
    if article.ends_with('\'') {
        format!("{article}{word}")
    } else {
        format!("{article} {word}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_article() {
        assert_eq!(with_article("der", "Hund"), "der Hund");
        assert_eq!(with_article("l'", "arbre"), "l'arbre");
    }

    #[test]
    fn test_article_free_languages() {
        let game = ArticleGame::default();
        assert!(game.is_article_free("English"));
        assert!(!game.is_article_free("German"));
        assert!(!ArticleGame::new(Vec::new()).is_article_free("English"));
    }
}
