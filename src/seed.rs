//! Content packs: TOML files of languages, words, synonyms and conjugations.
//!
//! Loading is idempotent. Entries that already exist are reused, so a pack
//! can be applied to a database more than once.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::content::ContentStore;
use crate::db::{DbError, GameRepository, NewArticle, NewConjugation, NewLanguage, NewWord};

/// A language with its pronouns and articles.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    /// Unique language name.
    pub name: String,
    /// Six personal pronouns in conjugation order.
    #[serde(default)]
    pub pronouns: Option<[String; 6]>,
    /// Grammatical articles.
    #[serde(default)]
    pub articles: Vec<String>,
}

/// Reference to a word by language and name.
#[derive(Debug, Clone, Deserialize)]
pub struct WordRef {
    /// Language of the referenced word.
    pub language: String,
    /// Name of the referenced word.
    pub name: String,
    /// Article of the referenced word. Without one, the first word with this name is used.
    #[serde(default)]
    pub article: Option<String>,
}

/// Conjugation table of one tense.
#[derive(Debug, Clone, Deserialize)]
pub struct ConjugationEntry {
    /// Tense name.
    pub tense: String,
    /// Six forms in pronoun order.
    pub forms: [String; 6],
}

/// A vocabulary entry.
#[derive(Debug, Clone, Deserialize)]
pub struct WordEntry {
    /// Language the word belongs to.
    pub language: String,
    /// Word text.
    pub name: String,
    /// Article name, for nouns.
    #[serde(default)]
    pub article: Option<String>,
    /// Category name.
    #[serde(default)]
    pub category: Option<String>,
    /// Words this one translates to, in answer order.
    #[serde(default)]
    pub synonyms: Vec<WordRef>,
    /// Conjugation tables, for verbs.
    #[serde(default)]
    pub conjugations: Vec<ConjugationEntry>,
}

/// Whole content pack.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPack {
    /// Languages, created first.
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,
    /// Words, created in file order.
    #[serde(default)]
    pub words: Vec<WordEntry>,
}

/// Counts of rows created by a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// New languages.
    pub languages: usize,
    /// New articles.
    pub articles: usize,
    /// New words.
    pub words: usize,
    /// Synonym pairs newly linked.
    pub synonyms: usize,
    /// New conjugation tables.
    pub conjugations: usize,
}

impl ContentPack {
    /// Parses a pack from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the text is not a valid pack.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, DbError> {
        toml::from_str(content).map_err(|e| DbError::new(format!("Invalid content pack: {}", e)))
    }

    /// Reads a pack from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DbError::new(format!("Failed to read content pack: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Writes the pack into the repository.
    ///
    /// Words are created before synonyms are linked, so a synonym may refer
    /// to a word listed later in the pack.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a reference does not resolve or a database error occurs.
    #[instrument(skip(self, repository), fields(languages = self.languages.len(), words = self.words.len()))]
    pub fn load_into(&self, repository: &GameRepository) -> Result<SeedReport, DbError> {
        let mut report = SeedReport::default();

        for entry in &self.languages {
            let language = match repository.find_language(&entry.name)? {
                Some(language) => language,
                None => {
                    let mut new = NewLanguage::new(entry.name.clone());
                    if let Some(pronouns) = &entry.pronouns {
                        new = new.with_pronouns(pronouns.clone());
                    }
                    report.languages += 1;
                    repository.add_language(new)?
                }
            };
            for article in &entry.articles {
                if repository
                    .find_article_by_name(*language.id(), article)?
                    .is_none()
                {
                    repository.add_article(NewArticle::new(article.clone(), *language.id()))?;
                    report.articles += 1;
                }
            }
        }

        let mut word_ids = Vec::with_capacity(self.words.len());
        for entry in &self.words {
            let language_id = language_id(repository, &entry.language)?;
            let article_id =
                article_id(repository, language_id, &entry.language, entry.article.as_deref())?;
            let word_id = match repository.find_word_with_article(
                language_id,
                &entry.name,
                article_id,
            )? {
                Some(word) => *word.id(),
                None => {
                    let category_id = match &entry.category {
                        Some(name) => Some(*repository.ensure_category(name)?.id()),
                        None => None,
                    };
                    report.words += 1;
                    *repository
                        .add_word(NewWord::new(
                            entry.name.clone(),
                            language_id,
                            article_id,
                            category_id,
                        ))?
                        .id()
                }
            };
            word_ids.push(word_id);

            for table in &entry.conjugations {
                if repository.find_conjugation(word_id, &table.tense)?.is_none() {
                    repository.add_conjugation(NewConjugation::new(
                        word_id,
                        table.tense.clone(),
                        table.forms.clone(),
                    ))?;
                    report.conjugations += 1;
                }
            }
        }

        for (entry, word_id) in self.words.iter().zip(word_ids) {
            for synonym in &entry.synonyms {
                let synonym_id = word_id_of(repository, synonym)?;
                if repository.link_synonyms(word_id, synonym_id)? > 0 {
                    report.synonyms += 1;
                }
            }
        }

        info!(?report, "Content pack loaded");
        Ok(report)
    }
}

fn language_id(repository: &GameRepository, name: &str) -> Result<i32, DbError> {
    repository
        .find_language(name)?
        .map(|l| *l.id())
        .ok_or_else(|| DbError::new(format!("Unknown language '{}'", name)))
}

fn article_id(
    repository: &GameRepository,
    language_id: i32,
    language: &str,
    article: Option<&str>,
) -> Result<Option<i32>, DbError> {
    let Some(name) = article else {
        return Ok(None);
    };
    let found = repository
        .find_article_by_name(language_id, name)?
        .ok_or_else(|| DbError::new(format!("Unknown article '{}' for {}", name, language)))?;
    Ok(Some(*found.id()))
}

fn word_id_of(repository: &GameRepository, reference: &WordRef) -> Result<i32, DbError> {
    let language_id = language_id(repository, &reference.language)?;
    let word = match reference.article.as_deref() {
        Some(article) => {
            let article_id = article_id(repository, language_id, &reference.language, Some(article))?;
            repository.find_word_with_article(language_id, &reference.name, article_id)?
        }
        None => repository.find_word_by_name(language_id, &reference.name)?,
    };
    let word = word.ok_or_else(|| {
        DbError::new(format!(
            "Unknown word '{}' in {}",
            reference.name, reference.language
        ))
    })?;
    debug!(word_id = word.id(), "Resolved word reference");
    Ok(*word.id())
}
