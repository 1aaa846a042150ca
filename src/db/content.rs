//! Content queries: the [`ContentStore`] implementation plus the inserts used
//! by content packs.

use diesel::prelude::*;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

use crate::content::{ConjugationFilter, ContentStore, WordFilter};
use crate::db::schema::{articles, categories, conjugations, languages, word_synonyms, words};
use crate::db::{
    Article, Category, Conjugation, DbError, GameRepository, Language, NewArticle,
    NewConjugation, NewLanguage, NewSynonym, NewWord, Word,
};

impl ContentStore for GameRepository {
    #[instrument(skip(self))]
    fn find_language(&self, name: &str) -> Result<Option<Language>, DbError> {
        let mut conn = self.connection()?;
        let language = languages::table
            .filter(languages::language_name.eq(name))
            .select(Language::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(language)
    }

    #[instrument(skip(self))]
    fn find_language_by_id(&self, id: i32) -> Result<Option<Language>, DbError> {
        let mut conn = self.connection()?;
        let language = languages::table
            .find(id)
            .select(Language::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(language)
    }

    #[instrument(skip(self))]
    fn find_word(&self, id: i32) -> Result<Option<Word>, DbError> {
        let mut conn = self.connection()?;
        let word = words::table
            .find(id)
            .select(Word::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(word)
    }

    #[instrument(skip(self))]
    fn find_article(&self, id: i32) -> Result<Option<Article>, DbError> {
        let mut conn = self.connection()?;
        let article = articles::table
            .find(id)
            .select(Article::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(article)
    }

    #[instrument(skip(self))]
    fn find_category(&self, id: i32) -> Result<Option<Category>, DbError> {
        let mut conn = self.connection()?;
        let category = categories::table
            .find(id)
            .select(Category::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(category)
    }

    #[instrument(skip(self))]
    fn find_conjugation(&self, word_id: i32, tense: &str) -> Result<Option<Conjugation>, DbError> {
        let mut conn = self.connection()?;
        let conjugation = conjugations::table
            .filter(conjugations::word_id.eq(word_id))
            .filter(conjugations::tense.eq(tense))
            .select(Conjugation::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(conjugation)
    }

    #[instrument(skip(self))]
    fn synonyms_in(&self, word_id: i32, language_id: i32) -> Result<Vec<Word>, DbError> {
        let mut conn = self.connection()?;
        let synonyms = word_synonyms::table
            .inner_join(words::table.on(words::id.eq(word_synonyms::synonym_id)))
            .filter(word_synonyms::word_id.eq(word_id))
            .filter(words::language_id.eq(language_id))
            .order(word_synonyms::id.asc())
            .select(Word::as_select())
            .load(&mut conn)?;
        debug!(count = synonyms.len(), "Synonyms loaded");
        Ok(synonyms)
    }

    #[instrument(skip(self))]
    fn random_word(&self, filter: &WordFilter) -> Result<Option<Word>, DbError> {
        let mut conn = self.connection()?;

        let mut query = words::table
            .filter(words::language_id.eq(*filter.language_id()))
            .select(words::id)
            .into_boxed();
        if *filter.require_article() {
            query = query.filter(words::article_id.is_not_null());
        }
        let eligible: Vec<i32> = query.load(&mut conn)?;
        debug!(eligible = eligible.len(), "Eligible words loaded");

        let Some(id) = eligible.choose(&mut rand::thread_rng()) else {
            return Ok(None);
        };
        let word = words::table
            .find(*id)
            .select(Word::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(word)
    }

    #[instrument(skip(self))]
    fn random_conjugation(
        &self,
        filter: &ConjugationFilter,
    ) -> Result<Option<(Word, Conjugation)>, DbError> {
        let mut conn = self.connection()?;

        let eligible: Vec<i32> = conjugations::table
            .inner_join(words::table)
            .filter(words::language_id.eq(*filter.language_id()))
            .filter(
                words::category_id.eq_any(
                    categories::table
                        .filter(categories::category_name.eq(filter.category().clone()))
                        .select(categories::id.nullable()),
                ),
            )
            .select(conjugations::id)
            .load(&mut conn)?;
        debug!(eligible = eligible.len(), "Eligible conjugations loaded");

        let Some(id) = eligible.choose(&mut rand::thread_rng()) else {
            return Ok(None);
        };
        let pair = conjugations::table
            .inner_join(words::table)
            .filter(conjugations::id.eq(*id))
            .select((Word::as_select(), Conjugation::as_select()))
            .first::<(Word, Conjugation)>(&mut conn)
            .optional()?;
        Ok(pair)
    }
}

impl GameRepository {
    /// Lists all languages ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_languages(&self) -> Result<Vec<Language>, DbError> {
        let mut conn = self.connection()?;
        let all = languages::table
            .order(languages::language_name.asc())
            .select(Language::as_select())
            .load(&mut conn)?;
        Ok(all)
    }

    /// Inserts a language.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the name is taken or a database error occurs.
    #[instrument(skip(self, language))]
    pub fn add_language(&self, language: NewLanguage) -> Result<Language, DbError> {
        let mut conn = self.connection()?;
        let language = diesel::insert_into(languages::table)
            .values(&language)
            .returning(Language::as_returning())
            .get_result(&mut conn)?;
        info!(language_id = language.id(), name = %language.language_name(), "Language added");
        Ok(language)
    }

    /// Returns the category with the given name, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn ensure_category(&self, name: &str) -> Result<Category, DbError> {
        let mut conn = self.connection()?;
        conn.immediate_transaction(|conn| {
            let existing = categories::table
                .filter(categories::category_name.eq(name))
                .select(Category::as_select())
                .first(conn)
                .optional()?;
            if let Some(category) = existing {
                return Ok(category);
            }
            let category = diesel::insert_into(categories::table)
                .values(categories::category_name.eq(name))
                .returning(Category::as_returning())
                .get_result(conn)?;
            debug!(category_id = category.id(), "Category created");
            Ok(category)
        })
    }

    /// Inserts an article.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the (article, language) pair exists or a database error occurs.
    #[instrument(skip(self, article))]
    pub fn add_article(&self, article: NewArticle) -> Result<Article, DbError> {
        let mut conn = self.connection()?;
        let article = diesel::insert_into(articles::table)
            .values(&article)
            .returning(Article::as_returning())
            .get_result(&mut conn)?;
        Ok(article)
    }

    /// Finds an article of a language by name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_article_by_name(
        &self,
        language_id: i32,
        name: &str,
    ) -> Result<Option<Article>, DbError> {
        let mut conn = self.connection()?;
        let article = articles::table
            .filter(articles::language_id.eq(language_id))
            .filter(articles::article_name.eq(name))
            .select(Article::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(article)
    }

    /// Inserts a word.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the word already exists or a database error occurs.
    #[instrument(skip(self, word))]
    pub fn add_word(&self, word: NewWord) -> Result<Word, DbError> {
        let mut conn = self.connection()?;
        let word = diesel::insert_into(words::table)
            .values(&word)
            .returning(Word::as_returning())
            .get_result(&mut conn)?;
        debug!(word_id = word.id(), name = %word.word_name(), "Word added");
        Ok(word)
    }

    /// Finds the first word of a language with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_word_by_name(&self, language_id: i32, name: &str) -> Result<Option<Word>, DbError> {
        let mut conn = self.connection()?;
        let word = words::table
            .filter(words::language_id.eq(language_id))
            .filter(words::word_name.eq(name))
            .order(words::id.asc())
            .select(Word::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(word)
    }

    /// Finds a word of a language by name and article.
    ///
    /// `article_id = None` only matches words without an article, so the same
    /// spelling under different articles resolves to different words.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_word_with_article(
        &self,
        language_id: i32,
        name: &str,
        article_id: Option<i32>,
    ) -> Result<Option<Word>, DbError> {
        let mut conn = self.connection()?;
        let mut query = words::table
            .filter(words::language_id.eq(language_id))
            .filter(words::word_name.eq(name))
            .select(Word::as_select())
            .into_boxed();
        query = match article_id {
            Some(id) => query.filter(words::article_id.eq(id)),
            None => query.filter(words::article_id.is_null()),
        };
        let word = query.first(&mut conn).optional()?;
        Ok(word)
    }

    /// Links two words as synonyms in both directions. Existing links are kept.
    ///
    /// Returns the number of directed links actually inserted: 2 for a new
    /// pair, 0 if the pair was already linked.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a word is missing, the ids are equal, or a database error occurs.
    #[instrument(skip(self))]
    pub fn link_synonyms(&self, word_id: i32, synonym_id: i32) -> Result<usize, DbError> {
        if word_id == synonym_id {
            return Err(DbError::new(format!("Word {} cannot be its own synonym", word_id)));
        }
        let mut conn = self.connection()?;
        let inserted = conn.immediate_transaction(|conn| {
            let mut inserted = 0;
            for link in [
                NewSynonym::new(word_id, synonym_id),
                NewSynonym::new(synonym_id, word_id),
            ] {
                inserted += diesel::insert_into(word_synonyms::table)
                    .values(&link)
                    .on_conflict_do_nothing()
                    .execute(conn)?;
            }
            Ok::<_, DbError>(inserted)
        })?;
        debug!(word_id, synonym_id, inserted, "Synonyms linked");
        Ok(inserted)
    }

    /// Inserts a conjugation.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the (word, tense) pair exists or a database error occurs.
    #[instrument(skip(self, conjugation))]
    pub fn add_conjugation(&self, conjugation: NewConjugation) -> Result<Conjugation, DbError> {
        let mut conn = self.connection()?;
        let conjugation = diesel::insert_into(conjugations::table)
            .values(&conjugation)
            .returning(Conjugation::as_returning())
            .get_result(&mut conn)?;
        debug!(conjugation_id = conjugation.id(), tense = %conjugation.tense(), "Conjugation added");
        Ok(conjugation)
    }
}
