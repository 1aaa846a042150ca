//! Score ledger: one counter per (user, language, game).

use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::db::schema::{scores, users};
use crate::db::{DbError, GameRepository, NewScore, Score};
use crate::games::GameKind;

/// One score row joined with its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct ScoreRow {
    /// Owner id.
    pub user_id: i32,
    /// Owner display name.
    pub display_name: String,
    /// Language the points were earned in.
    pub language_id: i32,
    /// Counter value.
    pub score: i64,
}

impl GameRepository {
    /// Point lookup of a score. Returns `None` if the triple has no row yet.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_score(
        &self,
        user_id: i32,
        language_id: i32,
        game: GameKind,
    ) -> Result<Option<Score>, DbError> {
        let mut conn = self.connection()?;
        let score = scores::table
            .filter(scores::user_id.eq(user_id))
            .filter(scores::language_id.eq(language_id))
            .filter(scores::game_id.eq(game.id()))
            .select(Score::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(score)
    }

    /// Adds one point, creating the row with 1 if it does not exist.
    ///
    /// Runs as a single `INSERT .. ON CONFLICT DO UPDATE`, so concurrent first
    /// increments for the same triple resolve to one row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a referenced row is missing or a database error occurs.
    #[instrument(skip(self))]
    pub fn increment_score(
        &self,
        user_id: i32,
        language_id: i32,
        game: GameKind,
    ) -> Result<Score, DbError> {
        let mut conn = self.connection()?;

        let score = diesel::insert_into(scores::table)
            .values(&NewScore::new(user_id, language_id, game.id(), 1))
            .on_conflict((scores::user_id, scores::language_id, scores::game_id))
            .do_update()
            .set(scores::score.eq(scores::score + 1))
            .returning(Score::as_returning())
            .get_result(&mut conn)?;

        info!(score_id = score.id(), value = score.score(), "Score incremented");
        Ok(score)
    }

    /// Creates a score row holding one point. Returns `None` if the triple already exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a referenced row is missing or a database error occurs.
    #[instrument(skip(self))]
    pub fn create_score(
        &self,
        user_id: i32,
        language_id: i32,
        game: GameKind,
    ) -> Result<Option<Score>, DbError> {
        let mut conn = self.connection()?;

        let created = diesel::insert_into(scores::table)
            .values(&NewScore::new(user_id, language_id, game.id(), 1))
            .on_conflict_do_nothing()
            .returning(Score::as_returning())
            .get_result(&mut conn)
            .optional()?;

        match &created {
            Some(score) => info!(score_id = score.id(), "Score created"),
            None => debug!("Score already exists"),
        }
        Ok(created)
    }

    /// Lists every score of a user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn scores_for_user(&self, user_id: i32) -> Result<Vec<Score>, DbError> {
        let mut conn = self.connection()?;
        let rows = scores::table
            .filter(scores::user_id.eq(user_id))
            .order((scores::language_id.asc(), scores::game_id.asc()))
            .select(Score::as_select())
            .load(&mut conn)?;
        debug!(count = rows.len(), "User scores loaded");
        Ok(rows)
    }

    /// Loads score rows with owner names, optionally restricted to one language.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn score_rows(&self, language_id: Option<i32>) -> Result<Vec<ScoreRow>, DbError> {
        let mut conn = self.connection()?;

        let mut query = scores::table
            .inner_join(users::table)
            .select((
                scores::user_id,
                users::display_name,
                scores::language_id,
                scores::score,
            ))
            .into_boxed();
        if let Some(language_id) = language_id {
            query = query.filter(scores::language_id.eq(language_id));
        }
        let rows = query.load::<ScoreRow>(&mut conn)?;
        debug!(count = rows.len(), "Score rows loaded");
        Ok(rows)
    }
}
