//! Round ticket store: one pending challenge per (game, user).

use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::{debug, info, instrument, warn};

use crate::db::schema::game_rounds;
use crate::db::{DbError, GameRepository, GameRound, NewGameRound};
use crate::games::{GameKind, RoundData, TicketCheck};

impl GameRepository {
    /// Records the pending round for a user, replacing any earlier ticket for the same game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the user does not exist or a database error occurs.
    #[instrument(skip(self, round))]
    pub fn issue_round(&self, game: GameKind, user_id: i32, round: &RoundData) -> Result<(), DbError> {
        let payload = serde_json::to_string(round)?;
        let mut conn = self.connection()?;

        diesel::insert_into(game_rounds::table)
            .values(&NewGameRound::new(game.id(), user_id, payload))
            .on_conflict((game_rounds::user_id, game_rounds::game_id))
            .do_update()
            .set(game_rounds::round_data.eq(excluded(game_rounds::round_data)))
            .execute(&mut conn)?;

        info!(user_id, "Round ticket issued");
        Ok(())
    }

    /// Returns the pending round for a user without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored payload is malformed or a database error occurs.
    #[instrument(skip(self))]
    pub fn pending_round(&self, game: GameKind, user_id: i32) -> Result<Option<RoundData>, DbError> {
        let mut conn = self.connection()?;
        let ticket = game_rounds::table
            .filter(game_rounds::user_id.eq(user_id))
            .filter(game_rounds::game_id.eq(game.id()))
            .select(GameRound::as_select())
            .first(&mut conn)
            .optional()?;

        ticket
            .map(|t| serde_json::from_str(t.round_data()).map_err(DbError::from))
            .transpose()
    }

    /// Deletes the pending ticket for a user and compares it with the expected round.
    ///
    /// The delete and the read happen in a single `DELETE .. RETURNING`
    /// statement, so concurrent callers cannot both consume the same ticket.
    /// The ticket is gone afterwards whether or not it matched.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, expected))]
    pub fn consume_round(
        &self,
        game: GameKind,
        user_id: i32,
        expected: &RoundData,
    ) -> Result<TicketCheck, DbError> {
        let mut conn = self.connection()?;

        let consumed = diesel::delete(
            game_rounds::table
                .filter(game_rounds::user_id.eq(user_id))
                .filter(game_rounds::game_id.eq(game.id())),
        )
        .returning(GameRound::as_returning())
        .get_result(&mut conn)
        .optional()?;

        let Some(ticket) = consumed else {
            warn!(user_id, "No pending round to consume");
            return Ok(TicketCheck::Missing);
        };

        let check = match serde_json::from_str::<RoundData>(ticket.round_data()) {
            Ok(stored) if stored == *expected => TicketCheck::Matched,
            Ok(stored) => {
                warn!(user_id, ?stored, ?expected, "Round ticket does not match the answered round");
                TicketCheck::Mismatched
            }
            Err(e) => {
                warn!(user_id, error = %e, "Stored round data is malformed");
                TicketCheck::Mismatched
            }
        };
        debug!(user_id, ?check, "Round ticket consumed");
        Ok(check)
    }
}
