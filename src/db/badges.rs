//! Badge persistence: the append-only user ↔ badge relation.

use std::collections::BTreeSet;

use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::achievements::{Badge, BadgeLadder, ScoreAggregates};
use crate::db::schema::{scores, user_badges};
use crate::db::{DbError, GameRepository, NewUserBadge, Score, UserBadge};

impl GameRepository {
    /// Lists the badges a user holds, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn user_badges(&self, user_id: i32) -> Result<Vec<UserBadge>, DbError> {
        let mut conn = self.connection()?;
        let held = user_badges::table
            .filter(user_badges::user_id.eq(user_id))
            .order((user_badges::awarded_at.asc(), user_badges::badge_id.asc()))
            .select(UserBadge::as_select())
            .load(&mut conn)?;
        Ok(held)
    }

    /// Evaluates the ladder for a user and attaches every newly earned badge.
    ///
    /// Reading the scores, reading the held badges and inserting the new ones
    /// happen in one immediate transaction. Badges are never removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, ladder))]
    pub fn award_badges(&self, user_id: i32, ladder: &BadgeLadder) -> Result<Vec<Badge>, DbError> {
        let mut conn = self.connection()?;

        let earned = conn.immediate_transaction(|conn| {
            let user_scores = scores::table
                .filter(scores::user_id.eq(user_id))
                .select(Score::as_select())
                .load(conn)?;
            let held: BTreeSet<i32> = user_badges::table
                .filter(user_badges::user_id.eq(user_id))
                .select(user_badges::badge_id)
                .load::<i32>(conn)?
                .into_iter()
                .collect();

            let aggregates = ScoreAggregates::from_scores(&user_scores);
            let earned = ladder.newly_earned(&aggregates, &held);

            for badge in &earned {
                diesel::insert_into(user_badges::table)
                    .values(&NewUserBadge::new(user_id, badge.id))
                    .on_conflict_do_nothing()
                    .execute(conn)?;
            }
            Ok::<_, DbError>(earned)
        })?;

        if earned.is_empty() {
            debug!("No new badges");
        } else {
            info!(badges = ?earned.iter().map(|b| b.name).collect::<Vec<_>>(), "Badges awarded");
        }
        Ok(earned)
    }
}
