//! Achievement evaluation: the badge catalog and the ordered unlock ladder.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::db::Score;

/// Achievement definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    /// Stable badge id.
    pub id: i32,
    /// Display name.
    pub name: &'static str,
    /// Hex color without the leading `#`.
    pub color: &'static str,
    /// What earns the badge.
    pub description: &'static str,
}

/// First score in any game.
pub const EXPLORER: Badge = Badge {
    id: 1,
    name: "Explorer",
    color: "2E86C1",
    description: "Scored your first points in a Pajelingo game.",
};

/// Large total in a single language.
pub const LINGUISTIC_MASTERY: Badge = Badge {
    id: 2,
    name: "Linguistic Mastery",
    color: "D4AC0D",
    description: "Reached the mastery score in a single language.",
};

/// Points in two languages.
pub const BILINGUAL: Badge = Badge {
    id: 3,
    name: "Bilingual",
    color: "28B463",
    description: "Scored points in two different languages.",
};

/// Points in three languages.
pub const TRILINGUAL: Badge = Badge {
    id: 4,
    name: "Trilingual",
    color: "CA6F1E",
    description: "Scored points in three different languages.",
};

/// Points in four languages.
pub const POLYGLOT: Badge = Badge {
    id: 5,
    name: "Polyglot",
    color: "884EA0",
    description: "Scored points in four or more different languages.",
};

/// Every badge in ladder order.
pub const BADGES: [Badge; 5] = [EXPLORER, LINGUISTIC_MASTERY, BILINGUAL, TRILINGUAL, POLYGLOT];

/// Looks a badge up by id.
pub fn badge_by_id(id: i32) -> Option<Badge> {
    BADGES.iter().copied().find(|b| b.id == id)
}

/// Per-language score totals of one user, summed across games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreAggregates {
    totals: BTreeMap<i32, i64>,
}

impl ScoreAggregates {
    /// Sums score rows per language.
    #[instrument(skip(scores), fields(rows = scores.len()))]
    pub fn from_scores(scores: &[Score]) -> Self {
        let mut totals = BTreeMap::new();
        for score in scores {
            *totals.entry(*score.language_id()).or_insert(0) += *score.score();
        }
        Self { totals }
    }

    /// Total for one language, 0 if the user never scored in it.
    pub fn language_total(&self, language_id: i32) -> i64 {
        self.totals.get(&language_id).copied().unwrap_or(0)
    }

    /// Largest single-language total.
    pub fn best_language_total(&self) -> i64 {
        self.totals.values().copied().max().unwrap_or(0)
    }

    /// Number of languages with a non-zero total.
    pub fn distinct_languages(&self) -> usize {
        self.totals.values().filter(|total| **total > 0).count()
    }

    /// Whether any score is non-zero.
    pub fn has_any_score(&self) -> bool {
        self.distinct_languages() > 0
    }
}

/// Activation predicate of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRule {
    /// Any non-zero score.
    AnyScore,
    /// Some language total reaches the threshold.
    LanguageTotalAtLeast(i64),
    /// Non-zero totals in at least this many languages.
    DistinctLanguagesAtLeast(usize),
}

impl BadgeRule {
    /// Evaluates the rule against a user's aggregates.
    pub fn is_met(self, aggregates: &ScoreAggregates) -> bool {
        match self {
            Self::AnyScore => aggregates.has_any_score(),
            Self::LanguageTotalAtLeast(threshold) => {
                aggregates.has_any_score() && aggregates.best_language_total() >= threshold
            }
            Self::DistinctLanguagesAtLeast(count) => aggregates.distinct_languages() >= count,
        }
    }
}

/// Ordered table of (badge, rule) pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeLadder {
    steps: Vec<(Badge, BadgeRule)>,
}

impl BadgeLadder {
    /// Builds the standard ladder with the given single-language mastery threshold.
    #[instrument]
    pub fn new(mastery_threshold: i64) -> Self {
        Self {
            steps: vec![
                (EXPLORER, BadgeRule::AnyScore),
                (LINGUISTIC_MASTERY, BadgeRule::LanguageTotalAtLeast(mastery_threshold)),
                (BILINGUAL, BadgeRule::DistinctLanguagesAtLeast(2)),
                (TRILINGUAL, BadgeRule::DistinctLanguagesAtLeast(3)),
                (POLYGLOT, BadgeRule::DistinctLanguagesAtLeast(4)),
            ],
        }
    }

    /// Badges whose rule holds and that are not yet held, in ladder order.
    #[instrument(skip(self, aggregates, held), fields(held = held.len()))]
    pub fn newly_earned(&self, aggregates: &ScoreAggregates, held: &BTreeSet<i32>) -> Vec<Badge> {
        let earned: Vec<Badge> = self
            .steps
            .iter()
            .filter(|(badge, rule)| !held.contains(&badge.id) && rule.is_met(aggregates))
            .map(|(badge, _)| *badge)
            .collect();
        debug!(count = earned.len(), "Ladder evaluated");
        earned
    }
}

impl Default for BadgeLadder {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregates(totals: &[(i32, i64)]) -> ScoreAggregates {
        ScoreAggregates {
            totals: totals.iter().copied().collect(),
        }
    }

    #[test]
    fn test_no_scores_earn_nothing() {
        let ladder = BadgeLadder::default();
        let earned = ladder.newly_earned(&ScoreAggregates::default(), &BTreeSet::new());
        assert!(earned.is_empty());
    }

    #[test]
    fn test_first_point_earns_explorer_only() {
        let ladder = BadgeLadder::default();
        let earned = ladder.newly_earned(&aggregates(&[(1, 1)]), &BTreeSet::new());
        assert_eq!(earned, vec![EXPLORER]);
    }

    #[test]
    fn test_mastery_threshold_is_inclusive() {
        let ladder = BadgeLadder::new(100);
        let below = ladder.newly_earned(&aggregates(&[(1, 99)]), &BTreeSet::new());
        assert!(!below.contains(&LINGUISTIC_MASTERY));
        let at = ladder.newly_earned(&aggregates(&[(1, 100)]), &BTreeSet::new());
        assert!(at.contains(&LINGUISTIC_MASTERY));
    }

    #[test]
    fn test_language_count_ladder() {
        let ladder = BadgeLadder::default();
        let earned = ladder.newly_earned(
            &aggregates(&[(1, 3), (2, 1), (3, 5), (4, 2)]),
            &BTreeSet::new(),
        );
        assert_eq!(earned, vec![EXPLORER, BILINGUAL, TRILINGUAL, POLYGLOT]);
    }

    #[test]
    fn test_zero_totals_do_not_count_as_languages() {
        let agg = aggregates(&[(1, 0), (2, 4)]);
        assert_eq!(agg.distinct_languages(), 1);
        assert_eq!(agg.language_total(1), 0);
        assert_eq!(agg.language_total(9), 0);
    }

    #[test]
    fn test_held_badges_are_skipped() {
        let ladder = BadgeLadder::default();
        let held: BTreeSet<i32> = [EXPLORER.id, BILINGUAL.id].into_iter().collect();
        let earned = ladder.newly_earned(&aggregates(&[(1, 1), (2, 1)]), &held);
        assert!(earned.is_empty());
    }

    #[test]
    fn test_badge_lookup() {
        assert_eq!(badge_by_id(5), Some(POLYGLOT));
        assert_eq!(badge_by_id(42), None);
        assert_eq!(BadgeLadder::default().steps.len(), BADGES.len());
    }
}
