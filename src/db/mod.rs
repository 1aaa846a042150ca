//! Database persistence layer for content, round tickets, scores and badges.

mod badges;
mod content;
mod error;
mod models;
mod repository;
mod rounds;
mod schema; // Diesel generated schema - internal use only
mod scores;

pub use error::DbError;
pub use models::{
    Article, Category, Conjugation, GameRound, Language, NewArticle, NewConjugation, NewGameRound,
    NewLanguage, NewScore, NewSynonym, NewUser, NewUserBadge, NewWord, Score, User, UserBadge,
    Word,
};
pub use repository::{GameRepository, MIGRATIONS};
pub use scores::ScoreRow;
