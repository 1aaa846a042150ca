//! Pajelingo library - game rounds, scores and badges for language games
//!
//! Three quiz games share one round lifecycle: a setup draws a challenge from
//! the content store and records a single-use round ticket, a verify consumes
//! the ticket, grades the answer and turns correct answers into points and
//! badges.
//!
//! # Architecture
//!
//! - **Games**: vocabulary, article and conjugation strategies behind [`GameMode`]
//! - **Services**: [`GameService`] for the round lifecycle, [`ScoreService`] for listings
//! - **Achievements**: the ordered [`BadgeLadder`]
//! - **Storage**: [`GameRepository`] over SQLite with embedded migrations
//! - **API**: axum router built by [`build_router`]
//!
//! # Example
//!
//! ```no_run
//! use pajelingo::{ArticleSetup, GameRepository, GameRules, GameService, Identity};
//!
//! # fn example() -> anyhow::Result<()> {
//! let repository = GameRepository::new("pajelingo.db".to_string())?;
//! repository.run_migrations()?;
//!
//! let service = GameService::new(repository, GameRules::default());
//! let setup = ArticleSetup { language: "German".to_string() };
//! let challenge = service.setup(service.article(), Identity::User(1), &setup)?;
//! println!("Which article goes with {}?", challenge.word);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod achievements;
mod api;
mod config;
mod content;
mod db;
mod error;
mod game_service;
mod games;
mod score_service;
mod seed;

// Crate-level exports - Achievements
pub use achievements::{
    BADGES, BILINGUAL, Badge, BadgeLadder, BadgeRule, EXPLORER, LINGUISTIC_MASTERY, POLYGLOT,
    ScoreAggregates, TRILINGUAL, badge_by_id,
};

// Crate-level exports - HTTP surface
pub use api::{ApiError, ApiResult, AppState, USER_ID_HEADER, build_router};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DATABASE_URL_VAR, PORT_VAR};

// Crate-level exports - Content access
pub use content::{ConjugationFilter, ContentStore, VERB_CATEGORY, WordFilter};

// Crate-level exports - Storage
pub use db::{
    Article, Category, Conjugation, DbError, GameRepository, GameRound, Language, MIGRATIONS,
    NewArticle, NewConjugation, NewGameRound, NewLanguage, NewScore, NewSynonym, NewUser,
    NewUserBadge, NewWord, Score, ScoreRow, User, UserBadge, Word,
};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind};

// Crate-level exports - Services
pub use game_service::{GameRules, GameService};
pub use score_service::{RankingEntry, Rankings, ScoreService, rank};

// Crate-level exports - Games
pub use games::{
    ArticleAnswer, ArticleGame, ArticleSetup, Challenge, ConjugationAnswer, ConjugationGame,
    ConjugationSetup, Draw, GameInfo, GameKind, GameMode, Graded, Identity, RoundData,
    RoundOutcome, TicketCheck, VocabularyAnswer, VocabularyGame, VocabularySetup, catalog,
};

// Crate-level exports - Content packs
pub use seed::{ContentPack, ConjugationEntry, LanguageEntry, SeedReport, WordEntry, WordRef};
