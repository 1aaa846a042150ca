//! Error taxonomy of the game engine.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::db::DbError;

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Caller-supplied parameters are structurally wrong.
    #[display("invalid request: {_0}")]
    Validation(String),
    /// A natural key or id does not resolve.
    #[display("not found: {_0}")]
    NotFound(String),
    /// No pending round, or the answered round is not the one that was issued.
    #[display("round rejected: {_0}")]
    Session(String),
    /// The record already exists.
    #[display("conflict: {_0}")]
    Conflict(String),
    /// The operation needs an authenticated user.
    #[display("authentication required: {_0}")]
    Unauthenticated(String),
    /// Storage failed.
    #[display("storage failure: {_0}")]
    Database(String),
}

/// Game engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error category and message.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Structurally invalid parameters.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Validation(message.into()))
    }

    /// Unresolvable key or id.
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::NotFound(message.into()))
    }

    /// Missing or mismatched round ticket.
    #[track_caller]
    pub fn session(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Session(message.into()))
    }

    /// Record already exists.
    #[track_caller]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Conflict(message.into()))
    }

    /// Anonymous caller on a user-only operation.
    #[track_caller]
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::Unauthenticated(message.into()))
    }

    /// Returns the error category.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }
}

impl From<DbError> for GameError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        Self::new(GameErrorKind::Database(err.message))
    }
}
