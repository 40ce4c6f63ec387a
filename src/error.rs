//! Engine errors.
//!
//! Every expected failure is a structured `EngineError` value carried in
//! a `Result` — nothing user-facing is silent and nothing panics. The
//! surrounding transport layer groups errors by [`ErrorKind`] when it
//! builds its response envelope.

use thiserror::Error;

use crate::session::SessionId;

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Coarse error categories for the transport envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed rule document.
    Configuration,
    /// A turn action failed legality or requirement checks. Recoverable:
    /// the caller may retry with a different action.
    Validation,
    /// A referenced session, player, or card does not exist.
    NotFound,
    /// Action attempted against a session in the wrong lifecycle state.
    IllegalState,
    /// Draw requested with no cards left.
    DeckEmpty,
}

/// Errors produced by the engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid rule document: {0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("player '{0}' not found in game session")]
    PlayerNotFound(String),

    #[error("game session {0} not found")]
    SessionNotFound(SessionId),

    #[error("action '{0}' not allowed in this game")]
    ActionNotAllowed(String),

    #[error("unknown custom action: {0}")]
    UnknownAction(String),

    #[error("requirement not met: {0}")]
    RequirementNotMet(String),

    #[error("no cards left in deck")]
    DeckEmpty,

    #[error("game session is {actual}, expected {expected}")]
    IllegalState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("deck has {available} cards but the initial deal needs {needed}")]
    NotEnoughCards { needed: usize, available: usize },
}

impl EngineError {
    /// Collapse to the coarse category used by the transport envelope.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Configuration(_) | EngineError::NotEnoughCards { .. } => {
                ErrorKind::Configuration
            }
            EngineError::Validation(_)
            | EngineError::ActionNotAllowed(_)
            | EngineError::UnknownAction(_)
            | EngineError::RequirementNotMet(_) => ErrorKind::Validation,
            EngineError::PlayerNotFound(_) | EngineError::SessionNotFound(_) => {
                ErrorKind::NotFound
            }
            EngineError::DeckEmpty => ErrorKind::DeckEmpty,
            EngineError::IllegalState { .. } => ErrorKind::IllegalState,
        }
    }
}
