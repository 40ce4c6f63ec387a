//! # cardforge
//!
//! A rule-driven turn engine for operator-defined card games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded game. Suits, ranks, legality,
//!    effects, scoring, and win conditions all come from a JSON rule
//!    document decoded at load time.
//!
//! 2. **Decode Once**: Rule documents are parsed eagerly into closed
//!    tagged enums. An unknown rule or effect type is a configuration
//!    error at load, never a silent no-op at play time.
//!
//! 3. **Validate Before Mutate**: Every turn action checks everything it
//!    needs before touching session state. An error return means the
//!    session is exactly as it was.
//!
//! 4. **Deterministic Replay**: Deck shuffling is the only randomness,
//!    driven by a seedable forkable RNG. One master seed reproduces every
//!    session it ever started.
//!
//! ## Modules
//!
//! - `error`: Engine errors and the coarse category mapping
//! - `rng`: Seedable, forkable ChaCha8 RNG
//! - `cards`: Card instances, templates, ids
//! - `rules`: Rule document decoding and validation
//! - `deck`: Deck construction from declarative configuration
//! - `session`: Player roster, game state, lifecycle state machine
//! - `engine`: Legality, turn dispatch, effects, scoring, win detection
//! - `snapshot`: Privacy-preserving session views
//! - `manager`: Concurrent session registry

pub mod cards;
pub mod deck;
pub mod engine;
pub mod error;
pub mod manager;
pub mod rng;
pub mod rules;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use crate::cards::{Card, CardId, CardTemplate};

pub use crate::deck::DeckBuilder;

pub use crate::engine::{
    can_play, EffectDescriptor, EffectList, EffectResolver, ScoreCalculator, TurnOutcome,
    TurnProcessor, TurnRequest, WinDetector,
};

pub use crate::error::{EngineError, EngineResult, ErrorKind};

pub use crate::manager::{SessionFilter, SessionManager};

pub use crate::rng::GameRng;

pub use crate::rules::{
    CardPlayRules, Criteria, CustomAction, DeckConfig, EffectKind, PlayRule, RuleDocument,
    RulesData, Scoring, SpecialEffect, TargetSet, Transformation, WinCondition,
};

pub use crate::session::{Direction, GameState, Player, Session, SessionId, SessionStatus};

pub use crate::snapshot::{PlayerSnapshot, SessionSnapshot};
