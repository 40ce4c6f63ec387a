//! The turn-processing pipeline: legality, turn dispatch, effect
//! resolution, scoring, and win detection.
//!
//! Everything here is a pure function over explicit session and rule
//! arguments — no process-wide mutable state. Validation always precedes
//! mutation: a failed step leaves the session exactly as it was.

pub mod effects;
pub mod legality;
pub mod scoring;
pub mod turn;
pub mod win;

pub use effects::{EffectDescriptor, EffectList, EffectResolver};
pub use legality::can_play;
pub use scoring::ScoreCalculator;
pub use turn::{TurnOutcome, TurnProcessor, TurnRequest};
pub use win::WinDetector;
