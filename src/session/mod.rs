//! Live sessions: player roster, shared game state, and the session
//! lifecycle state machine.

pub mod player;
pub mod session;
pub mod state;

pub use player::Player;
pub use session::{Session, SessionId, SessionStatus};
pub use state::{Direction, GameState};
