//! Deterministic word-guessing game state shared across clients.
//!
//! `griddle-core` defines the canonical session rules (turn history, win/loss
//! detection, keyboard aggregation, reveal timing) and exposes pure APIs that
//! can be reused by both the runtime and offline tools. All state mutation
//! flows through [`state::GameSession`], and supporting crates depend on the
//! types re-exported here.
pub mod config;
pub mod keyboard;
pub mod outcome;
pub mod reveal;
pub mod state;

pub use config::GameConfig;
pub use keyboard::KeyboardAggregate;
pub use outcome::{InvalidOutcomeCode, Outcome};
pub use reveal::{CellReveal, TurnReveal, replay_schedule, schedule_for};
pub use state::{
    Cell, GameId, GameSession, GuessEntry, SessionError, SessionPhase, SessionSnapshot, TurnRecord,
};
