use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque backend-assigned identifier for one played game.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl GameId {
    /// Sentinel meaning "no active session".
    pub const NONE: Self = Self(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle phase of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionPhase {
    /// No session exists locally; the backend has not confirmed one.
    #[default]
    NoGame,
    /// Session is live and accepting guesses.
    InProgress,
    /// Terminal: the most recent turn matched the secret word exactly.
    Won,
    /// Terminal: the turn budget is exhausted without a winning turn.
    Lost,
}

impl SessionPhase {
    /// Terminal phases accept no further turns.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Won | SessionPhase::Lost)
    }
}
