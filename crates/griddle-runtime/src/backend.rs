//! Boundary with the remote game authority.
//!
//! The backend owns the secret word, the dictionary, and persistence; the
//! client only ever sees evaluated guesses. Implementations wrap whatever
//! transport the deployment uses (HTTP JSON in production, scripted stubs in
//! tests), mirroring the collaborator-trait pattern used for action
//! providers in the runtime this crate is modeled on.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use griddle_core::{GameId, SessionSnapshot};

/// Failures surfaced by the remote game authority.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Resume found nothing to resume. Expected outcome, not a fault.
    #[error("no active game found")]
    NoActiveGame,

    /// Guess length does not match the session's word length.
    #[error("guess word length does not match the game word length")]
    InvalidWordLength,

    /// Guess is not a recognized dictionary word.
    #[error("invalid guess word")]
    InvalidWord,

    /// The submitted game id does not match the backend's active game.
    #[error("guess targeted a different game session")]
    SessionMismatch,

    /// Transport-level failure (network, serialization, auth).
    #[error("backend transport failure")]
    Transport(#[from] anyhow::Error),
}

impl BackendError {
    /// Rejections the user can recover from by editing their guess. These
    /// surface as a validation pulse rather than an error.
    pub fn is_guess_rejection(&self) -> bool {
        matches!(self, BackendError::InvalidWordLength | BackendError::InvalidWord)
    }
}

/// Backend reply to a submitted guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessReply {
    pub game_id: GameId,
    #[serde(rename = "guess")]
    pub word: String,
    /// 1-based number of the guess just evaluated.
    pub turn: usize,
    #[serde(rename = "isGuessCorrect")]
    pub is_correct: bool,
    /// Canonical secret word; empty unless this guess ended the game.
    pub answer: String,
    #[serde(rename = "letterStates")]
    pub outcome_codes: Vec<u8>,
}

/// Backend confirmation of a newly created session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionReply {
    pub game_id: GameId,
    pub word_length: usize,
    pub max_turns: usize,
}

/// Abstract remote game authority.
///
/// All calls are suspension points; nothing else in the engine blocks.
#[async_trait]
pub trait GameBackend: Send + Sync {
    /// Fetches the authenticated player's active game, if any.
    async fn fetch_current_session(&self) -> Result<SessionSnapshot, BackendError>;

    /// Submits a guess for evaluation against the given game.
    async fn submit_guess(&self, game_id: GameId, word: &str) -> Result<GuessReply, BackendError>;

    /// Allocates a fresh game with the requested dimensions.
    async fn create_session(
        &self,
        word_length: usize,
        max_turns: usize,
    ) -> Result<NewSessionReply, BackendError>;
}
