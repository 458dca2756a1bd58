//! Session store: the single mutation point for game state.
//!
//! Wraps [`GameSession`] so that every committed mutation is followed by a
//! matching event on the bus, and nothing is published for a rejected one.
//! Observers never receive partial updates; they re-read the store when
//! notified.
use tokio::sync::{broadcast, watch};

use griddle_core::{GameId, GameSession, SessionError, SessionPhase, SessionSnapshot};

use crate::events::{EventBus, StoreEvent};

/// Owns the authoritative session plus its notification channels.
pub struct SessionStore {
    session: GameSession,
    bus: EventBus,
    /// Guess-validity signal: `true` is neutral, `false` pulses on a remote
    /// rejection and is cleared back by the client after a fixed window.
    validation: watch::Sender<bool>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (validation, _) = watch::channel(true);
        Self {
            session: GameSession::new(),
            bus: EventBus::new(),
            validation,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.bus.subscribe()
    }

    pub fn watch_validation(&self) -> watch::Receiver<bool> {
        self.validation.subscribe()
    }

    pub(crate) fn validation_sender(&self) -> watch::Sender<bool> {
        self.validation.clone()
    }

    /// Drops the local session and returns to no-game.
    pub fn reset(&mut self) {
        self.session.reset();
        self.bus.publish(StoreEvent::SessionCleared);
    }

    /// Replaces local state with a resumed backend snapshot.
    pub fn load_snapshot(&mut self, snapshot: &SessionSnapshot) -> Result<SessionPhase, SessionError> {
        self.session.load_snapshot(snapshot)?;
        self.bus.publish(StoreEvent::SessionLoaded);
        Ok(self.session.phase())
    }

    /// Adopts a backend-confirmed new game.
    pub fn confirm_new_game(&mut self, id: GameId, word_length: usize, max_turns: usize) {
        self.session.confirm_new_game(id, word_length, max_turns);
        self.bus.publish(StoreEvent::NewGameStarted);
    }

    /// Appends an evaluated guess; publishes the append and, when the turn
    /// ends the game, the terminal transition.
    pub fn append_guess(
        &mut self,
        word: &str,
        outcome_codes: &[u8],
        answer: Option<&str>,
    ) -> Result<SessionPhase, SessionError> {
        let turn_index = self.session.current_turn_index();
        let phase = self.session.append_guess(word, outcome_codes, answer)?;

        self.bus.publish(StoreEvent::TurnAppended { turn_index });
        if phase.is_terminal() {
            self.bus.publish(StoreEvent::GameOver {
                won: phase == SessionPhase::Won,
            });
        }
        Ok(phase)
    }

    /// Updates the editing buffer; publishes only when the buffer changed.
    pub fn set_pending_input(&mut self, value: &str) {
        if self.session.set_pending_input(value) {
            self.bus.publish(StoreEvent::PendingInputChanged);
        }
    }

    /// Marks the in-flight guess as rejected by the remote authority.
    /// Leaves turns and the editing buffer untouched.
    pub fn reject_guess(&mut self) {
        self.validation.send_replace(false);
        self.bus.publish(StoreEvent::GuessRejected);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
