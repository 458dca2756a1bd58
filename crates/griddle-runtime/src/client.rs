//! Synchronization protocol between the local store and the game backend.
//!
//! [`GameClient`] is the only writer of the session store. Every mutating
//! network call is single-flight: a second submit while one is pending is
//! rejected outright, and a reset, resume, or new game started while a
//! submit is pending invalidates that submit's eventual reply. Mashing the
//! enter key can therefore never race overlapping guess calls.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use griddle_core::{GameConfig, GameSession, SessionPhase};

use crate::backend::{BackendError, GameBackend};
use crate::error::{ClientError, Result};
use crate::events::StoreEvent;
use crate::store::SessionStore;

/// How a submit call settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The guess was evaluated and appended; carries the resulting phase.
    Accepted(SessionPhase),
    /// The backend rejected the word; the validation signal was pulsed and
    /// no state changed.
    Rejected,
    /// The reply arrived for a session or turn that is no longer current
    /// and was discarded without touching state.
    Superseded,
}

/// Orchestrates resume, submit, and new-game against the remote authority.
pub struct GameClient<B> {
    backend: B,
    store: Mutex<SessionStore>,
    /// Held for the duration of any mutating backend call. Submits refuse
    /// to queue behind it; resume and new-game wait their turn.
    inflight: tokio::sync::Mutex<()>,
    /// Bumped by reset, resume, and new-game; a submit whose captured epoch
    /// no longer matches at settle time is stale and discarded.
    epoch: AtomicU64,
    /// Distinguishes validation pulses so a stale clear task does not cut a
    /// newer rejection's window short.
    validation_gen: Arc<AtomicU64>,
}

impl<B: GameBackend> GameClient<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            store: Mutex::new(SessionStore::new()),
            inflight: tokio::sync::Mutex::new(()),
            epoch: AtomicU64::new(0),
            validation_gen: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Read-only clone of the current session.
    pub fn session(&self) -> GameSession {
        self.store().session().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store().subscribe()
    }

    pub fn watch_validation(&self) -> watch::Receiver<bool> {
        self.store().watch_validation()
    }

    /// Forwards a raw edit of the input buffer to the store.
    pub fn set_pending_input(&self, value: &str) {
        self.store().set_pending_input(value);
    }

    /// Abandons any local session without contacting the backend. A pending
    /// submit's reply is invalidated.
    pub fn reset(&self) {
        self.bump_epoch();
        self.store().reset();
    }

    /// Fetches the player's active game and loads it into the store.
    ///
    /// `NoActiveGame` is an expected outcome: the store is reset and the
    /// caller sees `NoGame` so the UI can prompt for a new game. A snapshot
    /// that violates session invariants also resets the store but surfaces
    /// the error.
    pub async fn resume(&self) -> Result<SessionPhase> {
        self.bump_epoch();
        let _permit = self.inflight.lock().await;

        match self.backend.fetch_current_session().await {
            Ok(snapshot) => {
                let mut store = self.store();
                match store.load_snapshot(&snapshot) {
                    Ok(phase) => {
                        info!(game_id = %snapshot.game_id, turns = snapshot.turns_played, "resumed active game");
                        Ok(phase)
                    }
                    Err(err) => {
                        warn!(game_id = %snapshot.game_id, %err, "resume snapshot malformed, dropping session");
                        store.reset();
                        Err(err.into())
                    }
                }
            }
            Err(BackendError::NoActiveGame) => {
                debug!("no active game to resume");
                self.store().reset();
                Ok(SessionPhase::NoGame)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Submits a guess for the active session.
    ///
    /// Fails fast with [`ClientError::SubmissionInFlight`] while another
    /// mutating call is pending. A reply that no longer matches the current
    /// session epoch, game id, and turn is discarded as [`SubmitOutcome::Superseded`].
    pub async fn submit_guess(&self, word: &str) -> Result<SubmitOutcome> {
        let _permit = self
            .inflight
            .try_lock()
            .map_err(|_| ClientError::SubmissionInFlight)?;

        let epoch = self.epoch.load(Ordering::SeqCst);
        let (game_id, expected_turn) = {
            let store = self.store();
            let session = store.session();
            if session.phase() != SessionPhase::InProgress {
                return Err(griddle_core::SessionError::NotActive {
                    phase: session.phase(),
                }
                .into());
            }
            (session.id(), session.current_turn_index() + 1)
        };

        let result = self.backend.submit_guess(game_id, word).await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            debug!(%game_id, "submit reply superseded by reset/resume/new game");
            return Ok(SubmitOutcome::Superseded);
        }

        match result {
            Ok(reply) => {
                if reply.game_id != game_id || reply.turn != expected_turn {
                    debug!(
                        reply_game = %reply.game_id, reply_turn = reply.turn,
                        %game_id, expected_turn,
                        "discarding stale guess reply"
                    );
                    return Ok(SubmitOutcome::Superseded);
                }

                let answer = (!reply.answer.is_empty()).then_some(reply.answer.as_str());
                let phase = self
                    .store()
                    .append_guess(&reply.word, &reply.outcome_codes, answer)?;
                debug!(%game_id, turn = reply.turn, %phase, "guess accepted");
                Ok(SubmitOutcome::Accepted(phase))
            }
            Err(err) if err.is_guess_rejection() => {
                debug!(%game_id, %err, "guess rejected by backend");
                self.pulse_validation();
                Ok(SubmitOutcome::Rejected)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Creates a fresh game and adopts the backend-confirmed dimensions.
    /// Always permitted, including from a terminal phase; a pending submit's
    /// reply is invalidated.
    pub async fn new_game(&self, word_length: usize, max_turns: usize) -> Result<SessionPhase> {
        self.bump_epoch();
        let _permit = self.inflight.lock().await;

        // NoGame until the backend confirms.
        self.store().reset();

        let reply = self.backend.create_session(word_length, max_turns).await?;
        info!(game_id = %reply.game_id, word_length = reply.word_length, max_turns = reply.max_turns, "new game confirmed");

        self.store()
            .confirm_new_game(reply.game_id, reply.word_length, reply.max_turns);
        Ok(SessionPhase::InProgress)
    }

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Sets the validation signal to `false` and schedules the clear back to
    /// neutral after the fixed window, so repeated invalid guesses each get
    /// their own feedback pulse.
    fn pulse_validation(&self) {
        let generation = self.validation_gen.fetch_add(1, Ordering::SeqCst) + 1;
        let tx = {
            let mut store = self.store();
            store.reject_guess();
            store.validation_sender()
        };

        let generations = Arc::clone(&self.validation_gen);
        tokio::spawn(async move {
            tokio::time::sleep(GameConfig::VALIDATION_CLEAR_WINDOW).await;
            if generations.load(Ordering::SeqCst) == generation {
                tx.send_replace(true);
            }
        });
    }

    fn store(&self) -> MutexGuard<'_, SessionStore> {
        // The store mutex is never held across an await, so contention is
        // momentary and poisoning only follows a panicking test.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
