use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::keyboard::KeyboardAggregate;
use crate::outcome::InvalidOutcomeCode;

use super::common::{GameId, SessionPhase};
use super::turn::TurnRecord;

/// Errors surfaced while mutating a [`GameSession`].
///
/// Every failing operation leaves the session exactly as it was; there are
/// no partial mutations to roll back.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session is not accepting guesses (phase: {phase})")]
    NotActive { phase: SessionPhase },

    #[error("turn limit of {max_turns} already reached")]
    TurnLimitExceeded { max_turns: usize },

    #[error("guess length {got} does not match session word length {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("malformed session snapshot: {reason}")]
    MalformedSnapshot { reason: String },

    #[error(transparent)]
    InvalidOutcome(#[from] InvalidOutcomeCode),
}

/// One guess row as carried by the backend's current-game payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessEntry {
    #[serde(rename = "guess")]
    pub word: String,
    #[serde(rename = "letterStates")]
    pub outcome_codes: Vec<u8>,
}

/// Remote view of an active game, as returned by the backend on resume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub game_id: GameId,
    #[serde(rename = "guessLength")]
    pub word_length: usize,
    pub max_turns: usize,
    pub turns_played: usize,
    pub guesses: Vec<GuessEntry>,
}

/// Authoritative local state of one played game.
///
/// Holds the ordered turn history, the derived keyboard aggregate, and the
/// ephemeral input buffer. Invariants (enforced by every operation):
///
/// - `current_turn_index() == turns().len()` at all times
/// - `turns().len() <= max_turns()`
/// - every appended turn has exactly `word_length()` cells
/// - `Won`/`Lost` are absorbing; no turn is appended past them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    id: GameId,
    word_length: usize,
    max_turns: usize,
    phase: SessionPhase,
    turns: Vec<TurnRecord>,
    keyboard: KeyboardAggregate,
    pending_input: String,
    answer: String,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            id: GameId::NONE,
            word_length: GameConfig::DEFAULT_WORD_LENGTH,
            max_turns: GameConfig::DEFAULT_MAX_TURNS,
            phase: SessionPhase::NoGame,
            turns: Vec::new(),
            keyboard: KeyboardAggregate::new(),
            pending_input: String::new(),
            answer: String::new(),
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    /// Count of completed turns; always equal to `turns().len()`.
    pub fn current_turn_index(&self) -> usize {
        self.turns.len()
    }

    pub fn keyboard(&self) -> &KeyboardAggregate {
        &self.keyboard
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// The canonical answer word, or empty while the session is not terminal.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Drops any local session and returns to the configured defaults.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Replaces local state with a backend snapshot of the active game.
    ///
    /// All-or-nothing: a malformed snapshot leaves the session untouched.
    pub fn load_snapshot(&mut self, snapshot: &SessionSnapshot) -> Result<(), SessionError> {
        if snapshot.game_id.is_none() {
            return Err(malformed("snapshot carries no game id"));
        }
        if snapshot.word_length == 0 || snapshot.max_turns == 0 {
            return Err(malformed("zero word length or turn budget"));
        }
        if snapshot.turns_played != snapshot.guesses.len() {
            return Err(malformed(format!(
                "turnsPlayed {} disagrees with {} recorded guesses",
                snapshot.turns_played,
                snapshot.guesses.len()
            )));
        }
        if snapshot.guesses.len() > snapshot.max_turns {
            return Err(malformed(format!(
                "{} guesses exceed turn budget {}",
                snapshot.guesses.len(),
                snapshot.max_turns
            )));
        }

        let mut turns = Vec::with_capacity(snapshot.guesses.len());
        for entry in &snapshot.guesses {
            if entry.word.chars().count() != snapshot.word_length
                || entry.outcome_codes.len() != snapshot.word_length
            {
                return Err(malformed(format!(
                    "guess {:?} does not match word length {}",
                    entry.word, snapshot.word_length
                )));
            }
            turns.push(TurnRecord::decode(&entry.word, &entry.outcome_codes)?);
        }

        let phase = evaluate_phase(&turns, snapshot.max_turns);

        self.id = snapshot.game_id;
        self.word_length = snapshot.word_length;
        self.max_turns = snapshot.max_turns;
        self.phase = phase;
        self.keyboard = KeyboardAggregate::rebuild(&turns);
        self.turns = turns;
        self.pending_input.clear();
        // The snapshot never carries the secret; a session resumed into a
        // terminal phase simply has no displayable answer.
        self.answer.clear();
        Ok(())
    }

    /// Adopts a backend-confirmed new game and enters `InProgress`.
    pub fn confirm_new_game(&mut self, id: GameId, word_length: usize, max_turns: usize) {
        self.id = id;
        self.word_length = word_length;
        self.max_turns = max_turns;
        self.phase = SessionPhase::InProgress;
        self.turns.clear();
        self.keyboard = KeyboardAggregate::new();
        self.pending_input.clear();
        self.answer.clear();
    }

    /// Appends a backend-evaluated guess and advances the state machine.
    ///
    /// `answer` is the canonical secret word, supplied by the backend with
    /// the reply; it is recorded only when this turn terminates the game.
    /// Returns the phase after the append.
    pub fn append_guess(
        &mut self,
        word: &str,
        outcome_codes: &[u8],
        answer: Option<&str>,
    ) -> Result<SessionPhase, SessionError> {
        if self.phase != SessionPhase::InProgress {
            return Err(SessionError::NotActive { phase: self.phase });
        }
        if self.turns.len() >= self.max_turns {
            return Err(SessionError::TurnLimitExceeded {
                max_turns: self.max_turns,
            });
        }
        let word_len = word.chars().count();
        if word_len != self.word_length {
            return Err(SessionError::LengthMismatch {
                expected: self.word_length,
                got: word_len,
            });
        }
        if outcome_codes.len() != self.word_length {
            return Err(SessionError::LengthMismatch {
                expected: self.word_length,
                got: outcome_codes.len(),
            });
        }

        // Decode before touching any state so a bad code aborts cleanly.
        let turn = TurnRecord::decode(word, outcome_codes)?;

        self.keyboard.apply_turn(&turn);
        let won = turn.is_winning();
        self.turns.push(turn);
        self.pending_input.clear();

        if won {
            self.phase = SessionPhase::Won;
        } else if self.turns.len() == self.max_turns {
            self.phase = SessionPhase::Lost;
        }

        if self.phase.is_terminal() {
            self.answer = answer.unwrap_or(word).to_ascii_uppercase();
        }

        Ok(self.phase)
    }

    /// Updates the editing buffer. Values longer than the word length are
    /// ignored (bounded-buffer UX contract, not an error). Returns whether
    /// the buffer changed.
    pub fn set_pending_input(&mut self, value: &str) -> bool {
        if value.chars().count() > self.word_length {
            return false;
        }
        let value = value.to_ascii_uppercase();
        if value == self.pending_input {
            return false;
        }
        self.pending_input = value;
        true
    }

    /// Re-encodes the turn history into the backend's snapshot shape.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game_id: self.id,
            word_length: self.word_length,
            max_turns: self.max_turns,
            turns_played: self.turns.len(),
            guesses: self
                .turns
                .iter()
                .map(|turn| GuessEntry {
                    word: turn.word().to_owned(),
                    outcome_codes: turn.cells().iter().map(|cell| cell.outcome.wire()).collect(),
                })
                .collect(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

fn malformed(reason: impl Into<String>) -> SessionError {
    SessionError::MalformedSnapshot {
        reason: reason.into(),
    }
}

fn evaluate_phase(turns: &[TurnRecord], max_turns: usize) -> SessionPhase {
    match turns.last() {
        Some(last) if last.is_winning() => SessionPhase::Won,
        Some(_) if turns.len() == max_turns => SessionPhase::Lost,
        _ => SessionPhase::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;

    fn in_progress(word_length: usize, max_turns: usize) -> GameSession {
        let mut session = GameSession::new();
        session.confirm_new_game(GameId(7), word_length, max_turns);
        session
    }

    #[test]
    fn fresh_session_has_no_game() {
        let session = GameSession::new();
        assert_eq!(session.id(), GameId::NONE);
        assert_eq!(session.phase(), SessionPhase::NoGame);
        assert_eq!(session.word_length(), 5);
        assert_eq!(session.max_turns(), 6);
        assert_eq!(session.current_turn_index(), 0);
    }

    #[test]
    fn append_rejects_when_no_game_is_active() {
        let mut session = GameSession::new();
        let err = session.append_guess("CRANE", &[0, 0, 0, 0, 0], None).unwrap_err();
        assert_eq!(
            err,
            SessionError::NotActive {
                phase: SessionPhase::NoGame
            }
        );
        assert!(session.turns().is_empty());
    }

    #[test]
    fn append_rejects_mismatched_lengths_without_mutation() {
        let mut session = in_progress(5, 6);
        let before = session.clone();

        assert!(matches!(
            session.append_guess("TRAINS", &[0, 0, 0, 0, 0, 0], None),
            Err(SessionError::LengthMismatch { expected: 5, got: 6 })
        ));
        assert!(matches!(
            session.append_guess("TRAIN", &[0, 0, 0], None),
            Err(SessionError::LengthMismatch { expected: 5, got: 3 })
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn append_rejects_bad_outcome_codes_without_mutation() {
        let mut session = in_progress(5, 6);
        let before = session.clone();

        let err = session.append_guess("CRANE", &[0, 0, 9, 0, 0], None).unwrap_err();
        assert_eq!(err, SessionError::InvalidOutcome(InvalidOutcomeCode { code: 9 }));
        assert_eq!(session, before);
    }

    #[test]
    fn crane_against_train_stays_in_progress() {
        let mut session = in_progress(5, 6);
        let phase = session
            .append_guess("CRANE", &[2, 0, 0, 1, 2], None)
            .expect("valid guess");

        assert_eq!(phase, SessionPhase::InProgress);
        assert_eq!(session.current_turn_index(), 1);
        assert_eq!(session.keyboard().get('R'), Outcome::Correct);
        assert_eq!(session.keyboard().get('A'), Outcome::Correct);
        assert_eq!(session.keyboard().get('N'), Outcome::Present);
        assert_eq!(session.keyboard().get('C'), Outcome::Absent);
        assert_eq!(session.keyboard().get('E'), Outcome::Absent);
        assert_eq!(session.answer(), "");
    }

    #[test]
    fn winning_turn_terminates_the_session() {
        let mut session = in_progress(5, 6);
        let phase = session
            .append_guess("train", &[0, 0, 0, 0, 0], Some("TRAIN"))
            .expect("valid guess");

        assert_eq!(phase, SessionPhase::Won);
        assert_eq!(session.answer(), "TRAIN");

        let err = session.append_guess("CRANE", &[2, 2, 2, 2, 2], None).unwrap_err();
        assert_eq!(
            err,
            SessionError::NotActive {
                phase: SessionPhase::Won
            }
        );
        assert_eq!(session.current_turn_index(), 1);
    }

    #[test]
    fn exhausting_turns_without_a_win_is_a_loss() {
        let mut session = in_progress(5, 6);
        for _ in 0..5 {
            let phase = session
                .append_guess("CRANE", &[2, 2, 2, 2, 2], None)
                .expect("valid guess");
            assert_eq!(phase, SessionPhase::InProgress);
        }

        let phase = session
            .append_guess("CRANE", &[2, 2, 2, 2, 2], Some("TRAIN"))
            .expect("valid guess");
        assert_eq!(phase, SessionPhase::Lost);
        assert_eq!(session.answer(), "TRAIN");
        assert_eq!(session.current_turn_index(), 6);
    }

    #[test]
    fn final_turn_win_beats_the_turn_limit() {
        let mut session = in_progress(5, 6);
        for _ in 0..5 {
            session
                .append_guess("CRANE", &[2, 2, 2, 2, 2], None)
                .expect("valid guess");
        }

        let phase = session
            .append_guess("TRAIN", &[0, 0, 0, 0, 0], Some("TRAIN"))
            .expect("valid guess");
        assert_eq!(phase, SessionPhase::Won);
        assert_eq!(session.current_turn_index(), session.max_turns());
    }

    #[test]
    fn pending_input_is_bounded() {
        let mut session = in_progress(5, 6);
        assert!(session.set_pending_input("tra"));
        assert_eq!(session.pending_input(), "TRA");

        // Too long: silently ignored, buffer untouched.
        assert!(!session.set_pending_input("TOOLONG"));
        assert_eq!(session.pending_input(), "TRA");

        assert!(session.set_pending_input(""));
        assert_eq!(session.pending_input(), "");
    }

    #[test]
    fn successful_append_clears_pending_input() {
        let mut session = in_progress(5, 6);
        session.set_pending_input("CRANE");
        session
            .append_guess("CRANE", &[2, 0, 0, 1, 2], None)
            .expect("valid guess");
        assert_eq!(session.pending_input(), "");
    }

    #[test]
    fn snapshot_round_trip_reconstructs_live_state() {
        let mut live = in_progress(5, 6);
        live.append_guess("CRANE", &[2, 0, 0, 1, 2], None).expect("valid");
        live.append_guess("TRAIL", &[1, 0, 0, 0, 2], None).expect("valid");

        let mut resumed = GameSession::new();
        resumed.load_snapshot(&live.snapshot()).expect("well-formed snapshot");

        assert_eq!(resumed.id(), live.id());
        assert_eq!(resumed.phase(), live.phase());
        assert_eq!(resumed.current_turn_index(), live.current_turn_index());
        assert_eq!(resumed.keyboard(), live.keyboard());
        assert_eq!(resumed.turns(), live.turns());
    }

    #[test]
    fn snapshot_round_trip_preserves_terminal_phase() {
        let mut live = in_progress(5, 2);
        live.append_guess("CRANE", &[2, 2, 2, 2, 2], None).expect("valid");
        live.append_guess("CRANE", &[2, 2, 2, 2, 2], Some("TRAIN")).expect("valid");
        assert_eq!(live.phase(), SessionPhase::Lost);

        let mut resumed = GameSession::new();
        resumed.load_snapshot(&live.snapshot()).expect("well-formed snapshot");
        assert_eq!(resumed.phase(), SessionPhase::Lost);
    }

    #[test]
    fn load_snapshot_rejects_inconsistent_payloads() {
        let mut session = GameSession::new();
        let before = session.clone();

        let mut snapshot = SessionSnapshot {
            game_id: GameId(3),
            word_length: 5,
            max_turns: 6,
            turns_played: 2,
            guesses: vec![GuessEntry {
                word: "CRANE".into(),
                outcome_codes: vec![2, 0, 0, 1, 2],
            }],
        };
        assert!(matches!(
            session.load_snapshot(&snapshot),
            Err(SessionError::MalformedSnapshot { .. })
        ));

        snapshot.turns_played = 1;
        snapshot.guesses[0].word = "CRANES".into();
        assert!(matches!(
            session.load_snapshot(&snapshot),
            Err(SessionError::MalformedSnapshot { .. })
        ));

        snapshot.guesses[0].word = "CRANE".into();
        snapshot.game_id = GameId::NONE;
        assert!(matches!(
            session.load_snapshot(&snapshot),
            Err(SessionError::MalformedSnapshot { .. })
        ));

        assert_eq!(session, before);
    }

    #[test]
    fn snapshot_json_matches_backend_wire_shape() {
        let json = r#"{
            "gameId": 42,
            "guessLength": 5,
            "maxTurns": 6,
            "turnsPlayed": 1,
            "guesses": [{ "guess": "CRANE", "letterStates": [2, 0, 0, 1, 2] }]
        }"#;

        let snapshot: SessionSnapshot = serde_json::from_str(json).expect("well-formed JSON");
        assert_eq!(snapshot.game_id, GameId(42));
        assert_eq!(snapshot.word_length, 5);
        assert_eq!(snapshot.guesses[0].outcome_codes, vec![2, 0, 0, 1, 2]);

        let mut session = GameSession::new();
        session.load_snapshot(&snapshot).expect("valid snapshot");
        assert_eq!(session.phase(), SessionPhase::InProgress);
    }
}
