use std::time::Duration;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Word length used until the backend confirms a session.
    pub word_length: usize,
    /// Turn budget used until the backend confirms a session.
    pub max_turns: usize,
}

impl GameConfig {
    // ===== session defaults =====
    pub const DEFAULT_WORD_LENGTH: usize = 5;
    pub const DEFAULT_MAX_TURNS: usize = 6;

    // ===== presentation timing =====
    /// Per-cell stagger when revealing a freshly evaluated turn.
    pub const REVEAL_STEP: Duration = Duration::from_millis(200);
    /// Per-row stagger when replaying an already-played board after resume.
    pub const REPLAY_ROW_STAGGER: Duration = Duration::from_millis(300);
    /// Per-cell stagger within a replayed row.
    pub const REPLAY_CELL_STAGGER: Duration = Duration::from_millis(100);
    /// Window after which a rejected-guess signal clears back to neutral.
    pub const VALIDATION_CLEAR_WINDOW: Duration = Duration::from_millis(1000);

    pub fn new() -> Self {
        Self {
            word_length: Self::DEFAULT_WORD_LENGTH,
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
