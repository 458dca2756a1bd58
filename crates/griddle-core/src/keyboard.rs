//! Best-known outcome per alphabet letter, used to color the on-screen
//! keyboard.
//!
//! Entries only ever upgrade: a key that turned green stays green even if a
//! later guess places the same letter somewhere it is merely present.
use crate::outcome::Outcome;
use crate::state::TurnRecord;

const ALPHABET_LEN: usize = 26;

/// Aggregate of the strongest outcome seen for each letter A-Z.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardAggregate {
    slots: [Outcome; ALPHABET_LEN],
}

impl KeyboardAggregate {
    pub fn new() -> Self {
        Self {
            slots: [Outcome::Unknown; ALPHABET_LEN],
        }
    }

    /// Replays the full turn history from scratch.
    ///
    /// Equivalent to folding each turn into a fresh aggregate via
    /// [`KeyboardAggregate::apply_turn`]; the session store uses the
    /// incremental path and tests assert the equivalence.
    pub fn rebuild(turns: &[TurnRecord]) -> Self {
        let mut aggregate = Self::new();
        for turn in turns {
            aggregate.apply_turn(turn);
        }
        aggregate
    }

    /// Folds one newly appended turn into the aggregate.
    pub fn apply_turn(&mut self, turn: &TurnRecord) {
        for cell in turn.cells() {
            self.upgrade(cell.letter, cell.outcome);
        }
    }

    /// Best-known outcome for a letter; `Unknown` for anything outside A-Z.
    pub fn get(&self, letter: char) -> Outcome {
        match slot_index(letter) {
            Some(index) => self.slots[index],
            None => Outcome::Unknown,
        }
    }

    /// Iterates `('A'..='Z')` paired with their aggregate outcomes.
    pub fn iter(&self) -> impl Iterator<Item = (char, Outcome)> + '_ {
        ('A'..='Z').zip(self.slots.iter().copied())
    }

    fn upgrade(&mut self, letter: char, outcome: Outcome) {
        if let Some(index) = slot_index(letter)
            && outcome.rank() > self.slots[index].rank()
        {
            self.slots[index] = outcome;
        }
    }
}

impl Default for KeyboardAggregate {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| (upper as u8 - b'A') as usize)
}
