use crate::outcome::{InvalidOutcomeCode, Outcome};

/// One letter of a completed guess together with its evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub letter: char,
    pub outcome: Outcome,
}

impl Cell {
    pub fn new(letter: char, outcome: Outcome) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            outcome,
        }
    }
}

/// A completed guess and its per-letter outcomes. Immutable once appended
/// to a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    word: String,
    cells: Vec<Cell>,
}

impl TurnRecord {
    /// Pairs a guessed word with its wire outcome codes.
    ///
    /// Callers are responsible for length validation against the session;
    /// this only requires word and codes to agree with each other.
    pub(crate) fn decode(word: &str, codes: &[u8]) -> Result<Self, InvalidOutcomeCode> {
        debug_assert_eq!(word.chars().count(), codes.len());

        let word = word.to_ascii_uppercase();
        let cells = word
            .chars()
            .zip(codes)
            .map(|(letter, &code)| Ok(Cell::new(letter, Outcome::from_wire(code)?)))
            .collect::<Result<Vec<_>, InvalidOutcomeCode>>()?;

        Ok(Self { word, cells })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A turn wins the game when every cell came back correct.
    pub fn is_winning(&self) -> bool {
        self.cells.iter().all(|cell| cell.outcome == Outcome::Correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_pairs_letters_with_outcomes() {
        let turn = TurnRecord::decode("crane", &[2, 0, 0, 1, 2]).expect("valid codes");
        assert_eq!(turn.word(), "CRANE");
        assert_eq!(turn.cells()[0], Cell::new('C', Outcome::Absent));
        assert_eq!(turn.cells()[1], Cell::new('R', Outcome::Correct));
        assert_eq!(turn.cells()[3], Cell::new('N', Outcome::Present));
        assert!(!turn.is_winning());
    }

    #[test]
    fn decode_surfaces_bad_codes() {
        let err = TurnRecord::decode("CRANE", &[0, 0, 9, 0, 0]).unwrap_err();
        assert_eq!(err, InvalidOutcomeCode { code: 9 });
    }

    #[test]
    fn all_correct_turn_is_winning() {
        let turn = TurnRecord::decode("TRAIN", &[0, 0, 0, 0, 0]).expect("valid codes");
        assert!(turn.is_winning());
    }
}
