//! Wire-level letter outcome codec.
//!
//! The backend evaluates each guess letter and sends the verdicts as numeric
//! codes. The mapping is a fixed bijection; anything outside the known range
//! is a protocol error and must surface as one instead of being coerced to
//! [`Outcome::Unknown`].
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A letter-outcome code received from the backend that is outside 0..=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid letter outcome code {code}, expected 0..=3")]
pub struct InvalidOutcomeCode {
    pub code: u8,
}

/// Per-letter evaluation result of a guess.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// Letter is in the word at this exact position.
    Correct,
    /// Letter is in the word at a different position.
    Present,
    /// Letter is not in the word.
    Absent,
    /// Not yet evaluated. Never produced by a completed guess evaluation.
    #[default]
    Unknown,
}

impl Outcome {
    /// Decodes a wire code into an outcome.
    pub fn from_wire(code: u8) -> Result<Self, InvalidOutcomeCode> {
        match code {
            0 => Ok(Outcome::Correct),
            1 => Ok(Outcome::Present),
            2 => Ok(Outcome::Absent),
            3 => Ok(Outcome::Unknown),
            code => Err(InvalidOutcomeCode { code }),
        }
    }

    /// Encodes an outcome back into its wire code.
    pub fn wire(self) -> u8 {
        match self {
            Outcome::Correct => 0,
            Outcome::Present => 1,
            Outcome::Absent => 2,
            Outcome::Unknown => 3,
        }
    }

    /// Keyboard aggregation precedence: Correct > Present > Absent > Unknown.
    pub(crate) fn rank(self) -> u8 {
        match self {
            Outcome::Correct => 3,
            Outcome::Present => 2,
            Outcome::Absent => 1,
            Outcome::Unknown => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_a_bijection_over_valid_codes() {
        for code in 0..=3u8 {
            let outcome = Outcome::from_wire(code).expect("valid code");
            assert_eq!(outcome.wire(), code);
        }
        assert_eq!(Outcome::from_wire(0), Ok(Outcome::Correct));
        assert_eq!(Outcome::from_wire(1), Ok(Outcome::Present));
        assert_eq!(Outcome::from_wire(2), Ok(Outcome::Absent));
        assert_eq!(Outcome::from_wire(3), Ok(Outcome::Unknown));
    }

    #[test]
    fn decode_rejects_out_of_range_codes() {
        for code in [4u8, 7, 200, u8::MAX] {
            assert_eq!(Outcome::from_wire(code), Err(InvalidOutcomeCode { code }));
        }
    }

    #[test]
    fn precedence_orders_correct_over_present_over_absent() {
        assert!(Outcome::Correct.rank() > Outcome::Present.rank());
        assert!(Outcome::Present.rank() > Outcome::Absent.rank());
        assert!(Outcome::Absent.rank() > Outcome::Unknown.rank());
    }
}
