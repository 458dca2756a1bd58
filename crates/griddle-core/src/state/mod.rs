pub mod common;
pub mod session;
pub mod turn;

pub use common::{GameId, SessionPhase};
pub use session::{GameSession, GuessEntry, SessionError, SessionSnapshot};
pub use turn::{Cell, TurnRecord};
