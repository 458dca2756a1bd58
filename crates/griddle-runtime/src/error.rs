//! Unified error types surfaced by the client API.
//!
//! Wraps failures from the session state machine and the remote backend so
//! callers can bubble them up with consistent context.
use thiserror::Error;

use griddle_core::SessionError;

use crate::backend::BackendError;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A submit or new-game call is still pending for this session.
    #[error("a mutating call is already in flight for this session")]
    SubmissionInFlight,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
