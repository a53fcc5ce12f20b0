//! Error types returned by the engine services.
//!
//! Every fallible operation validates before it mutates, so an `Err` always
//! means the game state is exactly as it was before the call.

use thiserror::Error;

/// Errors surfaced to the caller of a service operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KabooError {
    /// Malformed input to a call that is otherwise allowed right now
    /// (blank name, wrong selection, non-power card played as power card).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The call is not permitted in the current phase.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// No game is active in the session.
    #[error("no game is currently active")]
    NoActiveGame,
}

impl KabooError {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = KabooError> = std::result::Result<T, E>;
